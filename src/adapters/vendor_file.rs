use crate::domain::model::Vendor;
use crate::domain::ports::Storage;
use crate::utils::error::{PlannerError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorFormat {
    Json,
    Csv,
}

impl VendorFormat {
    pub const EXTENSIONS: [&'static str; 2] = ["json", "csv"];

    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(VendorFormat::Json),
            Some("csv") => Ok(VendorFormat::Csv),
            _ => Err(PlannerError::UnsupportedFormat {
                path: path.to_string(),
            }),
        }
    }
}

/// A vendor row as it appears on disk, before validation.
#[derive(Debug, Deserialize)]
struct RawVendorRecord {
    name: Option<String>,
    service: Option<String>,
    location: Option<String>,
    price: Option<i64>,
    rating: Option<f64>,
}

impl RawVendorRecord {
    fn into_vendor(self, index: usize) -> Result<Vendor> {
        let invalid = |reason: String| PlannerError::InvalidVendorRecord { index, reason };

        let name = required_text(self.name, "name").map_err(invalid)?;
        let service = required_text(self.service, "service").map_err(invalid)?;
        let location = required_text(self.location, "location").map_err(invalid)?;

        let price = self
            .price
            .ok_or_else(|| invalid("missing field `price`".to_string()))?;
        let price = u64::try_from(price)
            .map_err(|_| invalid(format!("price must not be negative, got {}", price)))?;

        let rating = self
            .rating
            .ok_or_else(|| invalid("missing field `rating`".to_string()))?;
        if !rating.is_finite() || rating < 0.0 {
            return Err(invalid(format!(
                "rating must be a non-negative number, got {}",
                rating
            )));
        }

        Ok(Vendor {
            name,
            service,
            location,
            price,
            rating,
        })
    }
}

fn required_text(value: Option<String>, field: &str) -> std::result::Result<String, String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        Some(_) => Err(format!("field `{}` is blank", field)),
        None => Err(format!("missing field `{}`", field)),
    }
}

/// Parses and validates vendor records. Record indexes in errors are 1-based.
pub fn parse_vendors(data: &[u8], format: VendorFormat) -> Result<Vec<Vendor>> {
    match format {
        VendorFormat::Json => parse_json(data),
        VendorFormat::Csv => parse_csv(data),
    }
}

fn parse_json(data: &[u8]) -> Result<Vec<Vendor>> {
    let rows: Vec<serde_json::Value> = serde_json::from_slice(data)?;

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let raw: RawVendorRecord =
                serde_json::from_value(row).map_err(|e| PlannerError::InvalidVendorRecord {
                    index: i + 1,
                    reason: e.to_string(),
                })?;
            raw.into_vendor(i + 1)
        })
        .collect()
}

fn parse_csv(data: &[u8]) -> Result<Vec<Vendor>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut vendors = Vec::new();
    for (i, row) in reader.deserialize::<RawVendorRecord>().enumerate() {
        let raw = row.map_err(|e| PlannerError::InvalidVendorRecord {
            index: i + 1,
            reason: e.to_string(),
        })?;
        vendors.push(raw.into_vendor(i + 1)?);
    }
    Ok(vendors)
}

/// Reads `path` through `storage` and parses it according to its extension.
pub async fn load_vendors<S: Storage>(storage: &S, path: &str) -> Result<Vec<Vendor>> {
    let format = VendorFormat::from_path(path)?;
    let data = storage.read_file(path).await?;
    let vendors = parse_vendors(&data, format)?;

    tracing::debug!("Loaded {} vendors from {} ({:?})", vendors.len(), path, format);
    Ok(vendors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_records() {
        let json = br#"[
            {"name": "Grand Hall", "service": "Venue", "location": "Hyderabad", "price": 50000, "rating": 4.5},
            {"name": "Royal Feast", "service": "Catering", "location": "Hyderabad", "price": 40000, "rating": 4.8}
        ]"#;

        let vendors = parse_vendors(json, VendorFormat::Json).unwrap();
        assert_eq!(vendors.len(), 2);
        assert_eq!(vendors[0].name, "Grand Hall");
        assert_eq!(vendors[1].price, 40_000);
    }

    #[test]
    fn test_parse_csv_records() {
        let csv = "name,service,location,price,rating\n\
                   Grand Hall, Venue ,Hyderabad,50000,4.5\n\
                   Lens Art,Photography,Pune,25000,4.9\n";

        let vendors = parse_vendors(csv.as_bytes(), VendorFormat::Csv).unwrap();
        assert_eq!(vendors.len(), 2);
        assert_eq!(vendors[0].service, "Venue");
        assert!((vendors[1].rating - 4.9).abs() < 1e-9);
    }

    #[test]
    fn test_missing_field_names_record() {
        let json = br#"[
            {"name": "A", "service": "Venue", "location": "Pune", "price": 1, "rating": 4.0},
            {"name": "B", "service": "Venue", "location": "Pune", "price": 1}
        ]"#;

        let err = parse_vendors(json, VendorFormat::Json).unwrap_err();
        match err {
            PlannerError::InvalidVendorRecord { index, reason } => {
                assert_eq!(index, 2);
                assert!(reason.contains("rating"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_negative_price_rejected() {
        let csv = "name,service,location,price,rating\nA,Venue,Pune,-5,4.0\n";
        let err = parse_vendors(csv.as_bytes(), VendorFormat::Csv).unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_blank_service_rejected() {
        let csv = "name,service,location,price,rating\nA,   ,Pune,5,4.0\n";
        let err = parse_vendors(csv.as_bytes(), VendorFormat::Csv).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidVendorRecord { index: 1, .. }));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(VendorFormat::from_path("mock_data.json").unwrap(), VendorFormat::Json);
        assert_eq!(VendorFormat::from_path("data/Vendors.CSV").unwrap(), VendorFormat::Csv);
        assert!(matches!(
            VendorFormat::from_path("vendors.xlsx"),
            Err(PlannerError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_load_vendors_rejects_unknown_extension_before_reading() {
        let storage = crate::adapters::LocalStorage::new("/nonexistent");
        let result = tokio_test::block_on(load_vendors(&storage, "vendors.yaml"));
        assert!(matches!(result, Err(PlannerError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_json_must_be_array() {
        let err = parse_vendors(br#"{"name": "A"}"#, VendorFormat::Json).unwrap_err();
        assert!(matches!(err, PlannerError::SerializationError(_)));
    }
}
