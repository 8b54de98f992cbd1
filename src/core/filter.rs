use crate::domain::model::Vendor;

/// Keeps vendors whose location contains `location`, ignoring case.
///
/// "bangalore" matches "Bangalore Rural". An empty filter keeps everything.
pub fn filter_by_location(vendors: &[Vendor], location: &str) -> Vec<Vendor> {
    let needle = location.trim().to_lowercase();

    let filtered: Vec<Vendor> = vendors
        .iter()
        .filter(|v| v.location.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    tracing::debug!(
        "Location filter '{}' kept {} of {} vendors",
        location,
        filtered.len(),
        vendors.len()
    );

    filtered
}
