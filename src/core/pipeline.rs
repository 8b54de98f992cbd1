use crate::adapters::vendor_file::load_vendors;
use crate::core::planner::{recommend, Recommendation};
use crate::core::{ConfigProvider, Pipeline, Storage, Vendor};
use crate::utils::error::{PlannerError, Result};
use serde::Serialize;
use std::path::Path;

pub const REPORT_JSON: &str = "recommendation.json";
pub const REPORT_CSV: &str = "recommendation.csv";

pub struct RecommendationPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> RecommendationPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[derive(Serialize)]
struct ReportRow<'a> {
    set: &'a str,
    service: &'a str,
    name: &'a str,
    location: &'a str,
    price: u64,
    rating: f64,
}

fn render_csv(recommendation: &Recommendation) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let sets = std::iter::once(("selected", &recommendation.selected))
        .chain(recommendation.closest.iter().map(|combo| ("closest", combo)));

    for (set, combo) in sets {
        for vendor in combo.vendors() {
            writer.serialize(ReportRow {
                set,
                service: &vendor.service,
                name: &vendor.name,
                location: &vendor.location,
                price: vendor.price,
                rating: vendor.rating,
            })?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| PlannerError::IoError(e.into_error()))
}

fn report_path(dir: &str, file: &str) -> String {
    Path::new(dir).join(file).to_string_lossy().into_owned()
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RecommendationPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Vendor>> {
        tracing::debug!("Reading vendor file: {}", self.config.vendor_file());
        load_vendors(&self.storage, self.config.vendor_file()).await
    }

    async fn transform(&self, vendors: Vec<Vendor>) -> Result<Recommendation> {
        let request = self.config.plan_request();
        let limits = self.config.selection_limits();
        recommend(&vendors, &request, &limits)
    }

    async fn load(&self, recommendation: &Recommendation) -> Result<Option<String>> {
        let Some(dir) = self.config.output_path() else {
            tracing::debug!("No output path configured, skipping report");
            return Ok(None);
        };

        let json_path = report_path(dir, REPORT_JSON);
        let json = serde_json::to_vec_pretty(recommendation)?;
        self.storage.write_file(&json_path, &json).await?;

        let csv_path = report_path(dir, REPORT_CSV);
        let csv = render_csv(recommendation)?;
        self.storage.write_file(&csv_path, &csv).await?;

        tracing::debug!("Report written to {} and {}", json_path, csv_path);
        Ok(Some(json_path))
    }
}
