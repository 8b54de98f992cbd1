use crate::adapters::VendorFormat;
use crate::core::planner::PlanRequest;
use crate::core::selector::SelectionLimits;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "vendor-planner")]
#[command(about = "Recommend the best-rated vendor combination for an event within a budget")]
pub struct CliConfig {
    /// Vendor data file (.json array or .csv with a header row)
    #[arg(long, default_value = "mock_data.json")]
    pub vendor_file: String,

    /// Case-insensitive part of the vendor location, e.g. "bangalore"
    #[arg(long, default_value = "")]
    pub location: String,

    #[arg(long, default_value = "100000")]
    pub budget: u64,

    /// Wedding, Birthday, Corporate or any other event name
    #[arg(long, default_value = "Wedding")]
    pub event_type: String,

    /// Directory for recommendation.json / recommendation.csv
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, default_value_t = SelectionLimits::DEFAULT_MAX_CATEGORIES)]
    pub max_categories: usize,

    #[arg(long, default_value_t = SelectionLimits::DEFAULT_MAX_CANDIDATES)]
    pub max_candidates: u64,

    #[arg(long, help = "Book every planning step covered by the recommendation")]
    pub book_selected: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log per-phase timings")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn vendor_file(&self) -> &str {
        &self.vendor_file
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn plan_request(&self) -> PlanRequest {
        PlanRequest {
            event_type: self.event_type.clone().into(),
            location: self.location.clone(),
            budget: self.budget,
        }
    }

    fn selection_limits(&self) -> SelectionLimits {
        SelectionLimits {
            max_categories: self.max_categories,
            max_candidates: self.max_candidates,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("vendor_file", &self.vendor_file)?;
        validation::validate_file_extension(
            "vendor_file",
            &self.vendor_file,
            &VendorFormat::EXTENSIONS,
        )?;
        validation::validate_non_empty_string("event_type", &self.event_type)?;
        validation::validate_positive_number("max_categories", self.max_categories, 1)?;
        validation::validate_positive_number("max_candidates", self.max_candidates, 1)?;
        if let Some(output_path) = &self.output_path {
            validation::validate_path("output_path", output_path)?;
        }
        Ok(())
    }
}
