use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported vendor file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Invalid vendor record #{index}: {reason}")]
    InvalidVendorRecord { index: usize, reason: String },

    #[error("Too many service categories: {count} (limit {max})")]
    TooManyCategories { count: usize, max: usize },

    #[error("Combination search exceeded {limit} candidates")]
    SearchLimitExceeded { limit: u64 },

    #[error("Booking rejected for '{step}': {reason}")]
    BookingError { step: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Search,
    Booking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::IoError(_) => ErrorCategory::Io,
            PlannerError::CsvError(_)
            | PlannerError::SerializationError(_)
            | PlannerError::UnsupportedFormat { .. }
            | PlannerError::InvalidVendorRecord { .. } => ErrorCategory::Data,
            PlannerError::ConfigValidationError { .. }
            | PlannerError::MissingConfigError { .. }
            | PlannerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PlannerError::TooManyCategories { .. } | PlannerError::SearchLimitExceeded { .. } => {
                ErrorCategory::Search
            }
            PlannerError::BookingError { .. } => ErrorCategory::Booking,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Booking => ErrorSeverity::Low,
            ErrorCategory::Search => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PlannerError::IoError(_) => {
                "Check that the vendor file exists and the output directory is writable".to_string()
            }
            PlannerError::CsvError(_) => {
                "Make sure the CSV has a header row: name,service,location,price,rating".to_string()
            }
            PlannerError::SerializationError(_) => {
                "Make sure the vendor file is a JSON array of vendor objects".to_string()
            }
            PlannerError::UnsupportedFormat { .. } => {
                "Use a .json or .csv vendor file".to_string()
            }
            PlannerError::InvalidVendorRecord { index, .. } => {
                format!("Fix vendor record #{} and run again", index)
            }
            PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. } => {
                "Review the configuration values and try again".to_string()
            }
            PlannerError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            PlannerError::TooManyCategories { max, .. } => format!(
                "Narrow the location filter or raise max_categories above {}",
                max
            ),
            PlannerError::SearchLimitExceeded { .. } => {
                "Narrow the location filter or raise max_candidates".to_string()
            }
            PlannerError::BookingError { .. } => {
                "Pick a vendor offering the service this step needs".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access a file: {}", self),
            ErrorCategory::Data => format!("The vendor data could not be used: {}", self),
            ErrorCategory::Configuration => format!("The configuration is not valid: {}", self),
            ErrorCategory::Search => format!("Too many vendors to compare: {}", self),
            ErrorCategory::Booking => format!("Booking failed: {}", self),
        }
    }

    /// Process exit code for the binaries; `0` means the failure is only a warning.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_errors_are_medium_severity() {
        let err = PlannerError::SearchLimitExceeded { limit: 10 };
        assert_eq!(err.category(), ErrorCategory::Search);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_record_message_names_index() {
        let err = PlannerError::InvalidVendorRecord {
            index: 3,
            reason: "missing field `rating`".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("#3"));
        assert!(err.recovery_suggestion().contains("#3"));
    }
}
