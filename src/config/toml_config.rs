use crate::adapters::VendorFormat;
use crate::core::planner::PlanRequest;
use crate::core::selector::SelectionLimits;
use crate::core::ConfigProvider;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub planner: PlannerConfig,
    pub data: DataConfig,
    pub request: RequestConfig,
    pub selection: Option<SelectionConfig>,
    pub output: Option<OutputConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub vendor_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    pub event_type: Option<String>,
    pub location: Option<String>,
    pub budget: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub max_categories: Option<usize>,
    pub max_candidates: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    /// "compact" (default) or "json"
    pub log_format: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${VENDOR_FILE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 檢查路徑中是否還有未設定的 ${VAR}
    fn require_resolved(field: &str, value: &str) -> Result<()> {
        match env_var_pattern().captures(value) {
            Some(caps) => Err(PlannerError::MissingConfigError {
                field: format!("{} (environment variable {} is not set)", field, &caps[1]),
            }),
            None => Ok(()),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("planner.name", &self.planner.name)?;
        Self::require_resolved("data.vendor_file", &self.data.vendor_file)?;
        validation::validate_path("data.vendor_file", &self.data.vendor_file)?;
        validation::validate_file_extension(
            "data.vendor_file",
            &self.data.vendor_file,
            &VendorFormat::EXTENSIONS,
        )?;

        if let Some(selection) = &self.selection {
            if let Some(max) = selection.max_categories {
                validation::validate_positive_number("selection.max_categories", max, 1)?;
            }
            if let Some(max) = selection.max_candidates {
                validation::validate_positive_number("selection.max_candidates", max, 1)?;
            }
        }

        if let Some(output) = &self.output {
            Self::require_resolved("output.path", &output.path)?;
            validation::validate_path("output.path", &output.path)?;
        }

        if let Some(format) = self.log_format() {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format) {
                return Err(PlannerError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }

    pub fn log_format(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_format.as_deref())
    }

    pub fn event_type(&self) -> &str {
        self.request.event_type.as_deref().unwrap_or("Wedding")
    }
}

impl ConfigProvider for TomlConfig {
    fn vendor_file(&self) -> &str {
        &self.data.vendor_file
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.path.as_str())
    }

    fn plan_request(&self) -> PlanRequest {
        PlanRequest {
            event_type: self.event_type().to_string().into(),
            location: self.request.location.clone().unwrap_or_default(),
            budget: self.request.budget,
        }
    }

    fn selection_limits(&self) -> SelectionLimits {
        let defaults = SelectionLimits::default();
        match &self.selection {
            Some(selection) => SelectionLimits {
                max_categories: selection.max_categories.unwrap_or(defaults.max_categories),
                max_candidates: selection.max_candidates.unwrap_or(defaults.max_candidates),
            },
            None => defaults,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::planning::EventType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[planner]
name = "hyderabad-weddings"

[data]
vendor_file = "mock_data.json"

[request]
event_type = "birthday"
location = "Hyderabad"
budget = 150000

[selection]
max_categories = 8

[output]
path = "./plans"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.planner.name, "hyderabad-weddings");
        assert_eq!(config.vendor_file(), "mock_data.json");
        assert_eq!(config.output_path(), Some("./plans"));

        let request = config.plan_request();
        assert_eq!(request.event_type, EventType::Birthday);
        assert_eq!(request.budget, 150_000);

        let limits = config.selection_limits();
        assert_eq!(limits.max_categories, 8);
        assert_eq!(limits.max_candidates, SelectionLimits::DEFAULT_MAX_CANDIDATES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let toml_content = r#"
[planner]
name = "minimal"

[data]
vendor_file = "vendors.csv"

[request]
budget = 50000
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let request = config.plan_request();
        assert_eq!(request.event_type, EventType::Wedding);
        assert_eq!(request.location, "");
        assert_eq!(config.output_path(), None);
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VENDOR_PLANNER_TEST_FILE", "from-env.json");

        let toml_content = r#"
[planner]
name = "env"

[data]
vendor_file = "${VENDOR_PLANNER_TEST_FILE}"

[request]
budget = 1000
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data.vendor_file, "from-env.json");

        std::env::remove_var("VENDOR_PLANNER_TEST_FILE");
    }

    #[test]
    fn test_unset_env_var_is_missing_config() {
        let toml_content = r#"
[planner]
name = "env"

[data]
vendor_file = "${VENDOR_PLANNER_NEVER_SET}"

[request]
budget = 1000
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data.vendor_file, "${VENDOR_PLANNER_NEVER_SET}");

        let err = config.validate().unwrap_err();
        match &err {
            PlannerError::MissingConfigError { field } => {
                assert!(field.starts_with("data.vendor_file"));
                assert!(field.contains("VENDOR_PLANNER_NEVER_SET"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[planner]
name = "bad"

[data]
vendor_file = "vendors.xml"

[request]
budget = 1000

[monitoring]
enabled = true
log_format = "pretty"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[planner\nname=").unwrap_err();
        assert!(matches!(err, PlannerError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[planner]
name = "file-test"

[data]
vendor_file = "mock_data.json"

[request]
budget = 90000

[monitoring]
enabled = true
log_level = "debug"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.planner.name, "file-test");
        assert!(config.monitoring_enabled());
        assert_eq!(config.log_level(), Some("debug"));
    }
}
