use crate::core::{ConfigProvider, ProjectionSettings};
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{validate_ceiling, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base")]
    pub base: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub leader_count: Option<usize>,
    pub table_limit: Option<usize>,
    pub chart_limit: Option<usize>,
    pub donut_ceiling: Option<f64>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base: default_api_base(),
            timeout_seconds: None,
        }
    }
}

impl DashboardConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("api.base", &self.api.base)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validate_positive_number("api.timeout_seconds", timeout as usize, 1)?;
        }

        let settings = self.projection_settings();
        validate_positive_number("projection.leader_count", settings.leader_count, 1)?;
        validate_positive_number("projection.table_limit", settings.table_limit, 1)?;
        validate_positive_number("projection.chart_limit", settings.chart_limit, 1)?;
        validate_ceiling("projection.donut_ceiling", settings.donut_ceiling)?;

        Ok(())
    }

    /// Configured values with the built-in defaults (3 / 10 / 10 / 3000) filling the gaps.
    pub fn projection_settings(&self) -> ProjectionSettings {
        let defaults = ProjectionSettings::default();
        ProjectionSettings {
            leader_count: self.projection.leader_count.unwrap_or(defaults.leader_count),
            table_limit: self.projection.table_limit.unwrap_or(defaults.table_limit),
            chart_limit: self.projection.chart_limit.unwrap_or(defaults.chart_limit),
            donut_ceiling: self.projection.donut_ceiling.unwrap_or(defaults.donut_ceiling),
        }
    }
}

impl ConfigProvider for DashboardConfig {
    fn api_base(&self) -> &str {
        &self.api.base
    }

    fn projection(&self) -> ProjectionSettings {
        self.projection_settings()
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
