use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid snapshot data: {message}")]
    SnapshotError { message: String },

    #[error("{endpoint} responded with HTTP {status}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("Prediction rejected (HTTP {status}): {detail}")]
    PredictionRejected { status: u16, detail: String },

    #[error("A prediction request is already in flight")]
    PredictionInFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Prediction,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::HttpStatus { .. } => ErrorCategory::Network,
            Self::CsvError(_) | Self::SerializationError(_) | Self::SnapshotError { .. } => {
                ErrorCategory::Data
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::PredictionRejected { .. } | Self::PredictionInFlight => {
                ErrorCategory::Prediction
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PredictionInFlight => ErrorSeverity::Low,
            Self::ApiError(_) | Self::HttpStatus { .. } | Self::PredictionRejected { .. } => {
                ErrorSeverity::Medium
            }
            Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::SnapshotError { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Message shown to the user in place of the failed widget.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_timeout() => "The medal service timed out".to_string(),
            Self::ApiError(e) if e.is_connect() => {
                "Could not connect to the medal service".to_string()
            }
            Self::ApiError(_) => "Request to the medal service failed".to_string(),
            Self::HttpStatus { endpoint, status } => {
                format!("The medal service returned HTTP {} for {}", status, endpoint)
            }
            Self::PredictionRejected { detail, .. } if !detail.trim().is_empty() => detail.clone(),
            Self::PredictionRejected { .. } => "Prediction failed".to_string(),
            Self::PredictionInFlight => "A prediction is already running".to_string(),
            Self::SnapshotError { message } => format!("Medal data is invalid: {}", message),
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Could not encode the medal data".to_string()
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => self.to_string(),
            Self::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the backend is running and --api-base is correct",
            ErrorCategory::Data => "The backend returned unexpected data; check its version",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
            ErrorCategory::Prediction => "Pick another country or year and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
