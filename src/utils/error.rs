use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP transport failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("HTTP request to {url} failed with status {status}")]
    HttpStatusError { status: u16, url: String },

    #[error("Response body is not valid JSON: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Unexpected payload shape: {message}")]
    ShapeError { message: String },

    #[error("Incompatible types in column '{column}': {message}")]
    SchemaError { column: String, message: String },

    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a failed run.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::TransportError(_) | EtlError::HttpStatusError { .. } => ErrorCategory::Network,
            EtlError::DecodeError(_)
            | EtlError::ShapeError { .. }
            | EtlError::SchemaError { .. }
            | EtlError::ArrowError(_)
            | EtlError::ParquetError(_) => ErrorCategory::Data,
            EtlError::IoError(_) => ErrorCategory::Storage,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::TransportError(_) => {
                "Check network connectivity and that the API host is reachable"
            }
            EtlError::HttpStatusError { status, .. } if *status >= 500 => {
                "The API is failing on its side; run again later"
            }
            EtlError::HttpStatusError { .. } => "Check that the API endpoint URL is correct",
            EtlError::DecodeError(_) | EtlError::ShapeError { .. } => {
                "The API response format may have changed; inspect the raw payload"
            }
            EtlError::SchemaError { .. } | EtlError::ArrowError(_) | EtlError::ParquetError(_) => {
                "A column mixes incompatible value types; inspect the source records"
            }
            EtlError::IoError(_) => "Check that the output path is writable and the disk has space",
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::TransportError(_) => "Could not reach the data API".to_string(),
            EtlError::HttpStatusError { status, .. } => {
                format!("The data API answered with HTTP {}", status)
            }
            EtlError::DecodeError(_) => "The data API did not return valid JSON".to_string(),
            EtlError::ShapeError { message } => format!("Unexpected data layout: {}", message),
            EtlError::SchemaError { column, .. } => {
                format!("Column '{}' cannot be stored in a single type", column)
            }
            EtlError::ArrowError(_) | EtlError::ParquetError(_) => {
                "Failed to encode the table as Parquet".to_string()
            }
            EtlError::IoError(e) => format!("Failed to write output: {}", e),
            EtlError::ConfigError { message } => format!("Invalid configuration: {}", message),
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid '{}': {}", field, reason)
            }
        }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        EtlError::ShapeError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
