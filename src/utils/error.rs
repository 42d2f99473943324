use thiserror::Error;

#[derive(Error, Debug)]
pub enum SigmoidError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("{resource} '{id}' not found")]
    NotFound { resource: String, id: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API responded with {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl SigmoidError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    /// 呼叫端輸入造成的錯誤 (不需重試)
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidArgument { .. } | Self::NotFound { .. } => true,
            Self::ApiError { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArgument { message } => message.clone(),
            Self::NotFound { .. } => "Parameters not found".to_string(),
            Self::HttpError(_) => format!("Could not reach the sigmoid API: {}", self),
            Self::ApiError { message, .. } => message.clone(),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SigmoidError>;
