use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Publish failed with status {status}: {body}")]
    PublishError { status: u16, body: String },
}

impl BotError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            BotError::MissingConfigError { field } => {
                format!("Missing required configuration: {}", field)
            }
            BotError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem with {}: {}", field, reason)
            }
            BotError::ValidationError { message } => {
                format!("Configuration problem: {}", message)
            }
            BotError::ApiError(e) => format!("Network request failed: {}", e),
            BotError::PublishError { status, .. } => {
                format!("The publish API rejected the post (HTTP {})", status)
            }
            BotError::IoError(e) => format!("File operation failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BotError::MissingConfigError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::ValidationError { .. } => {
                "Check the CLI flags and the .env file (FB_PAGE_ID, FB_ACCESS_TOKEN)"
            }
            BotError::ApiError(_) => "Check network connectivity and the source URL",
            BotError::PublishError { .. } => "Verify the page id and access token are still valid",
            BotError::IoError(_) => "Check that the state directory exists and is writable",
            _ => "Re-run with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
