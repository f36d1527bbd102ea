use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Provider request failed: {0}")]
    ProviderError(#[from] reqwest::Error),

    #[error("Provider returned status {status}: {body}")]
    ProviderStatusError { status: u16, body: String },

    #[error("Provider reply contained no choices")]
    EmptyReply,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, GatewayError>;
