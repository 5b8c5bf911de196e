use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Carrier rejected the request: {message}")]
    CarrierError { message: String },

    #[error("Cache store error: {message}")]
    CacheError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl RateError {
    pub fn cache(message: impl Into<String>) -> Self {
        RateError::CacheError {
            message: message.into(),
        }
    }

    pub fn carrier(message: impl Into<String>) -> Self {
        RateError::CarrierError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RateError>;

/// Why no rate could be produced for a shipment.
///
/// Every variant leads the caller to the same reaction (fall back to the base
/// price and mark the method unavailable); the reason only feeds logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    #[error("shipment weight is zero")]
    ZeroWeight,

    #[error("package calculation declined the shipment")]
    PackagesDeclined,

    #[error("rate request could not be built: {0}")]
    InvalidRequest(String),

    #[error("carrier quote failed: {0}")]
    Carrier(String),

    #[error("rates could not be persisted to cache: {0}")]
    CachePersist(String),

    #[error("no rate available for this order")]
    NotQuoted,
}
