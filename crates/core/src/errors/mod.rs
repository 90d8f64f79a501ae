//! Error types and Result alias for the promo farm

use thiserror::Error;

/// Main error type for the promo farm
#[derive(Error, Debug)]
pub enum Error {
    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Client token missing from login response")]
    MissingToken,

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Catalog fetch failed: {0}")]
    CatalogError(String),

    #[error("Delivery failed: {0}")]
    DeliveryError(String),

    #[error("Missing configuration: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
