use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Payment gateway error: {0}")]
    Gateway(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Notification error: {0}")]
    Notification(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for StorefrontError {
    fn from(e: rocksdb::Error) -> Self {
        StorefrontError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(e: serde_json::Error) -> Self {
        StorefrontError::Internal(Box::new(e))
    }
}
