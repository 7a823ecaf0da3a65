use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagadorError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order attributes are missing an orderId")]
    MissingOrderId,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PagadorError {
    fn from(err: rocksdb::Error) -> Self {
        PagadorError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PagadorError>;
