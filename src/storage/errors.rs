use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<walkdir::Error> for StorageError {
    fn from(e: walkdir::Error) -> Self {
        StorageError::Io(e.into())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
