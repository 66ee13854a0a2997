use thiserror::Error;

use crate::pki::errors::PkiError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum TrustStoreError {
    #[error(transparent)]
    Pki(#[from] PkiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type TrustStoreResult<T> = Result<T, TrustStoreError>;
