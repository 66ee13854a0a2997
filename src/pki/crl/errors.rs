use thiserror::Error;

use super::types::CrlVersion;
use crate::pki::errors::PkiError;
use crate::storage::StorageError;

/// Rejections and failures of the CRL upload workflow.
#[derive(Error, Debug)]
pub enum CrlError {
    #[error(transparent)]
    Pki(#[from] PkiError),

    #[error(
        "No stored CA certificate issued the CRL from {issuer} (authority key identifier: {})",
        authority_key_identifier.as_deref().unwrap_or("none")
    )]
    IssuerNotFound {
        issuer: String,
        authority_key_identifier: Option<String>,
    },

    #[error("CRL signature from {issuer} does not verify against the key of {candidate_key}")]
    SignatureInvalid { issuer: String, candidate_key: String },

    #[error("Incoming CRL ({incoming}) is not newer than the stored one ({existing})")]
    StaleVersion {
        incoming: CrlVersion,
        existing: CrlVersion,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type CrlResult<T> = Result<T, CrlError>;
