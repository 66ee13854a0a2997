use thiserror::Error;

/// Errors raised at the decode boundary of a certificate or CRL.
///
/// These are fatal to a single decode call and are kept distinct so the
/// HTTP layer can map each of them to its own status code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PkiError {
    #[error("Malformed DER: {0}")]
    MalformedDer(String),

    #[error("Malformed PEM: {0}")]
    MalformedPem(String),

    #[error("Unsupported object type: expected {expected}, found {found}")]
    UnsupportedObjectType {
        expected: &'static str,
        found: &'static str,
    },
}

pub type PkiResult<T> = Result<T, PkiError>;
