use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::pki::crl::CrlError;
use crate::pki::errors::PkiError;
use crate::pki::trust_store::TrustStoreError;
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Pki(#[from] PkiError),
    #[error(transparent)]
    Crl(#[from] CrlError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<TrustStoreError> for AppError {
    fn from(error: TrustStoreError) -> Self {
        match error {
            TrustStoreError::Pki(e) => AppError::Pki(e),
            TrustStoreError::Storage(e) => AppError::Storage(e),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl AppError {
    /// HTTP status and snake_case error code.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Pki(e) => pki_status(e),
            AppError::Crl(e) => match e {
                CrlError::Pki(e) => pki_status(e),
                CrlError::IssuerNotFound { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "issuer_not_found")
                }
                CrlError::SignatureInvalid { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "signature_invalid")
                }
                CrlError::StaleVersion { .. } => (StatusCode::CONFLICT, "stale_version"),
                CrlError::Storage(e) => storage_status(e),
            },
            AppError::Storage(e) => storage_status(e),
        }
    }
}

fn pki_status(error: &PkiError) -> (StatusCode, &'static str) {
    match error {
        PkiError::MalformedDer(_) => (StatusCode::BAD_REQUEST, "malformed_der"),
        PkiError::MalformedPem(_) => (StatusCode::BAD_REQUEST, "malformed_pem"),
        PkiError::UnsupportedObjectType { .. } => {
            (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_object_type")
        }
    }
}

fn storage_status(error: &StorageError) -> (StatusCode, &'static str) {
    match error {
        StorageError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        StorageError::InvalidKey(_) => (StatusCode::BAD_REQUEST, "invalid_key"),
        StorageError::Io(_) | StorageError::Serialization(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "storage_failure")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!("Service failure: {self:?}");
        } else {
            tracing::debug!("Rejected request ({code}): {self}");
        }
        let body = ErrorBody {
            error: code,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pki::crl::CrlVersion;

    #[test]
    fn test_distinct_status_codes() {
        let cases: Vec<(AppError, StatusCode, &str)> = vec![
            (
                PkiError::MalformedDer("x".into()).into(),
                StatusCode::BAD_REQUEST,
                "malformed_der",
            ),
            (
                PkiError::MalformedPem("x".into()).into(),
                StatusCode::BAD_REQUEST,
                "malformed_pem",
            ),
            (
                PkiError::UnsupportedObjectType {
                    expected: "CRL",
                    found: "certificate",
                }
                .into(),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "unsupported_object_type",
            ),
            (
                CrlError::IssuerNotFound {
                    issuer: "CN=x".into(),
                    authority_key_identifier: None,
                }
                .into(),
                StatusCode::UNPROCESSABLE_ENTITY,
                "issuer_not_found",
            ),
            (
                CrlError::StaleVersion {
                    incoming: CrlVersion {
                        crl_number: None,
                        this_update: None,
                    },
                    existing: CrlVersion {
                        crl_number: None,
                        this_update: None,
                    },
                }
                .into(),
                StatusCode::CONFLICT,
                "stale_version",
            ),
            (
                CrlError::Pki(PkiError::MalformedPem("x".into())).into(),
                StatusCode::BAD_REQUEST,
                "malformed_pem",
            ),
            (
                StorageError::NotFound("k".into()).into(),
                StatusCode::NOT_FOUND,
                "not_found",
            ),
            (
                TrustStoreError::Storage(StorageError::InvalidKey("..".into())).into(),
                StatusCode::BAD_REQUEST,
                "invalid_key",
            ),
        ];
        for (error, status, code) in cases {
            assert_eq!(error.status_and_code(), (status, code), "{error}");
        }
    }
}
