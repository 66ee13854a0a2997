use axum::{
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::pki::crl::{CRL_CONTENT_TYPE, PEM_CONTENT_TYPE};
use crate::pki::trust_store::CERTIFICATE_CONTENT_TYPE;
use crate::storage::StoredObject;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Raw bytes of a stored object, typed by its key suffix.
pub struct ObjectResponse(pub StoredObject);

pub fn content_type_for(key: &str) -> &'static str {
    if key.ends_with(".pem") {
        PEM_CONTENT_TYPE
    } else if key.ends_with(".crl") {
        CRL_CONTENT_TYPE
    } else if key.ends_with(".der") || key.ends_with(".cer") || key.ends_with(".crt") {
        CERTIFICATE_CONTENT_TYPE
    } else {
        FALLBACK_CONTENT_TYPE
    }
}

impl IntoResponse for ObjectResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(CONTENT_TYPE, content_type_for(&self.0.key))],
            self.0.bytes,
        )
            .into_response()
    }
}
