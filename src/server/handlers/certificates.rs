use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use super::fetch_object;
use crate::pki::Certificate;
use crate::pki::pem::{self, CERTIFICATE_LABEL};
use crate::server::{AppState, errors::AppError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSummary {
    pub key: String,
    pub subject: String,
    pub subject_key_identifier: Option<String>,
    pub is_ca: bool,
    pub not_after: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredCertificate {
    pub key: String,
    pub certificate: Certificate,
}

/// Decodes a posted certificate without storing it.
#[instrument(skip_all)]
pub async fn inspect_certificate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Certificate>, AppError> {
    let der = pem::der_or_pem(&body, CERTIFICATE_LABEL)?;
    Ok(Json(state.pki.build_certificate_details(&der)?))
}

pub async fn list_certificates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CertificateSummary>>, AppError> {
    let candidates = state.authorities.candidates(&state.pki).await?;
    let summaries = candidates
        .into_iter()
        .map(|candidate| CertificateSummary {
            key: candidate.storage_key,
            subject: candidate.certificate.subject.rendered,
            subject_key_identifier: candidate.certificate.subject_key_identifier,
            is_ca: candidate.certificate.is_ca,
            not_after: candidate.certificate.validity.not_after,
        })
        .collect();
    Ok(Json(summaries))
}

#[instrument(skip_all)]
pub async fn register_certificate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RegisteredCertificate>), AppError> {
    let (key, certificate) = state.authorities.register(&state.pki, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisteredCertificate { key, certificate }),
    ))
}

#[instrument(skip(state))]
pub async fn get_certificate(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Certificate>, AppError> {
    let object = fetch_object(&state, &key).await?;
    let der = pem::der_or_pem(&object.bytes, CERTIFICATE_LABEL)?;
    Ok(Json(state.pki.build_certificate_details(&der)?))
}
