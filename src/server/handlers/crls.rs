use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use super::fetch_object;
use crate::pki::crl::{Crl, PublishReceipt};
use crate::pki::pem::{self, CRL_LABEL};
use crate::server::{AppState, errors::AppError};

/// Decodes a posted CRL without storing it.
#[instrument(skip_all)]
pub async fn inspect_crl(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Crl>, AppError> {
    let der = pem::der_or_pem(&body, CRL_LABEL)?;
    Ok(Json(state.pki.build_crl_details(&der)?))
}

#[instrument(skip_all)]
pub async fn publish_crl(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<PublishReceipt>), AppError> {
    let receipt = state.publisher.publish(&body).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[instrument(skip(state))]
pub async fn get_crl(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Crl>, AppError> {
    let object = fetch_object(&state, &key).await?;
    let der = pem::der_or_pem(&object.bytes, CRL_LABEL)?;
    Ok(Json(state.pki.build_crl_details(&der)?))
}
