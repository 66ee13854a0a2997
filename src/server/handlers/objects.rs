use axum::extract::{Path, State};

use super::fetch_object;
use crate::server::{AppState, errors::AppError, responses::ObjectResponse};

pub async fn get_object(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<ObjectResponse, AppError> {
    fetch_object(&state, &key).await.map(ObjectResponse)
}
