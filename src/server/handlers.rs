pub mod certificates;
pub mod crls;
pub mod health;
pub mod objects;

use crate::server::{AppState, errors::AppError};
use crate::storage::StoredObject;

/// Fetches a stored object or fails with `NotFound`.
async fn fetch_object(state: &AppState, key: &str) -> Result<StoredObject, AppError> {
    state
        .store
        .get(key)
        .await?
        .ok_or_else(|| crate::storage::StorageError::NotFound(key.to_string()).into())
}
