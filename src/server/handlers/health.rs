use axum::response::IntoResponse;

/// Liveness check; does not touch storage.
pub async fn health_check() -> impl IntoResponse {
    "healthy"
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"healthy");
    }
}
