#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use pki_depot::{
    pki::Pki,
    server::{AppState, router},
    storage::MemoryBlobStore,
};
use serde_json::Value;
use tower::ServiceExt;

pub const CA_PREFIX: &str = "ca/";

/// Keys `rsa_ca.der` and `ec_ca.der` are registered under.
pub const ROOT_CA_KEY: &str = "ca/example-root-ca-4501bded80569959.der";
pub const EC_CA_KEY: &str = "ca/example-ec-ca-f25dbace9ff1534e.der";

pub fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data/pki")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("missing fixture {path:?}: {e}"))
}

/// Router backed by a fresh in-memory store; the store is returned for inspection.
pub fn test_app() -> (Router, MemoryBlobStore) {
    let store = MemoryBlobStore::new();
    let state = AppState::new(Pki::default(), Arc::new(store.clone()), CA_PREFIX);
    (router(state), store)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Vec<u8>,
) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Vec<u8>,
) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let json = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "body of {uri} is not JSON ({e}): {}",
            String::from_utf8_lossy(&bytes)
        )
    });
    (status, json)
}
