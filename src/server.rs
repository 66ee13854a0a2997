pub mod errors;
pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use color_eyre::eyre::{Context, Result};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::pki::{CaDirectory, CrlPublisher, Pki};
use crate::storage::BlobStore;
use handlers::{certificates, crls, health::health_check, objects};

#[derive(Debug, Clone)]
pub struct ServerConfig<'a> {
    pub host: &'a str,
    pub port: u16,
}

#[derive(Clone)]
pub struct AppState {
    pub pki: Arc<Pki>,
    pub store: Arc<dyn BlobStore>,
    pub authorities: CaDirectory,
    pub publisher: CrlPublisher,
}

impl AppState {
    pub fn new(pki: Pki, store: Arc<dyn BlobStore>, ca_prefix: &str) -> Self {
        let pki = Arc::new(pki);
        let authorities = CaDirectory::new(store.clone(), ca_prefix);
        let publisher = CrlPublisher::new(pki.clone(), store.clone(), authorities.clone());
        Self {
            pki,
            store,
            authorities,
            publisher,
        }
    }
}

/// Builds the application router with tracing and CORS layers.
pub fn router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &'_ axum::extract::Request<_>| {
            let uri = request.uri().to_string();
            tracing::info_span!("request", method = %request.method(), uri)
        });

    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/certificates/inspect",
            post(certificates::inspect_certificate),
        )
        .route(
            "/api/certificates",
            get(certificates::list_certificates).post(certificates::register_certificate),
        )
        .route("/api/certificates/{*key}", get(certificates::get_certificate))
        .route("/api/crls/inspect", post(crls::inspect_crl))
        .route("/api/crls", post(crls::publish_crl))
        .route("/api/crls/{*key}", get(crls::get_crl))
        .route("/objects/{*key}", get(objects::get_object))
        .layer(cors_layer)
        .layer(trace_layer)
        .with_state(state)
}

pub struct Server {
    router: Router,
    listener: TcpListener,
}

impl Server {
    /// Binds the listener; port 0 picks a free port.
    pub async fn new(state: AppState, config: ServerConfig<'_>) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Binding TCP listener on {addr}"))?;
        Ok(Self {
            router: router(state),
            listener,
        })
    }

    pub fn port(&self) -> Result<u16> {
        Ok(self
            .listener
            .local_addr()
            .context("Getting local address")?
            .port())
    }

    pub async fn run(self) -> Result<()> {
        tracing::info!("Server listening on {}", self.listener.local_addr()?);
        axum::serve(self.listener, self.router)
            .await
            .context("Running server")
    }
}
