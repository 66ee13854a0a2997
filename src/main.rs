use pki_depot::{
    config::Config,
    pki::Pki,
    server::{AppState, Server, ServerConfig},
    telemetry,
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Ok(path) = dotenvy::dotenv() {
        println!("Loaded environment from {}", path.display());
    }
    telemetry::init_tracing();

    // Load configuration
    let config = Config::load()?;
    tracing::info!("Loaded configuration: {:?}", config);

    let store = config.storage.open();
    tracing::info!(
        "Using {:?} storage, CA certificates under '{}'",
        config.storage.backend,
        config.storage.ca_prefix
    );
    let state = AppState::new(Pki::default(), store, &config.storage.ca_prefix);

    let server_config = ServerConfig {
        host: &config.server.host,
        port: config.server.port,
    };
    let server = Server::new(state, server_config).await?;
    server.run().await
}
