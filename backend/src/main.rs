//! Course Directory Backend
//!
//! A REST API serving course enrollment data from a JSON file.

use course_directory_backend::{
    config::Config,
    server,
    state::{AppState, JsonFileStore},
};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_directory_backend=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    let store = JsonFileStore::new(config.persistence.db_path.clone());
    if !store.path().exists() {
        warn!(
            "Course file {} does not exist; requests will fail until it is created",
            store.path().display()
        );
    }

    let app = server::build_app(AppState::new(store).shared());

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        "Server is running on http://localhost:{}",
        listener.local_addr()?.port()
    );
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
