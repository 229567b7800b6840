use subway_server::config::ServerConfig;
use subway_server::store::{SnapshotFile, SubwayStore};
use subway_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "subway_server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let store = match &config.snapshot_path {
        Some(path) => SubwayStore::open(SnapshotFile::new(path))?,
        None => {
            warn!("SUBWAY_SNAPSHOT_PATH not set; data will be lost on exit");
            SubwayStore::in_memory()
        }
    };

    let app = create_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "subway line server listening");
    info!("  GET    /health");
    info!("  GET    /stations, POST /stations, DELETE /stations/:id");
    info!("  GET    /lines, POST /lines");
    info!("  GET    /lines/:id, PUT /lines/:id, DELETE /lines/:id");
    info!("  GET    /lines/:id/sections, POST /lines/:id/sections");
    info!("  DELETE /lines/:id/sections?stationId=N");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
