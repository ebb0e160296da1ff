pub mod infrastructure;
pub mod modules;
pub mod routes;
pub mod shared;

use tracing_subscriber::EnvFilter;

use infrastructure::{AppConfig, AppState};
use shared::AppResult;

/// Start the HTTP server and run until Ctrl-C
pub async fn run() -> AppResult<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    tracing::info!("Empathic chat starting...");

    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config)?;

    if !config.static_dir.is_dir() {
        tracing::warn!(
            "Static directory {:?} not found, only the API will be served",
            config.static_dir
        );
    }

    let app = routes::build_router(state, &config.static_dir);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
