use anyhow::Context;
use tracing_subscriber::EnvFilter;

use servicehub_api::{app, auth::SessionKeys, config::AppConfig, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("servicehub_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Starting ServiceHub API in {:?} mode", config.environment);
    if config.build_phase {
        tracing::info!("Build phase flag set, admin bookings will answer empty");
    }

    let store = database::connect(&config.database)
        .await
        .context("failed to open datastore")?;
    let keys = SessionKeys::new(&config.security).context("failed to load session keys")?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::new(store, config, keys);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("ServiceHub API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
