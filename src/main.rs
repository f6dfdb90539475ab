use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio_util::sync::CancellationToken;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;
mod state;

use config::AppConfig;
use services::refresher::{RefreshJob, RefreshOutcome};
use services::upstream::SofaScoreClient;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let addr = config.socket_addr()?;
    let client = Arc::new(SofaScoreClient::new(&config.upstream)?);
    let app_state = AppState::new(config, client);

    tracing::info!(
        "🔧 Tracking {} tournaments with {:?} categorization",
        app_state.config.tournaments.len(),
        app_state.config.policy
    );

    let refresher = Arc::new(RefreshJob::new(
        Arc::clone(&app_state.aggregator),
        Arc::clone(&app_state.cache),
        app_state.config.tournaments.clone(),
        app_state.config.refresh,
    ));

    // Serve nothing until the cache holds a full first pass.
    if let RefreshOutcome::Completed { generation, matches } = refresher.refresh_once().await {
        tracing::info!("✅ Cache warmed: generation {}, {} matches", generation, matches);
    }

    let shutdown = CancellationToken::new();
    let refresh_task = Arc::clone(&refresher).spawn(shutdown.clone());

    let app = routes::build_router(app_state);
    let served = start_server(addr, app, shutdown.clone()).await;

    shutdown.cancel();
    refresh_task.await?;
    served?;

    tracing::info!("👋 Shutdown complete");
    Ok(())
}

async fn start_server(addr: SocketAddr, app: Router, shutdown: CancellationToken) -> errors::Result<()> {
    tracing::info!("🚀 Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind to {}: {}", addr, e);
        e
    })?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
                // Without a signal handler, only an explicit cancel stops the server.
                shutdown.cancelled().await;
            }
            tracing::info!("🛑 Shutdown requested");
        }
        _ = shutdown.cancelled() => {}
    }
}
