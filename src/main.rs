use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movierec_api::api::{create_router, AppState};
use movierec_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movierec_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let addr = config.socket_addr()?;

    // Initialize application state
    let state = AppState::from_config(&config);
    tracing::info!(movies = state.catalog.len(), "Catalog loaded");

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
