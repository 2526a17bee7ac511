use tracing::{info, warn};

use modelstore::{handlers, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    info!("[modelstore] Starting modelstore");
    info!("[modelstore] Render mode: {}", config.render_mode.as_str());
    info!(
        "[modelstore] Model list URL: {}",
        config.endpoint().models_list_url()
    );

    let state = AppState::from_config(config.clone())?;

    // Initial load; the service still starts if the backend is down.
    if let Err(e) = state.store.fetch_data().await {
        warn!("[modelstore] Initial model fetch failed, serving uninitialized state: {}", e);
    }

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("[modelstore] Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("[modelstore] Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("[modelstore] Failed to listen for shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
}
