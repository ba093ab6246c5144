//! Sentinel Gateway - Application Entry Point
//!
//! This is the main entry point for the gateway server.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sentinel_gateway::{
    config::{Config, LogFormat},
    create_router,
    engine::EngineInvoker,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    let json_logs = config.server.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.rust_log.clone().into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Starting Sentinel Gateway...");
    tracing::info!(
        engine = %config.engine.binary.display(),
        timeout_secs = config.engine.timeout.as_secs(),
        max_code_bytes = config.engine.max_code_bytes,
        workspace_dir = %config.engine.workspace_dir.display(),
        "Engine configuration loaded"
    );

    // The gateway still starts without the engine; /run reports it per request.
    if !EngineInvoker::from_config(&config.engine).is_available().await {
        tracing::warn!(
            "Sentinel binary not found at {}",
            config.engine.binary.display()
        );
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create application state
    let state = AppState::new(config);

    // Build the router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start the server
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
