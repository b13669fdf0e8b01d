//! Oncoprobe server entry point.
//!
//! Run with: cargo run -p oncoprobe-web

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so ONCOPROBE_* vars are visible to config loading
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = oncoprobe_web::config::Config::load()?;
    let state = Arc::new(oncoprobe_web::state::AppState::from_config(&config)?);
    let app = oncoprobe_web::router::build_router(state, &config.server.cors_origin);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Oncoprobe listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
