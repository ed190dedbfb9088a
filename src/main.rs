use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod config;
mod dashboard;
mod predictor;

use config::Config;
use dashboard::AppState;
use predictor::{LogisticPipeline, WinPredictor};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    // The artifact is loaded once and shared read-only for the process lifetime.
    let model = LogisticPipeline::load(&config.model_path)
        .with_context(|| format!("loading model from {}", config.model_path.display()))?;
    let info = model.info();
    info!(
        "Model loaded: {} (trained {}) from {}",
        info.name,
        info.trained_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "unknown".into()),
        config.model_path.display()
    );

    let app = dashboard::router(AppState {
        predictor: Arc::new(model),
    });
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Predictor listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
