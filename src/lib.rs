pub mod downloader;
pub mod packaging;
pub mod web;

use anyhow::Context;
use std::sync::Arc;

use downloader::AppConfig;
use web::{create_router, AppContext};

/// Serve the fetch page on `config.bind_addr` until the process is stopped.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr;
    tracing::info!(
        demo_mode = config.limits.enabled,
        ytdlp = %config.tools.ytdlp,
        ffmpeg = %config.tools.ffmpeg,
        "starting TubeFetch"
    );

    let app = create_router(Arc::new(AppContext::new(config)));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
