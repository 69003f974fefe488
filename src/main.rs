use tracing_subscriber::EnvFilter;

use tubefetch_lib::downloader::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tubefetch_lib::run(AppConfig::from_env()).await
}
