use std::sync::Arc;

use module_recommender::{
    api::{create_router, AppState},
    config::Config,
    services::{CsvFile, IndexSettings, RecommenderService},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // The corpus must be indexed before the listener accepts traffic
    let recommender = RecommenderService::new(IndexSettings::from(&config), config.reason_seed);
    if let Err(e) = recommender
        .load_corpus(Arc::new(CsvFile::new(&config.csv_path)))
        .await
    {
        tracing::error!(error = %e, path = %config.csv_path, "Failed to initialize recommendation service");
        return Err(e.into());
    }

    let app = create_router(AppState::new(recommender));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "Recommendation API ready");
    axum::serve(listener, app).await?;

    Ok(())
}
