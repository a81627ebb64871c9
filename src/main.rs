use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinemood_api::{
    config::Config,
    credentials::Credentials,
    routes::{create_router, AppState},
    services::providers::{openai::OpenAiProvider, tmdb::TmdbProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let credentials = Arc::new(Credentials::from_config(&config)?);

    // Warm the key cache; a failure here is retried on first use
    if let Err(e) = credentials.get().await {
        tracing::warn!(error = %e, "API keys not available yet");
    }

    let metadata = Arc::new(TmdbProvider::new(
        credentials.clone(),
        config.tmdb_api_url.clone(),
    ));
    let llm = Arc::new(OpenAiProvider::new(
        credentials.clone(),
        config.openai_api_url.clone(),
        config.openai_model.clone(),
    ));

    let state = AppState::new(metadata, llm);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
