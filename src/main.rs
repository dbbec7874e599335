mod chat;
mod config;
mod gemini;
mod generation;
mod model;
mod prompt;
mod session;
mod terminal;
mod utils;
mod view;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::load()?;
    info!("Loaded config: {:?}", config);

    let service = Arc::new(gemini::GeminiClient::new(&config.api_key, &config.base_url));
    let client = generation::GenerationClient::new(service, config.models.clone());

    terminal::App::new(client, &config).run().await
}
