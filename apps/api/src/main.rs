mod bulk_edit;
mod config;
mod errors;
mod export;
mod extract;
mod models;
mod parser;
mod response;
mod resumes;
mod routes;
mod state;
mod suggestions;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestions::enhancer::RuleBasedEnhancer;
use crate::suggestions::store::{InMemorySuggestionStore, RedisSuggestionStore, SuggestionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Suggestion batches: Redis when configured, in-process otherwise
    let suggestions: Arc<dyn SuggestionStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str()).context("Invalid REDIS_URL")?;
            info!("Suggestion store: Redis");
            Arc::new(RedisSuggestionStore::new(client, config.suggestion_ttl()))
        }
        None => {
            info!("Suggestion store: in-memory");
            Arc::new(InMemorySuggestionStore::new(config.suggestion_ttl()))
        }
    };

    let state = AppState {
        config: config.clone(),
        enhancer: Arc::new(RuleBasedEnhancer),
        suggestions,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
