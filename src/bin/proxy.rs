//! Atelier search proxy server.
//!
//! Serves the credential-hiding forwarding routes. Upstream credentials
//! come from the config file or the `ALGOLIA_*` environment variables
//! and never reach the browser.

use std::path::PathBuf;

use atelier_client::error::{AppError, Result};
use atelier_client::models::Config;
use atelier_client::proxy::{router, ProxyState};
use atelier_client::utils::http;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path =
        PathBuf::from(std::env::var("PROXY_CONFIG").unwrap_or_else(|_| "config.toml".to_string()));
    let mut config = Config::load_or_default(&config_path);
    config.apply_env();

    if config.algolia.app_id.trim().is_empty() || config.algolia.api_key.trim().is_empty() {
        return Err(AppError::config(
            "algolia.app_id and algolia.api_key must be set (config file or ALGOLIA_* env)",
        ));
    }

    let client = http::create_async_client(&config.client)?;
    let state = ProxyState::new(client, config.algolia.clone(), config.graphql.clone());

    let addr = std::env::var("PROXY_ADDR").unwrap_or_else(|_| "127.0.0.1:4000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("search proxy listening on {addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
