// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::RequestBuilder;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, ClientConfig};

/// Create a configured asynchronous HTTP client.
///
/// Every request carries a bounded timeout so a dead endpoint can never
/// leave the UI in a permanent loading state.
pub fn create_async_client(config: &ClientConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Attach the Authorization header when a token is configured.
///
/// The backend historically accepted both `Bearer <token>` and the raw
/// token; this client sends `Bearer` everywhere.
pub fn authorize(request: RequestBuilder, api: &ApiConfig) -> RequestBuilder {
    match &api.token {
        Some(token) => request.header("Authorization", format!("Bearer {token}")),
        None => request,
    }
}

/// Send a request and deserialize the JSON body, mapping non-2xx HTTP
/// statuses to [`AppError::Api`] with the raw body as the message.
pub async fn send_json<T: serde::de::DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(AppError::api(status.as_u16(), message));
    }
    Ok(response.json().await?)
}
