// src/proxy/mod.rs

//! Credential-hiding search proxy.
//!
//! Two single-purpose forwarding routes keep upstream credentials out of
//! the browser:
//! - `POST /api/algolia`: body forwarded verbatim to the Algolia query
//!   endpoint with the application id and API key attached; upstream
//!   status and body are passed back unchanged, non-200 included.
//! - `POST /api/artwork`: `{query, variables}` forwarded to the
//!   metaphysics GraphQL endpoint.
//!
//! No transformation, no caching, no rate limiting.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::models::{AlgoliaConfig, GraphqlConfig};

/// Shared state of the proxy routes.
#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    algolia: AlgoliaConfig,
    graphql: GraphqlConfig,
}

impl ProxyState {
    pub fn new(client: reqwest::Client, algolia: AlgoliaConfig, graphql: GraphqlConfig) -> Self {
        Self {
            client,
            algolia,
            graphql,
        }
    }
}

/// Build the proxy router.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/algolia", post(algolia_query))
        .route("/api/artwork", post(artwork_query))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Forward a search payload to Algolia, untouched.
async fn algolia_query(State(state): State<ProxyState>, body: Bytes) -> Response {
    info!(bytes = body.len(), "forwarding search query to Algolia");
    let upstream = state
        .client
        .post(state.algolia.query_url())
        .header("x-algolia-application-id", &state.algolia.app_id)
        .header("x-algolia-api-key", &state.algolia.api_key)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.to_vec())
        .send()
        .await;
    pass_through(upstream).await
}

/// GraphQL request body for the artwork route.
#[derive(Debug, Deserialize, Serialize)]
pub struct GraphqlRequest {
    pub query: String,

    #[serde(default)]
    pub variables: serde_json::Value,
}

/// Forward an artwork GraphQL request to the metaphysics endpoint.
async fn artwork_query(
    State(state): State<ProxyState>,
    Json(payload): Json<GraphqlRequest>,
) -> Response {
    info!("forwarding artwork query to metaphysics");
    let upstream = state
        .client
        .post(&state.graphql.endpoint)
        .json(&payload)
        .send()
        .await;
    pass_through(upstream).await
}

/// Relay the upstream response verbatim: same status, same content type,
/// same body.
///
/// Only a transport-level failure (upstream unreachable, timed out)
/// produces a proxy-generated response, as 502 with a message body.
async fn pass_through(upstream: reqwest::Result<reqwest::Response>) -> Response {
    let response = match upstream {
        Ok(response) => response,
        Err(error) => return upstream_failure(&error),
    };

    let status = StatusCode::from_u16(response.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/json")
        .to_string();
    match response.bytes().await {
        Ok(body) => (status, [(header::CONTENT_TYPE, content_type)], body).into_response(),
        Err(error) => upstream_failure(&error),
    }
}

fn upstream_failure(error: &reqwest::Error) -> Response {
    warn!("upstream request failed: {error}");
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "message": error.to_string() })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    fn upstream(builder: axum::http::response::Builder, body: &str) -> reqwest::Response {
        reqwest::Response::from(builder.body(body.to_string()).unwrap())
    }

    #[tokio::test]
    async fn pass_through_relays_status_content_type_and_body() {
        let response = upstream(
            axum::http::Response::builder()
                .status(429)
                .header(header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            "rate limited",
        );

        let relayed = pass_through(Ok(response)).await;
        assert_eq!(relayed.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            relayed.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let body = to_bytes(relayed.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"rate limited");
    }

    #[tokio::test]
    async fn pass_through_defaults_content_type_to_json() {
        let response = upstream(axum::http::Response::builder().status(200), "{\"hits\":[]}");

        let relayed = pass_through(Ok(response)).await;
        assert_eq!(relayed.status(), StatusCode::OK);
        assert_eq!(relayed.headers()[header::CONTENT_TYPE], "application/json");
    }
}
