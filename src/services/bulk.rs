// src/services/bulk.rs

//! Bulk status updates with per-item error isolation.
//!
//! A bulk action dispatches one request per selected item and joins them
//! all; one failed item never aborts the rest. The report keeps input
//! order, so "3rd item failed" means the 3rd item the user selected.

use std::future::Future;

use futures::future::join_all;
use reqwest::Client;

use crate::error::Result;
use crate::models::{ApiConfig, ApiEnvelope};
use crate::utils::http::{authorize, send_json};
use crate::utils::join_endpoint;

/// Outcome for one item of a bulk action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemOutcome {
    pub id: String,
    pub ok: bool,
    pub error: Option<String>,
}

/// Aggregate report of a bulk action, in input order.
#[derive(Debug, Clone, Default)]
pub struct BulkReport {
    pub outcomes: Vec<BulkItemOutcome>,
}

impl BulkReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.ok).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn all_ok(&self) -> bool {
        self.failed() == 0
    }

    /// Ids of the items that succeeded, for local list reconciliation.
    pub fn succeeded_ids(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.ok)
            .map(|o| o.id.as_str())
            .collect()
    }
}

/// Run one operation per id concurrently and collect per-item outcomes.
pub async fn run_bulk<F, Fut>(ids: Vec<String>, op: F) -> BulkReport
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let outcomes = join_all(ids.into_iter().map(|id| {
        let task = op(id.clone());
        async move {
            match task.await {
                Ok(()) => BulkItemOutcome {
                    id,
                    ok: true,
                    error: None,
                },
                Err(error) => BulkItemOutcome {
                    id,
                    ok: false,
                    error: Some(error.to_string()),
                },
            }
        }
    }))
    .await;

    BulkReport { outcomes }
}

/// Mark the selected artworks as available again.
///
/// Issues one PUT per artwork; successes disappear from the sold view on
/// the next refetch, failures stay and are reported per item.
pub async fn bulk_mark_available(client: &Client, api: &ApiConfig, ids: Vec<String>) -> BulkReport {
    run_bulk(ids, |id| {
        let url = join_endpoint(&api.base_url, &format!("/api/artworks/{id}/status"));
        let request = authorize(client.put(url), api).json(&serde_json::json!({
            "status": "available"
        }));
        async move {
            let envelope: ApiEnvelope<serde_json::Value> = send_json(request).await?;
            if envelope.is_ok() {
                Ok(())
            } else {
                Err(crate::error::AppError::api(
                    200,
                    envelope.message_or("status update rejected"),
                ))
            }
        }
    })
    .await
}
