// src/services/aggregate.rs

//! Listing aggregation service.
//!
//! Fans out one request per category descriptor, normalizes each
//! heterogeneous response into [`ListingItem`]s, and merges everything
//! into one flat list. A failed category contributes an empty slice and
//! never fails the batch.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, CategoryDescriptor, ListingItem, RawListing};
use crate::utils::http::{authorize, send_json};
use crate::utils::{join_endpoint, with_params};

/// Summary of one aggregation run.
#[derive(Debug, Default)]
pub struct AggregateOutcome {
    pub items: Vec<ListingItem>,
    pub category_total: usize,
    pub category_failures: usize,
}

/// Source of raw records for a single category.
///
/// The HTTP implementation is the production path; tests inject fakes.
#[async_trait]
pub trait CategoryFetch: Send + Sync {
    async fn fetch_category(&self, descriptor: &CategoryDescriptor) -> Result<Vec<RawListing>>;
}

/// Fetches category records from the backend REST API.
pub struct HttpCategoryFetch {
    client: Client,
    api: ApiConfig,
    page_size: usize,
}

impl HttpCategoryFetch {
    pub fn new(client: Client, api: ApiConfig, page_size: usize) -> Self {
        Self {
            client,
            api,
            page_size,
        }
    }
}

#[async_trait]
impl CategoryFetch for HttpCategoryFetch {
    async fn fetch_category(&self, descriptor: &CategoryDescriptor) -> Result<Vec<RawListing>> {
        let url = with_params(
            &join_endpoint(&self.api.base_url, &descriptor.endpoint),
            &[("limit", self.page_size.to_string())],
        );
        let request = authorize(self.client.get(url), &self.api);
        let body: serde_json::Value = send_json(request).await?;
        extract_records(&body, descriptor)
    }
}

/// Pull the record array out of a category response body.
///
/// Observed shapes: `{data: {galleries: [...]}}` and, on a few older
/// endpoints, the kind key at the top level.
fn extract_records(
    body: &serde_json::Value,
    descriptor: &CategoryDescriptor,
) -> Result<Vec<RawListing>> {
    let key = descriptor.kind.payload_key();
    let records = body
        .get("data")
        .and_then(|data| data.get(key))
        .or_else(|| body.get(key))
        .ok_or_else(|| {
            AppError::aggregate(&descriptor.name, format!("response has no '{key}' array"))
        })?;
    Ok(serde_json::from_value(records.clone())?)
}

/// Service fanning out over all category descriptors.
pub struct AggregationFetcher {
    fetcher: Arc<dyn CategoryFetch>,
    max_concurrent: usize,
}

impl AggregationFetcher {
    /// Create a new aggregation fetcher over the given source.
    pub fn new(fetcher: Arc<dyn CategoryFetch>, max_concurrent: usize) -> Self {
        Self {
            fetcher,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Fetch and merge all categories concurrently.
    ///
    /// Requests run with no ordering guarantee; the merged list always
    /// follows descriptor order, so the result is independent of which
    /// response arrived first.
    pub async fn fetch_all(&self, descriptors: &[CategoryDescriptor]) -> AggregateOutcome {
        let mut outcome = AggregateOutcome {
            category_total: descriptors.len(),
            ..AggregateOutcome::default()
        };

        // Completion order is arbitrary; results land in slots keyed by
        // descriptor index and are flattened afterwards.
        let mut slots: Vec<Vec<ListingItem>> = vec![Vec::new(); descriptors.len()];

        let mut category_stream = stream::iter(descriptors.iter().enumerate())
            .map(|(index, descriptor)| {
                let fetcher = Arc::clone(&self.fetcher);
                async move {
                    let result = fetcher.fetch_category(descriptor).await;
                    (index, descriptor, result)
                }
            })
            .buffer_unordered(self.max_concurrent);

        while let Some((index, descriptor, result)) = category_stream.next().await {
            match result {
                Ok(records) => {
                    slots[index] = normalize_category(descriptor, records);
                }
                Err(error) => {
                    outcome.category_failures += 1;
                    log::warn!(
                        "Failed to fetch category {} ({}): {}",
                        descriptor.name,
                        descriptor.endpoint,
                        error
                    );
                }
            }
        }

        outcome.items = slots.into_iter().flatten().collect();
        outcome
    }
}

/// Normalize one category's raw records into listing items.
fn normalize_category(
    descriptor: &CategoryDescriptor,
    records: Vec<RawListing>,
) -> Vec<ListingItem> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, raw)| {
            ListingItem::from_source(
                raw,
                &descriptor.name,
                &descriptor.slug,
                descriptor.kind.listing_kind(),
                position,
            )
        })
        .collect()
}
