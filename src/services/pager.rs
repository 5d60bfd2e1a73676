// src/services/pager.rs

//! Incremental pagination.
//!
//! Two interchangeable strategies:
//! - [`SlicePager`]: explicit Next/Previous controls over a growing
//!   prefix window of the filtered list.
//! - [`ScrollLoader`]: infinite scroll, where a sentinel at the end of
//!   the rendered list triggers the next page load. A checked-and-set
//!   guard keeps at most one load in flight.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::models::{ApiConfig, ListPayload};
use crate::utils::http::{authorize, send_json};
use crate::utils::{join_endpoint, with_params};

/// Prefix-window pager: the window is `items[..current_page * items_per_page]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlicePager {
    current_page: usize,
    items_per_page: usize,
}

impl SlicePager {
    /// Create a pager starting at page 1.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// The visible prefix of the filtered list.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = (self.current_page * self.items_per_page).min(items.len());
        &items[..end]
    }

    /// `false` exactly when the next slice would be empty.
    pub fn has_more(&self, total: usize) -> bool {
        self.current_page * self.items_per_page < total
    }

    /// Grow the window by one page. Returns whether the page changed.
    pub fn advance(&mut self, total: usize) -> bool {
        if self.has_more(total) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Shrink the window by one page, never below page 1.
    pub fn retreat(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Back to page 1. Called whenever the filter inputs change.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// `ceil(total / items_per_page)`, at least 1.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.items_per_page).max(1)
    }
}

/// Re-entrancy-guarded loader for scroll-triggered pagination.
///
/// `on_sentinel_visible` is safe to call from every intersection event:
/// while a load is in flight, or once `has_more` is false, further calls
/// are ignored.
#[derive(Debug, Default)]
pub struct ScrollLoader {
    fetching: AtomicBool,
    page: AtomicUsize,
    epoch: AtomicUsize,
}

impl ScrollLoader {
    pub fn new() -> Self {
        Self {
            fetching: AtomicBool::new(false),
            page: AtomicUsize::new(1),
            epoch: AtomicUsize::new(0),
        }
    }

    /// Page of the last successful load.
    pub fn page(&self) -> usize {
        self.page.load(Ordering::Acquire).max(1)
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::Acquire)
    }

    /// Back to page 1. Called whenever the filter inputs change.
    ///
    /// Bumps the epoch so a load that was already in flight cannot
    /// advance the page counter past the reset when it completes.
    pub fn reset(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.page.store(1, Ordering::Release);
    }

    /// Handle a sentinel-visible event.
    ///
    /// Returns `None` when the event was ignored (nothing more to load,
    /// or a load already in flight), otherwise the load result for the
    /// next page. The page counter only advances on success, so a failed
    /// load is retried by the next event. The in-flight flag is cleared
    /// on both paths.
    pub async fn on_sentinel_visible<F, Fut, T>(&self, has_more: bool, load: F) -> Option<Result<T>>
    where
        F: FnOnce(usize) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !has_more {
            return None;
        }
        if self
            .fetching
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }

        let epoch = self.epoch.load(Ordering::Acquire);
        let next_page = self.page.load(Ordering::Acquire).max(1) + 1;
        let result = load(next_page).await;
        if result.is_ok() && self.epoch.load(Ordering::Acquire) == epoch {
            self.page.store(next_page, Ordering::Release);
        }
        self.fetching.store(false, Ordering::Release);
        Some(result)
    }
}

/// Fetch one page of a server-side list endpoint.
///
/// This is the load operation usually handed to
/// [`ScrollLoader::on_sentinel_visible`]; the backend takes `page`,
/// `limit` and an optional free-text `search` parameter.
pub async fn fetch_page<T: DeserializeOwned>(
    client: &reqwest::Client,
    api: &ApiConfig,
    endpoint: &str,
    page: usize,
    limit: usize,
    search: Option<&str>,
) -> Result<ListPayload<T>> {
    let url = list_page_url(&api.base_url, endpoint, page, limit, search);
    let request = authorize(client.get(url), api);
    send_json(request).await
}

/// URL for one page of a list endpoint. A blank search term is omitted.
pub fn list_page_url(
    base_url: &str,
    endpoint: &str,
    page: usize,
    limit: usize,
    search: Option<&str>,
) -> String {
    let mut params = vec![("page", page.to_string()), ("limit", limit.to_string())];
    if let Some(query) = search {
        if !query.trim().is_empty() {
            params.push(("search", query.to_string()));
        }
    }
    with_params(&join_endpoint(base_url, endpoint), &params)
}
