//! Service layer for the client application.
//!
//! This module contains the recurring page logic extracted into reusable
//! pieces:
//! - Listing aggregation across category endpoints (`AggregationFetcher`)
//! - In-memory filtering (`filter`, `FilterState`)
//! - Incremental pagination (`SlicePager`, `ScrollLoader`)
//! - Form/CRUD plumbing (`CrudClient`)
//! - Debounce-guarded search (`AlgoliaSearchClient`)
//! - Bulk status updates (`run_bulk`)
//! - Page-level composition (`BrowseController`)

mod aggregate;
mod browse;
mod bulk;
mod crud;
mod filter;
mod pager;
mod search;

pub use aggregate::{AggregateOutcome, AggregationFetcher, CategoryFetch, HttpCategoryFetch};
pub use browse::BrowseController;
pub use bulk::{bulk_mark_available, run_bulk, BulkItemOutcome, BulkReport};
pub use crud::{
    open_draft, patch_in_place, remove_by_id, validate, ApiRequest, ApiTransport, AutoConfirm,
    Confirm, CrudClient, EntityForm, HasId, HttpTransport, LogNotifier, Notifier,
    ValidationOutcome,
};
pub use filter::{filter, FilterState, ALL_ITEMS};
pub use pager::{fetch_page, list_page_url, ScrollLoader, SlicePager};
pub use search::{AlgoliaSearchClient, SearchDispatch, SearchSequence};
