// src/models/mod.rs

//! Domain models for the client application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod artwork;
mod banner;
mod config;
mod envelope;
mod listing;

// Re-export all public types
pub use artwork::{Artwork, SoldStatus};
pub use banner::{BannerDraft, Placement};
pub use config::{
    AlgoliaConfig, ApiConfig, CategoryDescriptor, CategoryKind, ClientConfig, Config,
    GraphqlConfig,
};
pub use envelope::{ApiEnvelope, ListPayload, PaginationMeta};
pub use listing::{ListingItem, ListingKind, Location, RawListing, RawPartner, PLACEHOLDER_IMAGE};
