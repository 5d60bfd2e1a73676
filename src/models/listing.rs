//! Normalized listing item produced by the aggregation fetcher.
//!
//! Category endpoints return heterogeneous shapes (galleries, museums,
//! shows); everything is mapped into [`ListingItem`] before any filtering
//! or pagination happens.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Image URL used when a source record carries none.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-gallery.jpg";

/// Kind of a normalized listing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Gallery,
    Museum,
    Show,
}

/// A physical location attached to a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub country: Option<String>,
}

/// A normalized entry in the combined listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingItem {
    /// Stable key, unique within one aggregated result set
    pub unique_id: String,

    /// Source-native id, may collide across categories
    pub native_id: String,

    /// Zero-based position within the source category response
    pub position: usize,

    /// Display name
    pub name: String,

    /// Optional work/show title
    #[serde(default)]
    pub title: Option<String>,

    /// Image URL, defaulted to [`PLACEHOLDER_IMAGE`] when absent
    pub image: String,

    /// Category label from the descriptor that produced this item
    pub category: String,

    /// Listing kind
    pub kind: ListingKind,

    /// Locations, derived from the partner name when the source has none
    #[serde(default)]
    pub locations: Vec<Location>,

    /// Comma-joined artist names, shows/artworks only
    #[serde(default)]
    pub artist_names: Option<String>,

    /// Owning partner name
    #[serde(default)]
    pub partner_name: Option<String>,

    /// Sale message, shows/artworks only
    #[serde(default)]
    pub sale_message: Option<String>,
}

impl ListingItem {
    /// Build the normalized item from a raw source record.
    ///
    /// `position` is the record's index within its category response and
    /// participates in the key so colliding native ids stay distinct.
    pub fn from_source(
        raw: RawListing,
        category: &str,
        slug: &str,
        kind: ListingKind,
        position: usize,
    ) -> Self {
        let native_id = raw.id.unwrap_or_else(|| position.to_string());
        let name = raw
            .name
            .or_else(|| raw.title.clone())
            .unwrap_or_else(|| "Untitled".to_string());

        let partner_name = raw.partner.and_then(|p| p.name);
        let locations = if raw.locations.is_empty() {
            // No location data: fall back to the partner name as a city label.
            partner_name
                .as_ref()
                .map(|p| {
                    vec![Location {
                        city: Some(p.clone()),
                        country: None,
                    }]
                })
                .unwrap_or_default()
        } else {
            raw.locations
        };

        Self {
            unique_id: listing_key(slug, &native_id, position),
            native_id,
            position,
            name,
            title: raw.title,
            image: raw.image.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            category: category.to_string(),
            kind,
            locations,
            artist_names: raw.artist_names,
            partner_name,
            sale_message: raw.sale_message,
        }
    }
}

/// Synthesize the stable listing key from its identifying tuple.
///
/// The key is a truncated SHA-256 of `slug|native_id|position`, so two
/// sources emitting the same native id never collide and a refetch of the
/// same data reproduces the same key.
pub fn listing_key(slug: &str, native_id: &str, position: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(slug.as_bytes());
    hasher.update(b"|");
    hasher.update(native_id.as_bytes());
    hasher.update(b"|");
    hasher.update(position.to_string().as_bytes());
    hex::encode(&hasher.finalize()[..8])
}

/// Raw record as returned by a category endpoint, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,

    #[serde(default)]
    pub locations: Vec<Location>,

    #[serde(default, alias = "artistNames")]
    pub artist_names: Option<String>,

    #[serde(default)]
    pub partner: Option<RawPartner>,

    #[serde(default, alias = "saleMessage")]
    pub sale_message: Option<String>,
}

/// Partner sub-record of a raw listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPartner {
    #[serde(default)]
    pub name: Option<String>,
}
