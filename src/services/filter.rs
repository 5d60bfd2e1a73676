// src/services/filter.rs

//! In-memory filter/search over the aggregated listing.
//!
//! Filtering is a pure function of `(items, search_query,
//! selected_category)`: same inputs, same output, same relative order.

use serde::{Deserialize, Serialize};

use crate::models::ListingItem;

/// Category sentinel that bypasses category filtering.
pub const ALL_ITEMS: &str = "All Items";

/// The two fields that drive filtering. Nothing else may influence it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_query: String,
    pub selected_category: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            selected_category: ALL_ITEMS.to_string(),
        }
    }
}

impl FilterState {
    /// Whether the selected category passes everything through.
    pub fn category_is_all(&self) -> bool {
        self.selected_category == ALL_ITEMS || self.selected_category.eq_ignore_ascii_case("all")
    }
}

/// Apply the category and search filters, preserving input order.
pub fn filter(items: &[ListingItem], state: &FilterState) -> Vec<ListingItem> {
    let query = state.search_query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| matches_category(item, state))
        .filter(|item| query.is_empty() || matches_query(item, &query))
        .cloned()
        .collect()
}

fn matches_category(item: &ListingItem, state: &FilterState) -> bool {
    state.category_is_all() || item.category == state.selected_category
}

/// Case-insensitive substring match over the fixed candidate-field set,
/// in order: name, title, artist names, partner name, sale message, then
/// each location's city and country. Any one match is enough.
fn matches_query(item: &ListingItem, query: &str) -> bool {
    let direct = [
        Some(item.name.as_str()),
        item.title.as_deref(),
        item.artist_names.as_deref(),
        item.partner_name.as_deref(),
        item.sale_message.as_deref(),
    ];
    if direct
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(query))
    {
        return true;
    }

    item.locations.iter().any(|location| {
        [location.city.as_deref(), location.country.as_deref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(query))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListingKind, Location};

    fn item(id: &str, name: &str, category: &str) -> ListingItem {
        ListingItem {
            unique_id: id.to_string(),
            native_id: id.to_string(),
            position: 0,
            name: name.to_string(),
            title: None,
            image: "/placeholder-gallery.jpg".to_string(),
            category: category.to_string(),
            kind: ListingKind::Gallery,
            locations: Vec::new(),
            artist_names: None,
            partner_name: None,
            sale_message: None,
        }
    }

    fn sample_items() -> Vec<ListingItem> {
        let mut with_location = item("3", "White Cube", "Art Museums");
        with_location.locations = vec![Location {
            city: Some("London".to_string()),
            country: Some("United Kingdom".to_string()),
        }];
        let mut with_artist = item("4", "Group Show", "Current Shows");
        with_artist.artist_names = Some("Yayoi Kusama, Lee Ufan".to_string());

        vec![
            item("1", "Galerie Perrotin", "Contemporary Galleries"),
            item("2", "Pace Gallery", "Contemporary Galleries"),
            with_location,
            with_artist,
        ]
    }

    fn state(query: &str, category: &str) -> FilterState {
        FilterState {
            search_query: query.to_string(),
            selected_category: category.to_string(),
        }
    }

    #[test]
    fn empty_query_and_all_sentinel_pass_everything() {
        let items = sample_items();
        assert_eq!(filter(&items, &state("", ALL_ITEMS)).len(), items.len());
        assert_eq!(filter(&items, &state("", "all")).len(), items.len());
        assert_eq!(filter(&items, &state("", "ALL")).len(), items.len());
    }

    #[test]
    fn category_filter_is_exact() {
        let items = sample_items();
        let filtered = filter(&items, &state("", "Contemporary Galleries"));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|i| i.category == "Contemporary Galleries"));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let items = sample_items();
        let filtered = filter(&items, &state("PERROTIN", ALL_ITEMS));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Galerie Perrotin");
    }

    #[test]
    fn search_matches_location_city() {
        let items = sample_items();
        let filtered = filter(&items, &state("london", ALL_ITEMS));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "White Cube");
    }

    #[test]
    fn search_matches_artist_names() {
        let items = sample_items();
        let filtered = filter(&items, &state("kusama", ALL_ITEMS));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Group Show");
    }

    #[test]
    fn search_and_category_combine() {
        let items = sample_items();
        let filtered = filter(&items, &state("gallery", "Art Museums"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let items = sample_items();
        let once = filter(&items, &state("galer", ALL_ITEMS));
        let twice = filter(&once, &state("galer", ALL_ITEMS));
        assert_eq!(once, twice);
    }

    #[test]
    fn filter_preserves_relative_order() {
        let items = sample_items();
        let filtered = filter(&items, &state("", "Contemporary Galleries"));
        let ids: Vec<&str> = filtered.iter().map(|i| i.unique_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn unknown_category_yields_empty_list() {
        let items = sample_items();
        assert!(filter(&items, &state("", "Auction Houses")).is_empty());
    }
}
