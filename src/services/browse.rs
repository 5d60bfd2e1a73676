// src/services/browse.rs

//! Page-level composition of the aggregated listing.
//!
//! Owns the master list, the filter state and the slice pager, and keeps
//! their invariants wired together: any filter change resets the pager
//! to page 1, and the visible window is always a prefix of the filtered
//! list.

use crate::models::ListingItem;
use crate::services::filter::{filter, FilterState};
use crate::services::pager::SlicePager;

/// State behind a combined-listing page.
#[derive(Debug, Clone)]
pub struct BrowseController {
    master: Vec<ListingItem>,
    filter: FilterState,
    pager: SlicePager,
}

impl BrowseController {
    pub fn new(items: Vec<ListingItem>, items_per_page: usize) -> Self {
        Self {
            master: items,
            filter: FilterState::default(),
            pager: SlicePager::new(items_per_page),
        }
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn current_page(&self) -> usize {
        self.pager.current_page()
    }

    /// Replace the master list after a refetch. The window restarts at
    /// page 1 because the old offsets no longer mean anything.
    pub fn replace_items(&mut self, items: Vec<ListingItem>) {
        self.master = items;
        self.pager.reset();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter.search_query = query.into();
        self.pager.reset();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.filter.selected_category = category.into();
        self.pager.reset();
    }

    /// The full filtered list.
    pub fn filtered(&self) -> Vec<ListingItem> {
        filter(&self.master, &self.filter)
    }

    /// The visible window of the filtered list.
    pub fn visible(&self) -> Vec<ListingItem> {
        let filtered = self.filtered();
        self.pager.window(&filtered).to_vec()
    }

    pub fn has_more(&self) -> bool {
        self.pager.has_more(self.filtered().len())
    }

    /// Grow the window by one page. Returns whether anything changed.
    pub fn load_more(&mut self) -> bool {
        let total = self.filtered().len();
        self.pager.advance(total)
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.filtered().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingKind;

    fn item(id: usize, category: &str) -> ListingItem {
        ListingItem {
            unique_id: format!("id-{id}"),
            native_id: id.to_string(),
            position: id,
            name: format!("Gallery {id}"),
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

    fn controller() -> BrowseController {
        let mut items: Vec<ListingItem> =
            (0..30).map(|i| item(i, "Contemporary Galleries")).collect();
        items.extend((30..40).map(|i| item(i, "Art Museums")));
        BrowseController::new(items, 12)
    }

    #[test]
    fn initial_window_is_first_page() {
        let browse = controller();
        assert_eq!(browse.visible().len(), 12);
        assert!(browse.has_more());
        assert_eq!(browse.current_page(), 1);
    }

    #[test]
    fn load_more_grows_window_until_exhausted() {
        let mut browse = controller();
        assert!(browse.load_more());
        assert_eq!(browse.visible().len(), 24);
        assert!(browse.load_more());
        assert_eq!(browse.visible().len(), 40);
        assert!(!browse.has_more());
        assert!(!browse.load_more());
    }

    #[test]
    fn changing_search_resets_to_page_one() {
        let mut browse = controller();
        browse.load_more();
        assert_eq!(browse.current_page(), 2);

        browse.set_search_query("Gallery 3");
        assert_eq!(browse.current_page(), 1);
        // "Gallery 3" matches 3, 30..39 via substring.
        assert_eq!(browse.filtered().len(), 11);
    }

    #[test]
    fn changing_category_resets_to_page_one() {
        let mut browse = controller();
        browse.load_more();
        browse.set_category("Art Museums");
        assert_eq!(browse.current_page(), 1);
        assert_eq!(browse.filtered().len(), 10);
        assert!(!browse.has_more());
    }

    #[test]
    fn windows_never_repeat_ids() {
        let mut browse = controller();
        let mut previous_len = 0;
        let mut seen = std::collections::HashSet::new();
        loop {
            let window = browse.visible();
            // Each step only reveals a new tail; earlier entries repeat by
            // construction, new ones must not.
            for item in &window[previous_len..] {
                assert!(seen.insert(item.unique_id.clone()), "duplicate id in window");
            }
            previous_len = window.len();
            if !browse.load_more() {
                break;
            }
        }
        assert_eq!(seen.len(), 40);
    }

    #[test]
    fn refetch_resets_pager() {
        let mut browse = controller();
        browse.load_more();
        browse.replace_items((0..5).map(|i| item(i, "Art Museums")).collect());
        assert_eq!(browse.current_page(), 1);
        assert_eq!(browse.visible().len(), 5);
    }
}
