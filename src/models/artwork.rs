//! Artwork model and sold-status invariant.

use serde::{Deserialize, Serialize};

/// Sale state of an artwork.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoldStatus {
    #[default]
    Available,
    Reserved,
    Sold,
}

/// An artwork as edited in the sold-items admin view.
///
/// `sold_price`, `sold_to` and `sold_notes` are only meaningful while
/// `status != Available`; [`Artwork::set_status`] clears them when the
/// artwork goes back to available so stale sale data never leaks into a
/// submit payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub artist: String,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub status: SoldStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_notes: Option<String>,
}

impl Artwork {
    /// Change the sale status, clearing sale fields on a return to
    /// available.
    pub fn set_status(&mut self, status: SoldStatus) {
        self.status = status;
        if status == SoldStatus::Available {
            self.sold_price = None;
            self.sold_to = None;
            self.sold_notes = None;
        }
    }

    /// Whether the sale-detail fields apply in the current status.
    pub fn sale_fields_active(&self) -> bool {
        self.status != SoldStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sold_artwork() -> Artwork {
        Artwork {
            id: Some("aw-1".to_string()),
            title: "Nocturne".to_string(),
            artist: "J. Whistler".to_string(),
            status: SoldStatus::Sold,
            sold_price: Some(12_000.0),
            sold_to: Some("Private collector".to_string()),
            sold_notes: Some("Shipped".to_string()),
            ..Artwork::default()
        }
    }

    #[test]
    fn marking_available_clears_sale_fields() {
        let mut artwork = sold_artwork();
        artwork.set_status(SoldStatus::Available);
        assert_eq!(artwork.sold_price, None);
        assert_eq!(artwork.sold_to, None);
        assert_eq!(artwork.sold_notes, None);
        assert!(!artwork.sale_fields_active());
    }

    #[test]
    fn reserving_keeps_sale_fields() {
        let mut artwork = sold_artwork();
        artwork.set_status(SoldStatus::Reserved);
        assert_eq!(artwork.sold_price, Some(12_000.0));
        assert!(artwork.sale_fields_active());
    }

    #[test]
    fn available_artwork_serializes_without_sale_fields() {
        let mut artwork = sold_artwork();
        artwork.set_status(SoldStatus::Available);
        let json = serde_json::to_value(&artwork).unwrap();
        assert!(json.get("soldPrice").is_none());
        assert_eq!(json["status"], "available");
    }
}
