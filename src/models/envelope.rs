//! Response envelope shapes used by the backend REST API.
//!
//! The backend is not uniform: some endpoints report `success: true`,
//! others `status: "success"`, list bodies come as `{items, totalPages}`
//! or `{pagination: {...}}`. These types absorb every observed shape so
//! call sites only deal with one.

use serde::Deserialize;

/// Generic response envelope: `{success|status, data|items, message}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,

    #[serde(default)]
    pub status: Option<StatusFlag>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, alias = "items")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Whether the body reports success.
    ///
    /// Endpoints that carry neither flag signal errors purely through the
    /// HTTP status, so an absent flag counts as success.
    pub fn is_ok(&self) -> bool {
        match (self.success, &self.status) {
            (Some(success), _) => success,
            (None, Some(status)) => status.is_ok(),
            (None, None) => true,
        }
    }

    /// Server message, or the given fallback when absent.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}

/// `status` field value: either a boolean or a text label.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatusFlag {
    Bool(bool),
    Text(String),
}

impl StatusFlag {
    fn is_ok(&self) -> bool {
        match self {
            StatusFlag::Bool(b) => *b,
            StatusFlag::Text(s) => s.eq_ignore_ascii_case("success") || s.eq_ignore_ascii_case("ok"),
        }
    }
}

/// List body, tolerating both observed pagination shapes.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPayload<T> {
    #[serde(default = "Vec::new", alias = "data")]
    pub items: Vec<T>,

    #[serde(default, rename = "totalPages")]
    pub total_pages: Option<usize>,

    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
}

impl<T> ListPayload<T> {
    /// Total page count, whichever shape carried it.
    pub fn total_pages(&self) -> Option<usize> {
        self.total_pages
            .or_else(|| self.pagination.as_ref().map(|p| p.total_pages))
    }
}

/// Nested pagination metadata shape.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationMeta {
    #[serde(rename = "currentPage")]
    pub current_page: usize,

    #[serde(rename = "totalPages")]
    pub total_pages: usize,

    #[serde(default, rename = "totalItems")]
    pub total_items: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_bool_envelope() {
        let env: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"success": true, "data": {"x": 1}}"#).unwrap();
        assert!(env.is_ok());
        assert!(env.data.is_some());
    }

    #[test]
    fn status_text_envelope() {
        let env: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"status": "success", "items": [1, 2]}"#).unwrap();
        assert!(env.is_ok());
    }

    #[test]
    fn failure_envelope_carries_message() {
        let env: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"success": false, "message": "no such gallery"}"#).unwrap();
        assert!(!env.is_ok());
        assert_eq!(env.message_or("fallback"), "no such gallery");
    }

    #[test]
    fn missing_flags_count_as_success() {
        let env: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(env.is_ok());
        assert_eq!(env.message_or("fallback"), "fallback");
    }

    #[test]
    fn list_payload_flat_shape() {
        let list: ListPayload<i32> =
            serde_json::from_str(r#"{"items": [1, 2, 3], "totalPages": 4}"#).unwrap();
        assert_eq!(list.items.len(), 3);
        assert_eq!(list.total_pages(), Some(4));
    }

    #[test]
    fn list_payload_nested_shape() {
        let list: ListPayload<i32> = serde_json::from_str(
            r#"{"data": [1], "pagination": {"currentPage": 2, "totalPages": 9, "totalItems": 88}}"#,
        )
        .unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.total_pages(), Some(9));
    }

    #[test]
    fn list_payload_without_pagination() {
        let list: ListPayload<i32> = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(list.total_pages(), None);
    }
}
