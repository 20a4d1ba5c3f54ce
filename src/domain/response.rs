use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::Item;
use crate::xml::{XmlDocument, XmlElement};

/// The parsed payload a load produced, in whichever format the feed
/// turned out to be.
#[derive(Debug, Clone)]
pub enum FeedData {
    Json(Value),
    Xml(XmlDocument),
}

/// Everything one load pass produced.
///
/// Exactly one of `error` or the item collections is populated: a
/// response either failed (`error` set, no data, no items) or carries
/// `items` (converted) or `items_raw` (matched XML elements kept
/// verbatim). `html` is only non-empty when a list view rendered the
/// items. The timing fields are set on the XML path only and cover the
/// conversion pass.
#[derive(Debug, Clone, Default)]
pub struct FeedResponse {
    pub data: Option<FeedData>,
    pub items: Option<Vec<Item>>,
    pub items_raw: Option<Vec<XmlElement>>,
    pub html: String,
    pub error: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub elapsed_ms: Option<i64>,
}

impl FeedResponse {
    /// Creates the error envelope: no data, no items, just the message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn item_count(&self) -> usize {
        self.items.as_ref().map(Vec::len).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_has_no_items() {
        let response = FeedResponse::error("no data returned");
        assert!(response.is_error());
        assert_eq!(response.error.as_deref(), Some("no data returned"));
        assert!(response.data.is_none());
        assert!(response.items.is_none());
        assert!(response.items_raw.is_none());
        assert_eq!(response.item_count(), 0);
    }

    #[test]
    fn test_item_count_counts_converted_items() {
        let mut response = FeedResponse::default();
        response.items = Some(vec![Item::default(), Item::default()]);
        assert_eq!(response.item_count(), 2);
        assert!(!response.is_error());
    }
}
