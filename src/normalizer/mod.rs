//! Conversion of raw feed nodes into [`Item`]s.
//!
//! One normalizer handles both source formats: XML item elements are
//! converted to JSON first, so media extraction and sanitization see
//! the same field map either way. Description cleanup is governed by a
//! [`StripPolicy`], letting callers drop tag pairs or supply their own
//! rewrite.

use serde_json::{Map, Value};

use crate::domain::Item;
use crate::media;
use crate::sanitize;
use crate::xml::XmlElement;

/// A caller-supplied description rewrite.
pub type StripFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// What to do with item descriptions after entity decoding.
#[derive(Default)]
pub enum StripPolicy {
    /// Decode entities only.
    #[default]
    None,
    /// Remove the listed tag pairs (comma-separated tag names).
    Tags(String),
    /// Run an arbitrary rewrite over the decoded text.
    Custom(StripFn),
}

pub struct Normalizer {
    strip: StripPolicy,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            strip: StripPolicy::None,
        }
    }

    pub fn with_policy(strip: StripPolicy) -> Self {
        Self { strip }
    }

    /// Converts one matched XML element into an item.
    ///
    /// Elements that convert to something other than an object (a bare
    /// text node, say) produce an item with no fields rather than a
    /// failure, so one malformed entry cannot sink the whole feed.
    pub fn normalize_xml(&self, element: &XmlElement) -> Item {
        let fields = match element.to_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.finish(Item::from_fields(fields), true)
    }

    /// Converts one located JSON node into an item.
    pub fn normalize_json(&self, node: &Value) -> Item {
        let fields = match node {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        self.finish(Item::from_fields(fields), false)
    }

    fn finish(&self, mut item: Item, with_video: bool) -> Item {
        item.image = media::extract_image(&item.fields);
        item.image_html = media::image_html(&item.image);
        if with_video {
            item.video = media::extract_video(&item.fields);
            item.video_html = media::video_html(&item.video);
        }
        self.sanitize_description(&mut item);
        item
    }

    fn sanitize_description(&self, item: &mut Item) {
        let Some(value) = item.fields.get("description") else {
            return;
        };
        let Value::String(decoded) = sanitize::decode_value(value) else {
            // Structured descriptions pass through untouched.
            return;
        };
        let cleaned = match &self.strip {
            StripPolicy::None => decoded,
            StripPolicy::Tags(tags) if tags.trim().is_empty() => decoded,
            StripPolicy::Tags(tags) => sanitize::strip_tags(&decoded, tags),
            StripPolicy::Custom(rewrite) => rewrite(&decoded),
        };
        item.fields
            .insert("description".to_string(), Value::String(cleaned));
    }
}

/// Second pass over a finished sequence: stamps each item's position
/// and its neighbor indices, clamped at the boundaries. The first
/// item's `previous` and the last item's `next` point at themselves,
/// so navigation never leaves the sequence.
pub fn link_items(items: &mut [Item]) {
    let last = items.len().saturating_sub(1);
    for (index, item) in items.iter_mut().enumerate() {
        item.index = index;
        item.previous = index.saturating_sub(1);
        item.next = if index < last { index + 1 } else { last };
    }
}
