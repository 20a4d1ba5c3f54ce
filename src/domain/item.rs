use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// A normalized feed entry.
///
/// `fields` carries every property of the source node, converted to
/// JSON, under its original key. Derived media URLs and the sequence
/// links live alongside so templates and navigation never have to
/// re-derive them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Item {
    pub fields: Map<String, Value>,
    pub image: String,
    pub image_html: String,
    pub video: String,
    pub video_html: String,
    pub index: usize,
    pub previous: usize,
    pub next: usize,
}

impl Item {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// String value of a field, for fields that converted to plain text.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn title(&self) -> &str {
        self.text_field("title").unwrap_or("")
    }

    pub fn link(&self) -> &str {
        self.text_field("link").unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.text_field("description").unwrap_or("")
    }

    /// Flattens the item for template substitution.
    ///
    /// Scalar fields keep their key; objects and arrays are omitted,
    /// so an unexpected nested field substitutes as empty rather than
    /// leaking serialized JSON into markup. The derived media values go
    /// in under `image`, `imageHTML`, `video` and `videoHTML`.
    pub fn template_values(&self) -> HashMap<String, String> {
        let mut values = HashMap::new();
        for (key, value) in &self.fields {
            if let Some(text) = scalar_text(value) {
                values.insert(key.clone(), text);
            }
        }
        values.insert("image".to_string(), self.image.clone());
        values.insert("imageHTML".to_string(), self.image_html.clone());
        values.insert("video".to_string(), self.video.clone());
        values.insert("videoHTML".to_string(), self.video_html.clone());
        values
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Object(_) | Value::Array(_) => None,
    }
}
