//! Text cleanup for feed content.
//!
//! Feed descriptions routinely arrive with HTML entities double-encoded
//! and with embedded markup the caller does not want to render. This
//! module decodes entities and strips configured tag pairs.

use regex::RegexBuilder;
use serde_json::Value;

/// Decodes HTML entities (`&amp;`, `&#39;`, ...) in `text`.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).to_string()
}

/// Entity-decodes string values; every other value kind is returned
/// unchanged.
pub fn decode_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(decode_entities(s)),
        other => other.clone(),
    }
}

/// Removes every `<tag ...>...</tag>` pair for each tag named in the
/// comma-separated `tags` list.
///
/// Matching is case-insensitive, tolerates attributes in the opening
/// tag, and spans newlines. The match is non-greedy, so each opening
/// tag is paired with the nearest closing tag. Unpaired or self-closing
/// occurrences are left alone.
pub fn strip_tags(text: &str, tags: &str) -> String {
    let mut out = text.to_string();
    for tag in tags.split(',') {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        let tag = regex::escape(tag);
        let pattern = format!(r"<{tag}\b[^>]*>.*?</{tag}\s*>");
        let built = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build();
        if let Ok(re) = built {
            out = re.replace_all(&out, "").into_owned();
        }
    }
    out
}
