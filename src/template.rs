//! Placeholder substitution for item templates.
//!
//! Templates are plain strings with `[[name]]` placeholders. Substitution
//! is a single left-to-right scan, so replacement values are emitted
//! verbatim and never re-scanned for further placeholders.

use std::collections::HashMap;

/// Opening delimiter of a placeholder.
const OPEN: &str = "[[";
/// Closing delimiter of a placeholder.
const CLOSE: &str = "]]";

/// Replaces every `[[name]]` placeholder in `template` with the value
/// stored under `name` in `values`.
///
/// Placeholders with no matching entry are replaced with the empty
/// string. An opening delimiter without a closing one is copied through
/// literally.
pub fn populate(template: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find(OPEN) {
        out.push_str(&rest[..open]);
        let after = &rest[open + OPEN.len()..];
        match after.find(CLOSE) {
            Some(close) => {
                let name = &after[..close];
                if let Some(value) = values.get(name) {
                    out.push_str(value);
                }
                rest = &after[close + CLOSE.len()..];
            }
            None => {
                // Unterminated placeholder, keep the tail as-is.
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
