//! Markup rendering of item sequences.
//!
//! A [`ListView`] owns an item template and renders windows of a
//! sequence into HTML. The template's first element is augmented once
//! per view: items become focusable, get a DOM id unique to each
//! render pass, and, when a chasing axis is configured, carry CSS
//! custom properties pointing focus at their neighbors.
//!
//! Render passes are numbered from an [`IdSource`]. Views sharing one
//! source never repeat a pass number, so ids from different passes of
//! the same data cannot collide in a page that keeps both.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use serde::Deserialize;

use crate::app::{FreshetError, Result};
use crate::domain::Item;
use crate::template;

/// Axis along which chasing focus navigation moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Monotonic render-pass counter, cloneable across views.
#[derive(Debug, Clone, Default)]
pub struct IdSource(Arc<AtomicU64>);

impl IdSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_pass(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// Where drawn markup lands.
pub trait Mount {
    fn set_inner_html(&mut self, html: &str);
}

/// In-memory mount point, for tests and for embedders that hand the
/// markup on themselves.
#[derive(Debug, Clone, Default)]
pub struct BufferMount {
    html: Arc<Mutex<String>>,
}

impl BufferMount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.html.lock().map(|html| html.clone()).unwrap_or_default()
    }
}

impl Mount for BufferMount {
    fn set_inner_html(&mut self, html: &str) {
        if let Ok(mut slot) = self.html.lock() {
            *slot = html.to_string();
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListConfig {
    /// Item template with `[[field]]` placeholders.
    pub template: String,
    /// Enables chasing focus navigation along the given axis.
    pub chasing: Option<Axis>,
}

pub struct ListView {
    config: ListConfig,
    items: Vec<Item>,
    ids: IdSource,
    augmented: OnceLock<String>,
    mount: Option<Box<dyn Mount + Send>>,
}

impl ListView {
    pub fn new(config: ListConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            ids: IdSource::new(),
            augmented: OnceLock::new(),
            mount: None,
        }
    }

    /// Shares a pass counter with other views.
    pub fn with_id_source(mut self, ids: IdSource) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_mount(mut self, mount: Box<dyn Mount + Send>) -> Self {
        self.mount = Some(mount);
        self
    }

    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Renders a window of the stored items.
    pub fn get_list(&self, start: Option<usize>, count: Option<usize>) -> String {
        self.render(&self.items, start, count)
    }

    /// Renders a window of `items` through the augmented template.
    ///
    /// `start` defaults to 0 and `count` to the rest of the sequence;
    /// both are clamped, so a window past the end renders nothing.
    /// Every call is a fresh pass: the id prefix changes and the
    /// navigation targets are clamped to the rendered window.
    pub fn render(&self, items: &[Item], start: Option<usize>, count: Option<usize>) -> String {
        let len = items.len();
        let start = start.unwrap_or(0).min(len);
        let end = match count {
            Some(count) => start.saturating_add(count).min(len),
            None => len,
        };

        let template = self.augmented_template();
        let prefix = format!("list{}_", self.ids.next_pass());

        let mut html = String::new();
        for (index, item) in items.iter().enumerate().take(end).skip(start) {
            let previous = index.saturating_sub(1).max(start);
            let next = (index + 1).min(end - 1);

            let mut values = item.template_values();
            values.insert("prefix".to_string(), prefix.clone());
            values.insert("index".to_string(), index.to_string());
            values.insert("count".to_string(), (index + 1).to_string());
            values.insert("previous".to_string(), format!("{prefix}{previous}"));
            values.insert("next".to_string(), format!("{prefix}{next}"));
            values
                .entry("tabindex".to_string())
                .or_insert_with(|| "0".to_string());

            html.push_str(&template::populate(template, &values));
        }
        html
    }

    /// Renders the stored items and writes the markup into the mount
    /// point. Fails when no mount point is configured.
    pub fn draw(&mut self, start: Option<usize>, count: Option<usize>) -> Result<String> {
        if self.mount.is_none() {
            return Err(FreshetError::MissingMount);
        }
        let html = self.render(&self.items, start, count);
        if let Some(mount) = self.mount.as_mut() {
            mount.set_inner_html(&html);
        }
        Ok(html)
    }

    fn augmented_template(&self) -> &str {
        self.augmented
            .get_or_init(|| augment_template(&self.config.template, self.config.chasing))
    }
}

/// Rewrites the template's first opening tag.
///
/// `tabindex` and `id` are added only when the template author did not
/// write their own; an `index` attribute is always added. With a
/// chasing axis, neighbor selectors are prepended to the existing
/// `style` value, or a new `style` attribute is appended. A template
/// without an element is returned unchanged.
fn augment_template(template: &str, chasing: Option<Axis>) -> String {
    let Some(open_start) = template.find('<') else {
        return template.to_string();
    };
    let Some(open_len) = template[open_start..].find('>') else {
        return template.to_string();
    };
    let open_end = open_start + open_len;

    let inner = &template[open_start + 1..open_end];
    let (inner, self_closing) = match inner.strip_suffix('/') {
        Some(stripped) => (stripped, true),
        None => (inner, false),
    };
    let mut tag = inner.trim_end().to_string();

    let mut extra = String::new();
    if attr_position(&tag, "tabindex").is_none() {
        extra.push_str(r#" tabindex="[[tabindex]]""#);
    }
    if attr_position(&tag, "id").is_none() {
        extra.push_str(r#" id="[[prefix]][[index]]""#);
    }
    extra.push_str(r#" index="[[index]]""#);

    if let Some(axis) = chasing {
        let props = match axis {
            Axis::Vertical => "--nav-up:#[[previous]];--nav-down:#[[next]];",
            Axis::Horizontal => "--nav-left:#[[previous]];--nav-right:#[[next]];",
        };
        match style_value_start(&tag) {
            Some(pos) => tag.insert_str(pos, props),
            None if attr_position(&tag, "style").is_none() => {
                extra.push_str(&format!(r#" style="{props}""#));
            }
            // Unquoted style value, nowhere safe to splice.
            None => {}
        }
    }

    let mut out = String::with_capacity(template.len() + extra.len() + 4);
    out.push_str(&template[..=open_start]);
    out.push_str(&tag);
    out.push_str(&extra);
    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
    out.push_str(&template[open_end + 1..]);
    out
}

/// Byte offset of `name=` as an attribute of the opening tag, skipping
/// quoted values. Case-insensitive; offsets are valid for the original
/// string since lowercasing is ASCII-only.
fn attr_position(tag: &str, name: &str) -> Option<usize> {
    let lower = tag.to_ascii_lowercase();
    let needle = format!("{name}=");
    let mut quote: Option<u8> = None;
    for (i, &b) in lower.as_bytes().iter().enumerate() {
        match b {
            b'"' | b'\'' => match quote {
                None => quote = Some(b),
                Some(open) if open == b => quote = None,
                Some(_) => {}
            },
            _ if quote.is_none() && b.is_ascii_whitespace() => {
                if lower[i + 1..].starts_with(&needle) {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte offset just inside the opening quote of the `style` value.
fn style_value_start(tag: &str) -> Option<usize> {
    let pos = attr_position(tag, "style")?;
    let value_start = pos + "style=".len();
    match tag.as_bytes().get(value_start) {
        Some(b'"') | Some(b'\'') => Some(value_start + 1),
        _ => None,
    }
}
