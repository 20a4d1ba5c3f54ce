//! Generic XML document tree.
//!
//! Feeds lean on vendor namespaces (`media:`, `itunes:`, ...) that
//! typed feed models flatten away, so documents are kept as a plain
//! element tree with qualified names preserved verbatim. The tree is
//! owned, cheap to clone per element, and convertible to JSON for
//! uniform downstream handling.
//!
//! Parsing is strict about well-formedness but tolerant of content:
//! comments, processing instructions and doctypes are skipped, entity
//! references are decoded, and surrounding whitespace in text nodes is
//! trimmed. CDATA sections are kept verbatim.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::app::{FreshetError, Result};

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: XmlElement,
}

/// One element node: qualified name, attributes in document order,
/// children in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlChild>,
}

/// A child node of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlChild {
    Element(XmlElement),
    Text(String),
}

impl XmlDocument {
    /// Collects every element named `name`, root included, at any
    /// depth, in document order.
    pub fn find_elements(&self, name: &str) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        if self.root.name == name {
            out.push(&self.root);
        }
        self.root.collect_named(name, &mut out);
        out
    }
}

impl XmlElement {
    fn new(name: String) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the value of the attribute named `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over the element children, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlChild::Element(el) => Some(el),
            XmlChild::Text(_) => None,
        })
    }

    /// Concatenation of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlChild::Text(t) => Some(t.as_str()),
                XmlChild::Element(_) => None,
            })
            .collect()
    }

    fn collect_named<'a>(&'a self, name: &str, out: &mut Vec<&'a XmlElement>) {
        for child in self.child_elements() {
            if child.name == name {
                out.push(child);
            }
            child.collect_named(name, out);
        }
    }

    /// Converts the element to JSON.
    ///
    /// An element with neither attributes nor element children becomes
    /// its text as a string. Anything else becomes an object holding
    /// the attributes, one entry per child element name (repeats merge
    /// into an array), and any direct text under `"$text"`.
    pub fn to_value(&self) -> Value {
        let has_element_children = self.child_elements().next().is_some();
        if self.attributes.is_empty() && !has_element_children {
            return Value::String(self.text());
        }

        let mut map = Map::new();
        for (key, value) in &self.attributes {
            map.insert(key.clone(), Value::String(value.clone()));
        }
        for child in self.child_elements() {
            let value = child.to_value();
            match map.get_mut(&child.name) {
                None => {
                    map.insert(child.name.clone(), value);
                }
                Some(Value::Array(entries)) => entries.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            }
        }
        let text = self.text();
        if !text.is_empty() {
            map.insert("$text".to_string(), Value::String(text));
        }
        Value::Object(map)
    }
}

/// Parses `input` into a document tree.
pub fn parse(input: &str) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                stack.push(open_element(&start)?);
            }
            Ok(Event::Empty(start)) => {
                let element = open_element(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| FreshetError::XmlParse("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|e| FreshetError::XmlParse(e.to_string()))?;
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlChild::Text(trimmed.to_string()));
                    }
                }
            }
            Ok(Event::CData(data)) => {
                let text = String::from_utf8_lossy(&data).to_string();
                if !text.is_empty() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlChild::Text(text));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(FreshetError::XmlParse(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(FreshetError::XmlParse("unclosed element".to_string()));
    }
    root.map(|root| XmlDocument { root })
        .ok_or_else(|| FreshetError::XmlParse("no root element".to_string()))
}

fn open_element(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut element = XmlElement::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| FreshetError::XmlParse(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| FreshetError::XmlParse(e.to_string()))?
            .to_string();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlChild::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
