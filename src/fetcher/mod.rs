pub mod http_fetcher;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::Result;
use crate::xml::{self, XmlDocument};

/// A fetched payload, parsed into whichever format it turned out to
/// be. Both sides empty means the transport produced no usable data.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    pub json: Option<Value>,
    pub xml: Option<XmlDocument>,
}

impl Payload {
    /// Probes the body format: JSON first, then XML, else empty.
    ///
    /// JSON wins ties. A body parseable as both (which in practice
    /// means neither parser rejected some degenerate input) is treated
    /// as JSON.
    pub fn from_bytes(body: &[u8]) -> Self {
        if let Ok(json) = serde_json::from_slice::<Value>(body) {
            return Self {
                json: Some(json),
                xml: None,
            };
        }
        let text = String::from_utf8_lossy(body);
        match xml::parse(&text) {
            Ok(doc) => Self {
                json: None,
                xml: Some(doc),
            },
            Err(e) => {
                tracing::debug!("body is neither JSON nor XML: {}", e);
                Self::default()
            }
        }
    }

    pub fn json(json: Value) -> Self {
        Self {
            json: Some(json),
            xml: None,
        }
    }

    pub fn xml(xml: XmlDocument) -> Self {
        Self {
            json: None,
            xml: Some(xml),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.json.is_none() && self.xml.is_none()
    }
}

#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Payload>;
}
