//! Feed loading pipeline.
//!
//! A [`Feed`] ties the stages together: URL templating with merged
//! parameters, transport through a [`Fetcher`], format detection,
//! item location, normalization, the navigation-link pass, and an
//! optional render through a [`ListView`].
//!
//! Transport and URL failures surface as errors. A payload that is
//! neither JSON nor XML is not an error at this level: the response
//! envelope comes back with its `error` field set so callers can show
//! the message alongside other feeds instead of aborting.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use url::Url;

use crate::app::Result;
use crate::domain::{FeedData, FeedResponse, Item};
use crate::fetcher::{Fetcher, Payload};
use crate::find;
use crate::list::ListView;
use crate::normalizer::{self, Normalizer, StripFn, StripPolicy};
use crate::template;
use crate::xml::XmlDocument;

/// Tag or key assumed to mark one item unless configured otherwise.
pub const DEFAULT_ITEM_LOCATION: &str = "item";

const NO_DATA_ERROR: &str = "no data returned";

pub struct Feed {
    url: String,
    item_location: String,
    convert_items: bool,
    params: HashMap<String, String>,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    view: Option<ListView>,
}

impl Feed {
    pub fn new(url: impl Into<String>, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self {
            url: url.into(),
            item_location: DEFAULT_ITEM_LOCATION.to_string(),
            convert_items: true,
            params: HashMap::new(),
            fetcher,
            normalizer: Normalizer::new(),
            view: None,
        }
    }

    /// Tag (XML) or key (JSON) that marks one item in the payload.
    pub fn with_item_location(mut self, location: impl Into<String>) -> Self {
        self.item_location = location.into();
        self
    }

    /// When disabled, matched XML elements are returned raw instead of
    /// being converted to items.
    pub fn with_convert_items(mut self, convert: bool) -> Self {
        self.convert_items = convert;
        self
    }

    /// Default URL parameters. Call-site parameters win on conflict.
    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Strips the given comma-separated tag pairs from descriptions.
    pub fn with_strip_tags(mut self, tags: impl Into<String>) -> Self {
        self.normalizer = Normalizer::with_policy(StripPolicy::Tags(tags.into()));
        self
    }

    /// Runs a caller-supplied rewrite over descriptions instead.
    pub fn with_strip_fn(mut self, rewrite: StripFn) -> Self {
        self.normalizer = Normalizer::with_policy(StripPolicy::Custom(rewrite));
        self
    }

    /// Renders loaded items through this view.
    pub fn with_view(mut self, view: ListView) -> Self {
        self.view = Some(view);
        self
    }

    pub fn view(&self) -> Option<&ListView> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut ListView> {
        self.view.as_mut()
    }

    /// Fills the URL template from the default parameters overlaid
    /// with the call-site ones.
    pub fn resolve_url(&self, params: &HashMap<String, String>) -> String {
        let mut merged = self.params.clone();
        for (key, value) in params {
            merged.insert(key.clone(), value.clone());
        }
        template::populate(&self.url, &merged)
    }

    /// One full load pass.
    pub async fn load(&self, params: &HashMap<String, String>) -> Result<FeedResponse> {
        let url = self.resolve_url(params);
        Url::parse(&url)?;
        tracing::debug!(%url, "loading feed");
        let payload = self.fetcher.fetch(&url).await?;
        let response = self.process(payload);
        tracing::info!(items = response.item_count(), "feed loaded");
        Ok(response)
    }

    fn process(&self, payload: Payload) -> FeedResponse {
        if let Some(json) = payload.json {
            self.process_json(json)
        } else if let Some(xml) = payload.xml {
            self.process_xml(xml)
        } else {
            tracing::warn!("feed returned neither JSON nor XML");
            FeedResponse::error(NO_DATA_ERROR)
        }
    }

    fn process_json(&self, json: Value) -> FeedResponse {
        let located: Vec<Value> = match find::find_first(&json, &self.item_location) {
            Some(Value::Array(entries)) => entries.clone(),
            Some(single) => vec![single.clone()],
            None => Vec::new(),
        };
        let mut items: Vec<Item> = located
            .iter()
            .map(|node| self.normalizer.normalize_json(node))
            .collect();
        let html = self.finish(&mut items);

        FeedResponse {
            data: Some(FeedData::Json(json)),
            items: Some(items),
            html,
            ..FeedResponse::default()
        }
    }

    fn process_xml(&self, xml: XmlDocument) -> FeedResponse {
        let start = Utc::now();
        let mut response = FeedResponse::default();
        {
            let matches = xml.find_elements(&self.item_location);
            if self.convert_items && !matches.is_empty() {
                let mut items: Vec<Item> = matches
                    .iter()
                    .map(|element| self.normalizer.normalize_xml(element))
                    .collect();
                response.html = self.finish(&mut items);
                response.items = Some(items);
            } else {
                response.items_raw = Some(matches.into_iter().cloned().collect());
            }
        }
        let end = Utc::now();
        response.start = Some(start);
        response.end = Some(end);
        response.elapsed_ms = Some((end - start).num_milliseconds());
        response.data = Some(FeedData::Xml(xml));
        response
    }

    /// Navigation-link pass plus the optional render.
    fn finish(&self, items: &mut Vec<Item>) -> String {
        if items.is_empty() {
            return String::new();
        }
        normalizer::link_items(items);
        match &self.view {
            Some(view) => view.render(items, None, None),
            None => String::new(),
        }
    }
}
