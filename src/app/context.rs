use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::error::{FreshetError, Result};
use crate::config::{Config, FeedEntry};
use crate::feed::Feed;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::list::{Axis, IdSource, ListConfig, ListView};

pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    ids: IdSource,
}

impl AppContext {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load_from(&path),
            None => Config::load(),
        }
        .map_err(|e| FreshetError::Config(e.to_string()))?;

        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::with_options(&config.fetch));

        Self {
            config,
            fetcher,
            ids: IdSource::new(),
        }
    }

    /// Builds the feed named `source`, falling back to an ad-hoc feed
    /// when `source` is itself a URL.
    pub fn feed(&self, source: &str) -> Result<Feed> {
        if let Some(entry) = self.config.find_feed(source) {
            return self.feed_from_entry(entry);
        }
        if url::Url::parse(source).is_ok() {
            return Ok(Feed::new(source, self.fetcher.clone()));
        }
        Err(FreshetError::FeedNotFound(source.to_string()))
    }

    pub fn feed_from_entry(&self, entry: &FeedEntry) -> Result<Feed> {
        let mut feed = Feed::new(entry.url.clone(), self.fetcher.clone())
            .with_item_location(entry.item_location.clone())
            .with_convert_items(entry.convert_items)
            .with_params(entry.params.clone());

        if let Some(tags) = &entry.strip_tags {
            feed = feed.with_strip_tags(tags.clone());
        }
        if let Some(path) = &entry.template {
            feed = feed.with_view(self.view_from_template(path, entry.chasing)?);
        }

        Ok(feed)
    }

    /// Reads an item template file into a view. Views built through
    /// the context share one pass counter.
    pub fn view_from_template(&self, path: &Path, chasing: Option<Axis>) -> Result<ListView> {
        let template = std::fs::read_to_string(path)?;
        Ok(ListView::new(ListConfig { template, chasing }).with_id_source(self.ids.clone()))
    }
}
