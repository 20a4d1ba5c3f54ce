//! Configuration management for Freshet.
//!
//! Configuration is read from `~/.config/freshet/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is
//! created. Feeds are declared as `[[feeds]]` tables and addressed by
//! name from the command line.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::list::Axis;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchOptions,
    pub feeds: Vec<FeedEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchOptions::default(),
            feeds: Vec::new(),
        }
    }
}

/// HTTP client settings shared by every feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "freshet/0.1.0".to_string(),
        }
    }
}

/// One configured feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEntry {
    pub name: String,
    pub url: String,
    #[serde(default = "default_item_location")]
    pub item_location: String,
    #[serde(default = "default_convert_items")]
    pub convert_items: bool,
    #[serde(default)]
    pub params: HashMap<String, String>,
    #[serde(default)]
    pub strip_tags: Option<String>,
    #[serde(default)]
    pub template: Option<PathBuf>,
    #[serde(default)]
    pub chasing: Option<Axis>,
}

fn default_item_location() -> String {
    "item".to_string()
}

fn default_convert_items() -> bool {
    true
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with
    /// comments. If the config file exists but is invalid, returns an
    /// error. Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/freshet/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("freshet").join("config.toml"))
    }

    /// Look up a configured feed by name.
    pub fn find_feed(&self, name: &str) -> Option<&FeedEntry> {
        self.feeds.iter().find(|feed| feed.name == name)
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Freshet configuration
#
# Feeds are declared as [[feeds]] tables and addressed by name on the
# command line. A feed `url` may contain [[name]] placeholders, filled
# from the feed's `params` table and from -p key=value arguments given
# at the call site (call-site values win).

[fetch]
# Request timeout in seconds
timeout_secs = 10

# User-Agent header sent with every request
user_agent = "freshet/0.1.0"

# [[feeds]]
# name = "example"
# url = "https://example.com/feed.xml?country=[[country]]"
#
# # Tag (XML) or key (JSON) that marks one item in the payload
# item_location = "item"
#
# # Convert matched XML elements to items; false keeps them raw
# convert_items = true
#
# # Comma-separated tag pairs to remove from item descriptions
# strip_tags = "script, style"
#
# # Item template file with [[field]] placeholders
# template = "/path/to/item.html"
#
# # Focus-chasing axis for rendered lists: "vertical" or "horizontal"
# chasing = "vertical"
#
# # Default URL parameters
# [feeds.params]
# country = "us"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
