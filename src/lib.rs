//! # Freshet
//!
//! A feed loading and list rendering pipeline for RSS-style XML and
//! JSON feeds.
//!
//! ## Architecture
//!
//! Freshet follows a modular pipeline architecture:
//!
//! ```text
//! Fetcher → locate items → Normalizer → link pass → ListView
//! ```
//!
//! - [`fetcher`]: HTTP transport plus JSON-first format detection
//! - [`feed`]: URL templating, item location, and the load pass
//! - [`normalizer`]: Converts located nodes to unified items
//! - [`list`]: Renders item windows through `[[field]]` templates
//!
//! ## Quick Start
//!
//! ```bash
//! # Fetch a feed and print its items
//! freshet fetch https://blog.rust-lang.org/feed.xml --item-location entry
//!
//! # Render a configured feed through its template
//! freshet render news --count 10
//!
//! # List configured feeds
//! freshet feeds
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: TOML configuration with per-feed entries
//! - [`domain`]: Core domain models (Item, FeedResponse)
//! - [`feed`]: Feed loading pipeline
//! - [`fetcher`]: HTTP fetching and payload format detection
//! - [`find`]: Bounded deep search over JSON trees
//! - [`list`]: Item template rendering and navigation wiring
//! - [`media`]: Image/video extraction rule tables
//! - [`normalizer`]: Node-to-item conversion and the link pass
//! - [`sanitize`]: Entity decoding and tag stripping
//! - [`template`]: `[[name]]` placeholder substitution
//! - [`xml`]: Generic XML element tree

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires configuration,
/// the shared HTTP fetcher, and the render-pass counter together.
pub mod app;

/// Command-line interface using clap.
///
/// Defines the CLI structure and subcommands:
/// - `fetch <source>` - Load a feed and print its items
/// - `render <source>` - Load a feed and render it through a template
/// - `feeds` - List configured feeds
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/freshet/config.toml`, supporting per-feed
/// URL templates, default parameters, item locations, tag stripping,
/// and item template files.
pub mod config;

/// Core domain models.
///
/// - [`Item`](domain::Item): One normalized entry with derived media
///   and navigation links
/// - [`FeedResponse`](domain::FeedResponse): Everything one load pass
///   produced
pub mod domain;

/// Feed loading pipeline.
///
/// [`Feed`](feed::Feed) merges parameters into the URL template,
/// fetches, detects the payload format, locates and normalizes items,
/// and optionally renders them.
pub mod feed;

/// HTTP fetching and payload parsing.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed transport
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based
///   implementation
/// - [`Payload`](fetcher::Payload): JSON-first format detection
pub mod fetcher;

/// Bounded recursive key search over JSON trees.
pub mod find;

/// Item list rendering.
///
/// [`ListView`](list::ListView) renders item windows through an
/// augmented template: focusability, pass-unique DOM ids, and chasing
/// focus navigation along a configured axis.
pub mod list;

/// Media extraction rule tables.
///
/// Resolves item images and videos across the competing feed
/// conventions (Media RSS, enclosures, podcast artwork).
pub mod media;

/// Node-to-item conversion.
///
/// [`Normalizer`](normalizer::Normalizer) turns located XML elements
/// or JSON nodes into [`Item`](domain::Item)s;
/// [`link_items`](normalizer::link_items) stamps the navigation pass.
pub mod normalizer;

/// Entity decoding and tag-pair stripping for item text.
pub mod sanitize;

/// `[[name]]` placeholder substitution.
pub mod template;

/// Generic XML element tree with vendor-qualified names preserved.
pub mod xml;
