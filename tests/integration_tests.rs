//! Integration tests for the freshet feed pipeline.
//!
//! These tests verify the full workflow from configuration loading
//! through HTTP transport, format detection, normalization, and
//! rendering, against a local mock server.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use freshet::fetcher::http_fetcher::HttpFetcher;
use freshet::fetcher::Fetcher;

mod common {
    pub const RSS_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Integration Feed</title>
    <item>
      <title>First</title>
      <link>https://example.com/1</link>
      <description>One &amp;amp; only</description>
      <media:thumbnail url="a.jpg" />
    </item>
    <item>
      <title>Second</title>
      <link>https://example.com/2</link>
      <description>Two</description>
    </item>
  </channel>
</rss>"#;

    pub const JSON_BODY: &str = r#"{"feed": {"item": [{"title": "a"}, {"title": "b"}]}}"#;
}

#[cfg(test)]
mod fetcher_integration_tests {
    use super::*;
    use freshet::app::FreshetError;

    #[tokio::test]
    async fn test_fetch_parses_xml_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(common::RSS_BODY, "application/rss+xml"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new();
        let payload = fetcher
            .fetch(&format!("{}/feed.xml", server.uri()))
            .await
            .unwrap();

        assert!(payload.json.is_none());
        assert_eq!(payload.xml.unwrap().root.name, "rss");
    }

    #[tokio::test]
    async fn test_fetch_parses_json_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(common::JSON_BODY, "application/json"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new();
        let payload = fetcher
            .fetch(&format!("{}/api", server.uri()))
            .await
            .unwrap();

        assert!(payload.xml.is_none());
        assert!(payload.json.is_some());
    }

    #[tokio::test]
    async fn test_fetch_server_error_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new();
        let err = fetcher
            .fetch(&format!("{}/feed.xml", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, FreshetError::Http(_)));
    }

    #[tokio::test]
    async fn test_fetch_unparseable_body_is_empty_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("plain words", "text/plain"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new();
        let payload = fetcher
            .fetch(&format!("{}/whatever", server.uri()))
            .await
            .unwrap();

        assert!(payload.is_empty());
    }
}

#[cfg(test)]
mod pipeline_integration_tests {
    use super::*;
    use freshet::domain::FeedData;
    use freshet::feed::Feed;

    fn http_fetcher() -> Arc<dyn Fetcher + Send + Sync> {
        Arc::new(HttpFetcher::new())
    }

    async fn serve(server: &MockServer, route: &str, body: &str, content_type: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, content_type))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_xml_feed_end_to_end() {
        let server = MockServer::start().await;
        serve(&server, "/feed.xml", common::RSS_BODY, "application/rss+xml").await;

        let feed = Feed::new(format!("{}/feed.xml", server.uri()), http_fetcher());
        let response = feed.load(&HashMap::new()).await.unwrap();

        assert!(!response.is_error());
        assert!(matches!(response.data, Some(FeedData::Xml(_))));
        assert!(response.elapsed_ms.is_some());

        let items = response.items.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title(), "First");
        assert_eq!(items[0].image, "a.jpg");
        assert_eq!(items[0].description(), "One & only");
        assert_eq!((items[0].previous, items[0].next), (0, 1));
        assert_eq!((items[1].previous, items[1].next), (0, 1));
    }

    #[tokio::test]
    async fn test_json_feed_end_to_end() {
        let server = MockServer::start().await;
        serve(&server, "/api", common::JSON_BODY, "application/json").await;

        let feed = Feed::new(format!("{}/api", server.uri()), http_fetcher());
        let response = feed.load(&HashMap::new()).await.unwrap();

        assert!(matches!(response.data, Some(FeedData::Json(_))));
        assert!(response.elapsed_ms.is_none());

        let items = response.items.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title(), "a");
        assert_eq!(items[1].title(), "b");
        assert_eq!((items[0].previous, items[0].next), (0, 1));
        assert_eq!((items[1].previous, items[1].next), (0, 1));
    }

    #[tokio::test]
    async fn test_url_parameters_reach_the_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .and(query_param("country", "us"))
            .and(query_param("q", "local"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(common::RSS_BODY, "application/rss+xml"),
            )
            .mount(&server)
            .await;

        let mut defaults = HashMap::new();
        defaults.insert("country".to_string(), "us".to_string());
        defaults.insert("q".to_string(), "top".to_string());

        let feed = Feed::new(
            format!("{}/feed?country=[[country]]&q=[[q]]", server.uri()),
            http_fetcher(),
        )
        .with_params(defaults);

        let mut call_params = HashMap::new();
        call_params.insert("q".to_string(), "local".to_string());

        let response = feed.load(&call_params).await.unwrap();
        assert_eq!(response.items.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unparseable_feed_yields_error_envelope() {
        let server = MockServer::start().await;
        serve(&server, "/feed", "not a feed", "text/plain").await;

        let feed = Feed::new(format!("{}/feed", server.uri()), http_fetcher());
        let response = feed.load(&HashMap::new()).await.unwrap();

        assert!(response.is_error());
        assert!(response.items.is_none());
        assert!(response.items_raw.is_none());
    }

    #[tokio::test]
    async fn test_raw_mode_end_to_end() {
        let server = MockServer::start().await;
        serve(&server, "/feed.xml", common::RSS_BODY, "application/rss+xml").await;

        let feed = Feed::new(format!("{}/feed.xml", server.uri()), http_fetcher())
            .with_convert_items(false);
        let response = feed.load(&HashMap::new()).await.unwrap();

        assert!(response.items.is_none());
        let raw = response.items_raw.unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].name, "item");
    }
}

#[cfg(test)]
mod context_integration_tests {
    use super::*;
    use freshet::app::AppContext;

    #[tokio::test]
    async fn test_configured_feed_renders_template() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(common::RSS_BODY, "application/rss+xml"),
            )
            .mount(&server)
            .await;

        let mut template = NamedTempFile::new().unwrap();
        write!(template, "<li class=\"headline\">[[title]]</li>").unwrap();

        let mut config = NamedTempFile::new().unwrap();
        write!(
            config,
            r#"
[[feeds]]
name = "news"
url = "{}/feed.xml"
template = "{}"
chasing = "vertical"
"#,
            server.uri(),
            template.path().display()
        )
        .unwrap();

        let ctx = AppContext::new(Some(config.path().to_path_buf())).unwrap();
        let feed = ctx.feed("news").unwrap();
        let response = feed.load(&HashMap::new()).await.unwrap();

        assert!(response.html.contains(">First</li>"));
        assert!(response.html.contains(">Second</li>"));
        assert!(response.html.contains(r#"id="list0_0""#));
        assert!(response.html.contains("--nav-up:#list0_0;--nav-down:#list0_1;"));
    }
}
