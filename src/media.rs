//! Image and video resolution for feed items.
//!
//! Publishers attach media through half a dozen competing conventions:
//! Media RSS thumbnails and content blocks, RSS enclosures, podcast
//! artwork, or a plain `image` field. Extraction runs an ordered rule
//! table and keeps the first hit, so the most specific conventions win
//! and a recursive search is the last resort.
//!
//! Vendor keys are probed under both delimiter conventions
//! (`media:thumbnail` and `media_thumbnail`), since items converted
//! from raw XML keep the colon form while pre-flattened JSON feeds
//! often use the underscore form.

use serde_json::{Map, Value};

use crate::find;

const THUMBNAIL_KEYS: [&str; 2] = ["media:thumbnail", "media_thumbnail"];
const CONTENT_KEYS: [&str; 2] = ["media:content", "media_content"];
const PODCAST_IMAGE_KEYS: [&str; 2] = ["itunes:image", "itunes_image"];

type Fields = Map<String, Value>;
type Rule = fn(&Fields) -> Option<String>;

const IMAGE_RULES: &[Rule] = &[
    direct_image,
    thumbnail_url,
    content_image,
    enclosure_image,
    thumbnail_text,
    podcast_image,
    deep_thumbnail,
];

const VIDEO_RULES: &[Rule] = &[direct_video, content_video, enclosure_video];

/// Resolves the item's image URL, or `""` when no rule matches.
pub fn extract_image(fields: &Fields) -> String {
    run(IMAGE_RULES, fields)
}

/// Resolves the item's video URL, or `""` when no rule matches.
pub fn extract_video(fields: &Fields) -> String {
    run(VIDEO_RULES, fields)
}

/// Wraps a resolved image URL in an `img` tag, or `""` for no URL.
pub fn image_html(url: &str) -> String {
    if url.is_empty() {
        String::new()
    } else {
        format!(r#"<img src="{url}" />"#)
    }
}

/// Wraps a resolved video URL in a `video` tag, or `""` for no URL.
pub fn video_html(url: &str) -> String {
    if url.is_empty() {
        String::new()
    } else {
        format!(r#"<video src="{url}" />"#)
    }
}

fn run(rules: &[Rule], fields: &Fields) -> String {
    rules
        .iter()
        .find_map(|rule| rule(fields))
        .unwrap_or_default()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Collapses repeated occurrences to the first one. Feeds that list
/// several thumbnails or enclosures convert to arrays, and the rules
/// only ever inspect the first entry.
fn first_entry(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(entries) => entries.first(),
        other => Some(other),
    }
}

fn direct_image(fields: &Fields) -> Option<String> {
    non_empty(fields.get("image")?.as_str()?)
}

fn thumbnail_url(fields: &Fields) -> Option<String> {
    THUMBNAIL_KEYS.iter().find_map(|key| {
        let node = first_entry(fields.get(*key)?)?;
        non_empty(node.get("url")?.as_str()?)
    })
}

fn content_image(fields: &Fields) -> Option<String> {
    CONTENT_KEYS.iter().find_map(|key| {
        let node = first_entry(fields.get(*key)?)?;
        let url = node.get("url")?.as_str()?;
        let media_type = node.get("type").and_then(Value::as_str).unwrap_or("");
        if media_type.contains("image") || has_image_extension(url) {
            non_empty(url)
        } else {
            None
        }
    })
}

fn content_video(fields: &Fields) -> Option<String> {
    CONTENT_KEYS.iter().find_map(|key| {
        let node = first_entry(fields.get(*key)?)?;
        let media_type = node.get("type")?.as_str()?;
        if media_type.contains("video") {
            non_empty(node.get("url")?.as_str()?)
        } else {
            None
        }
    })
}

fn enclosure_image(fields: &Fields) -> Option<String> {
    enclosure_of_type(fields, "image")
}

fn enclosure_video(fields: &Fields) -> Option<String> {
    enclosure_of_type(fields, "video")
}

fn enclosure_of_type(fields: &Fields, kind: &str) -> Option<String> {
    let node = first_entry(fields.get("enclosure")?)?;
    let media_type = node.get("type")?.as_str()?;
    if media_type.contains(kind) {
        non_empty(node.get("url")?.as_str()?)
    } else {
        None
    }
}

/// Some feeds put the URL directly in the thumbnail element's text
/// instead of a `url` attribute.
fn thumbnail_text(fields: &Fields) -> Option<String> {
    THUMBNAIL_KEYS
        .iter()
        .find_map(|key| non_empty(fields.get(*key)?.as_str()?))
}

fn podcast_image(fields: &Fields) -> Option<String> {
    PODCAST_IMAGE_KEYS.iter().find_map(|key| {
        let node = first_entry(fields.get(*key)?)?;
        non_empty(node.get("href")?.as_str()?)
    })
}

fn deep_thumbnail(fields: &Fields) -> Option<String> {
    let node = find::find_first_of(fields, &THUMBNAIL_KEYS)?;
    non_empty(first_entry(node)?.get("url")?.as_str()?)
}

fn direct_video(fields: &Fields) -> Option<String> {
    non_empty(fields.get("video")?.as_str()?)
}

fn has_image_extension(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.ends_with(".jpg") || lower.ends_with(".jpeg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_direct_image_field_wins() {
        let item = fields(json!({
            "image": "direct.jpg",
            "media:thumbnail": {"url": "thumb.jpg"},
        }));
        assert_eq!(extract_image(&item), "direct.jpg");
    }

    #[test]
    fn test_thumbnail_url_attribute() {
        let item = fields(json!({"media:thumbnail": {"url": "a.jpg"}}));
        assert_eq!(extract_image(&item), "a.jpg");
    }

    #[test]
    fn test_thumbnail_underscore_convention() {
        let item = fields(json!({"media_thumbnail": {"url": "a.jpg"}}));
        assert_eq!(extract_image(&item), "a.jpg");
    }

    #[test]
    fn test_repeated_thumbnails_use_first() {
        let item = fields(json!({
            "media:thumbnail": [{"url": "one.jpg"}, {"url": "two.jpg"}],
        }));
        assert_eq!(extract_image(&item), "one.jpg");
    }

    #[test]
    fn test_media_content_requires_image_type() {
        let video_only = fields(json!({
            "media:content": {"url": "clip.mp4", "type": "video/mp4"},
        }));
        assert_eq!(extract_image(&video_only), "");

        let image = fields(json!({
            "media:content": {"url": "pic.png", "type": "image/png"},
        }));
        assert_eq!(extract_image(&image), "pic.png");
    }

    #[test]
    fn test_media_content_jpeg_extension_without_type() {
        let item = fields(json!({"media:content": {"url": "shot.JPG"}}));
        assert_eq!(extract_image(&item), "shot.JPG");
    }

    #[test]
    fn test_enclosure_image() {
        let item = fields(json!({
            "enclosure": {"url": "enc.gif", "type": "image/gif"},
        }));
        assert_eq!(extract_image(&item), "enc.gif");
    }

    #[test]
    fn test_enclosure_audio_ignored() {
        let item = fields(json!({
            "enclosure": {"url": "ep.mp3", "type": "audio/mpeg"},
        }));
        assert_eq!(extract_image(&item), "");
    }

    #[test]
    fn test_thumbnail_text_form() {
        let item = fields(json!({"media:thumbnail": "bare.jpg"}));
        assert_eq!(extract_image(&item), "bare.jpg");
    }

    #[test]
    fn test_podcast_artwork_href() {
        let item = fields(json!({"itunes:image": {"href": "cover.jpg"}}));
        assert_eq!(extract_image(&item), "cover.jpg");
    }

    #[test]
    fn test_deep_search_fallback() {
        let item = fields(json!({
            "media:group": {"media:thumbnail": {"url": "nested.jpg"}},
        }));
        assert_eq!(extract_image(&item), "nested.jpg");
    }

    #[test]
    fn test_rule_order_thumbnail_beats_content() {
        let item = fields(json!({
            "media:content": {"url": "content.png", "type": "image/png"},
            "media:thumbnail": {"url": "thumb.jpg"},
        }));
        assert_eq!(extract_image(&item), "thumb.jpg");
    }

    #[test]
    fn test_rule_order_thumbnail_beats_enclosure() {
        let item = fields(json!({
            "enclosure": {"url": "enc.png", "type": "image/png"},
            "media:thumbnail": {"url": "thumb.jpg"},
        }));
        assert_eq!(extract_image(&item), "thumb.jpg");
    }

    #[test]
    fn test_no_image() {
        let item = fields(json!({"title": "plain"}));
        assert_eq!(extract_image(&item), "");
    }

    #[test]
    fn test_direct_video_field() {
        let item = fields(json!({"video": "clip.mp4"}));
        assert_eq!(extract_video(&item), "clip.mp4");
    }

    #[test]
    fn test_video_from_media_content() {
        let item = fields(json!({
            "media:content": {"url": "clip.mp4", "type": "video/mp4"},
        }));
        assert_eq!(extract_video(&item), "clip.mp4");
    }

    #[test]
    fn test_video_from_enclosure() {
        let item = fields(json!({
            "enclosure": {"url": "clip.webm", "type": "video/webm"},
        }));
        assert_eq!(extract_video(&item), "clip.webm");
    }

    #[test]
    fn test_video_ignores_image_enclosure() {
        let item = fields(json!({
            "enclosure": {"url": "pic.jpg", "type": "image/jpeg"},
        }));
        assert_eq!(extract_video(&item), "");
    }

    #[test]
    fn test_image_html_wrapping() {
        assert_eq!(image_html("a.jpg"), r#"<img src="a.jpg" />"#);
        assert_eq!(image_html(""), "");
    }

    #[test]
    fn test_video_html_wrapping() {
        assert_eq!(video_html("a.mp4"), r#"<video src="a.mp4" />"#);
        assert_eq!(video_html(""), "");
    }
}
