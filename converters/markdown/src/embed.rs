//! Rules for embedded media.
//!
//! Markdown has no embed syntax, so an embedded `YouTube` player becomes a
//! thumbnail image linking to the video page.

use std::sync::LazyLock;

use marksafe_converters_core::{Element, Rule};
use regex::Regex;

#[allow(clippy::expect_used)]
static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtube\.com/embed/([^&?/]+)").expect("youtube id pattern is valid")
});

/// Extract the video id from a `YouTube` embed URL.
///
/// The id is everything after `youtube.com/embed/` up to the first `&`, `?` or `/`.
///
/// ```
/// use marksafe_converters_markdown::youtube_id;
///
/// assert_eq!(youtube_id("https://www.youtube.com/embed/abc123?rel=0"), Some("abc123"));
/// assert_eq!(youtube_id("https://www.youtube.com/watch?v=abc123"), None);
/// ```
#[must_use]
pub fn youtube_id(src: &str) -> Option<&str> {
    YOUTUBE_ID
        .captures(src)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str())
}

/// Build a `YouTube` thumbnail URL for a video.
///
/// Returns a URL like: `https://img.youtube.com/vi/{id}/0.jpg`
#[must_use]
pub fn youtube_thumbnail_url(id: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/0.jpg")
}

/// Build a `YouTube` watch URL for a video.
///
/// Returns a URL like: `https://www.youtube.com/watch?v={id}`
#[must_use]
pub fn youtube_watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

/// Turns `<iframe src="https://www.youtube.com/embed/{id}">` into a linked thumbnail.
///
/// The iframe `title` becomes the image alt text:
///
/// ```text
/// [![{title}](https://img.youtube.com/vi/{id}/0.jpg)](https://www.youtube.com/watch?v={id})
/// ```
///
/// Iframes pointing anywhere else, or `YouTube` URLs without an embed id, are
/// declined so other rules (or the engine default) can handle them.
#[derive(Debug, Clone, Copy, Default)]
pub struct YoutubeEmbed;

impl Rule for YoutubeEmbed {
    fn name(&self) -> &'static str {
        "youtube-embed"
    }

    fn matches(&self, element: &dyn Element) -> bool {
        element.is("iframe")
    }

    fn transform(&self, element: &dyn Element) -> Option<String> {
        let src = element.attr_or("src", "");
        if !src.contains("youtube.com") {
            return None;
        }

        let Some(id) = youtube_id(src) else {
            tracing::debug!(src, "youtube iframe without an embed id");
            return None;
        };
        let alt = element.attr_or("title", "");

        Some(format!(
            "[![{alt}]({})]({})",
            youtube_thumbnail_url(id),
            youtube_watch_url(id)
        ))
    }
}
