//! YouTube URL classification.
//!
//! Recognises the short-link, watch, embed and `/v/` URL shapes and derives
//! embed and thumbnail URLs from the extracted video ID.

use std::fmt;
use url::Url;

/// Length of a YouTube video ID.
const ID_LEN: usize = 11;

/// A validated 11-character YouTube video ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YoutubeId(String);

impl YoutubeId {
    /// Take the leading video ID out of a path segment or query value.
    ///
    /// The first 11 characters must all be valid ID characters; anything
    /// after them is ignored.
    pub fn parse(candidate: &str) -> Option<Self> {
        let id: String = candidate
            .chars()
            .take_while(|c| is_id_char(*c))
            .take(ID_LEN)
            .collect();

        (id.chars().count() == ID_LEN).then_some(Self(id))
    }

    /// URL for the embedded player iframe.
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.0)
    }

    /// URL of the medium-quality thumbnail image.
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/mqdefault.jpg", self.0)
    }
}

impl fmt::Display for YoutubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_id_char(c: char) -> bool {
    !matches!(c, '"' | '&' | '?' | '/') && !c.is_whitespace()
}

/// Parse an ID out of a raw path segment, which is still percent-encoded.
fn parse_segment(segment: &str) -> Option<YoutubeId> {
    let decoded = urlencoding::decode(segment).ok()?;
    YoutubeId::parse(&decoded)
}

/// Parse a possibly scheme-less URL such as `youtu.be/abc`.
fn parse_url(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{}", raw)).ok(),
        Err(_) => None,
    }
}

fn is_short_host(host: &str) -> bool {
    host == "youtu.be" || host.ends_with(".youtu.be")
}

fn is_youtube_host(host: &str) -> bool {
    is_short_host(host) || host == "youtube.com" || host.ends_with(".youtube.com")
}

/// Check whether the URL points at a YouTube host.
pub fn is_youtube_url(raw: &str) -> bool {
    parse_url(raw)
        .and_then(|url| url.host_str().map(is_youtube_host))
        .unwrap_or(false)
}

/// Extract the video ID from a YouTube URL.
///
/// Returns `None` for non-YouTube URLs and for YouTube URLs that carry no
/// usable ID (channel pages, truncated IDs, and so on).
pub fn extract_id(raw: &str) -> Option<YoutubeId> {
    let url = parse_url(raw)?;
    let host = url.host_str()?;

    if is_short_host(host) {
        return parse_segment(url.path_segments()?.next()?);
    }

    if !is_youtube_host(host) {
        return None;
    }

    let mut segments = url.path_segments()?;
    match segments.next()? {
        "embed" | "v" => parse_segment(segments.next()?),
        "watch" => url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .and_then(|(_, value)| YoutubeId::parse(&value)),
        _ => None,
    }
}

/// Resolve the embed URL for a YouTube link, if an ID can be extracted.
pub fn embed_url(raw: &str) -> Option<String> {
    extract_id(raw).map(|id| id.embed_url())
}

/// Resolve the thumbnail URL for a YouTube link, if an ID can be extracted.
pub fn thumbnail_url(raw: &str) -> Option<String> {
    extract_id(raw).map(|id| id.thumbnail_url())
}
