//! Gallery props and the media sequence derived from them.
//!
//! Props arrive already resolved from the storefront's data layer; this module
//! turns them into the closed set of media variants the gallery dispatches on.

use crate::youtube::{self, YoutubeId};
use serde::{Deserialize, Serialize};

/// An image entry as supplied by the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    pub alt_text: String,
    pub src: String,
}

/// Explicit video kind hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    Youtube,
    Direct,
}

/// A video entry as supplied by the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProps {
    pub title: String,
    pub url: String,
    /// When absent, the kind is inferred from the URL host.
    #[serde(default, rename = "type", alias = "kind", skip_serializing_if = "Option::is_none")]
    pub kind: Option<VideoKind>,
}

/// Construction inputs for a gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryProps {
    #[serde(default)]
    pub images: Vec<ImageProps>,
    #[serde(default)]
    pub videos: Vec<VideoProps>,
    /// Initial selection; clamped into range when the gallery is built.
    #[serde(default)]
    pub default_image_index: i64,
}

/// One displayable unit of the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaItem {
    Image {
        alt_text: String,
        src: String,
    },
    /// Played by an embedded third-party player. `video_id` is `None` when
    /// the URL carries no usable ID; the embed is then left empty.
    YoutubeVideo {
        title: String,
        url: String,
        video_id: Option<YoutubeId>,
    },
    /// Served from a playable URL and bound to the gallery's playback state.
    DirectVideo {
        title: String,
        url: String,
    },
}

impl MediaItem {
    pub fn from_image(image: &ImageProps) -> Self {
        MediaItem::Image {
            alt_text: image.alt_text.clone(),
            src: image.src.clone(),
        }
    }

    pub fn from_video(video: &VideoProps) -> Self {
        let kind = video.kind.unwrap_or_else(|| {
            if youtube::is_youtube_url(&video.url) {
                VideoKind::Youtube
            } else {
                VideoKind::Direct
            }
        });

        match kind {
            VideoKind::Youtube => MediaItem::YoutubeVideo {
                title: video.title.clone(),
                url: video.url.clone(),
                video_id: youtube::extract_id(&video.url),
            },
            VideoKind::Direct => MediaItem::DirectVideo {
                title: video.title.clone(),
                url: video.url.clone(),
            },
        }
    }

    /// Check if this is a video of either kind.
    pub fn is_video(&self) -> bool {
        !matches!(self, MediaItem::Image { .. })
    }

    /// Source URL when this item is a direct video.
    pub fn direct_source(&self) -> Option<&str> {
        match self {
            MediaItem::DirectVideo { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Short name used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            MediaItem::Image { .. } => "image",
            MediaItem::YoutubeVideo { .. } => "youtube",
            MediaItem::DirectVideo { .. } => "video",
        }
    }
}

/// All images in caller order followed by all videos in caller order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSequence {
    items: Vec<MediaItem>,
}

impl MediaSequence {
    pub fn from_parts(images: &[ImageProps], videos: &[VideoProps]) -> Self {
        let items = images
            .iter()
            .map(MediaItem::from_image)
            .chain(videos.iter().map(MediaItem::from_video))
            .collect();

        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MediaItem> {
        self.items.iter()
    }
}

impl From<&GalleryProps> for MediaSequence {
    fn from(props: &GalleryProps) -> Self {
        Self::from_parts(&props.images, &props.videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> ImageProps {
        ImageProps {
            alt_text: name.to_string(),
            src: format!("https://cdn.example.com/{}.jpg", name),
        }
    }

    fn video(url: &str, kind: Option<VideoKind>) -> VideoProps {
        VideoProps {
            title: "Demo".to_string(),
            url: url.to_string(),
            kind,
        }
    }

    #[test]
    fn images_come_before_videos() {
        let seq = MediaSequence::from_parts(
            &[image("front"), image("back")],
            &[video("https://cdn.example.com/spin.mp4", None)],
        );

        let kinds: Vec<_> = seq.iter().map(MediaItem::kind_name).collect();
        assert_eq!(kinds, ["image", "image", "video"]);
        assert_eq!(
            seq.get(1),
            Some(&MediaItem::Image {
                alt_text: "back".into(),
                src: "https://cdn.example.com/back.jpg".into(),
            })
        );
    }

    #[test]
    fn video_kind_inferred_from_host() {
        let yt = MediaItem::from_video(&video("https://youtu.be/dQw4w9WgXcQ", None));
        assert!(matches!(yt, MediaItem::YoutubeVideo { video_id: Some(_), .. }));

        let direct = MediaItem::from_video(&video("https://cdn.example.com/a.mp4", None));
        assert_eq!(direct.direct_source(), Some("https://cdn.example.com/a.mp4"));
    }

    #[test]
    fn explicit_kind_overrides_host() {
        let forced = MediaItem::from_video(&video(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            Some(VideoKind::Direct),
        ));
        assert!(matches!(forced, MediaItem::DirectVideo { .. }));

        let broken = MediaItem::from_video(&video(
            "https://cdn.example.com/a.mp4",
            Some(VideoKind::Youtube),
        ));
        assert!(matches!(broken, MediaItem::YoutubeVideo { video_id: None, .. }));
    }

    #[test]
    fn props_parse_from_camel_case_json() {
        let json = r#"{
            "images": [{ "altText": "Front", "src": "/front.jpg" }],
            "videos": [{ "title": "Spin", "url": "/spin.mp4", "type": "direct" }],
            "defaultImageIndex": 1
        }"#;

        let props: GalleryProps = serde_json::from_str(json).expect("props should parse");
        assert_eq!(props.images[0].alt_text, "Front");
        assert_eq!(props.videos[0].kind, Some(VideoKind::Direct));
        assert_eq!(props.default_image_index, 1);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let props: GalleryProps = serde_json::from_str("{}").expect("props should parse");
        assert!(MediaSequence::from(&props).is_empty());
        assert_eq!(props.default_image_index, 0);
    }
}
