//! View model for the gallery.
//!
//! Describes what a renderer should draw for the current state: one viewport,
//! optional navigation controls and the thumbnail strip. A plain-text
//! rendering is provided through `Display`.

use crate::gallery::Gallery;
use crate::media::MediaItem;
use crate::playback::PlaybackState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-facing strings used by the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Labels {
    pub coming_soon: String,
    pub previous: String,
    pub next: String,
    pub thumbnail_navigation: String,
    pub play_video: String,
    pub enlarge_image: String,
    pub retry: String,
    /// Fallback title for an untitled YouTube embed.
    pub youtube_title: String,
    /// Fallback alt text for an untitled video thumbnail.
    pub video_thumbnail: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            coming_soon: "Coming soon".into(),
            previous: "Previous product image".into(),
            next: "Next product image".into(),
            thumbnail_navigation: "Thumbnail navigation".into(),
            play_video: "Play video".into(),
            enlarge_image: "Enlarge product image".into(),
            retry: "Retry".into(),
            youtube_title: "YouTube video".into(),
            video_thumbnail: "Video thumbnail".into(),
        }
    }
}

/// Overlay drawn on top of a direct video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoOverlay<'a> {
    /// Paused and error-free.
    PlayButton { label: &'a str },
    Playing,
    /// Error panel with a retry action.
    Error { message: String, retry_label: &'a str },
}

impl<'a> VideoOverlay<'a> {
    fn for_state(playback: &PlaybackState, labels: &'a Labels) -> Self {
        if let Some(message) = playback.last_error_message() {
            VideoOverlay::Error {
                message,
                retry_label: &labels.retry,
            }
        } else if playback.is_playing() {
            VideoOverlay::Playing
        } else {
            VideoOverlay::PlayButton {
                label: &labels.play_video,
            }
        }
    }
}

/// The main viewport, showing exactly the selected item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewport<'a> {
    /// Shown when the gallery has no items.
    Placeholder { label: &'a str },
    /// Static, fit-contained image.
    Image { alt: &'a str, src: &'a str },
    /// Embedded player; `embed_url` is `None` for an unrecognised link.
    Youtube {
        title: &'a str,
        embed_url: Option<String>,
    },
    DirectVideo {
        title: &'a str,
        src: &'a str,
        overlay: VideoOverlay<'a>,
    },
}

/// Preview drawn inside a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailPreview<'a> {
    Image {
        alt: &'a str,
        src: &'a str,
    },
    Youtube {
        alt: &'a str,
        thumbnail_url: Option<String>,
    },
    /// Muted preview frame of the video itself.
    DirectVideo { src: &'a str },
}

impl ThumbnailPreview<'_> {
    pub fn has_play_icon(&self) -> bool {
        !matches!(self, ThumbnailPreview::Image { .. })
    }
}

/// One entry of the thumbnail strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail<'a> {
    /// Index to pass to `select_index` when activated.
    pub index: usize,
    /// Active entry; exposed as the "pressed" accessibility state.
    pub pressed: bool,
    pub label: &'a str,
    pub preview: ThumbnailPreview<'a>,
}

/// Previous/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation<'a> {
    pub previous_label: &'a str,
    pub next_label: &'a str,
}

/// Everything a renderer needs for one frame of the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView<'a> {
    pub viewport: Viewport<'a>,
    /// Present only when there is more than one item.
    pub navigation: Option<Navigation<'a>>,
    pub strip_label: &'a str,
    pub thumbnails: Vec<Thumbnail<'a>>,
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

impl<'a> GalleryView<'a> {
    pub fn new(gallery: &'a Gallery, labels: &'a Labels) -> Self {
        let viewport = match gallery.selected_item() {
            None => Viewport::Placeholder {
                label: &labels.coming_soon,
            },
            Some(MediaItem::Image { alt_text, src }) => Viewport::Image { alt: alt_text, src },
            Some(MediaItem::YoutubeVideo {
                title, video_id, ..
            }) => Viewport::Youtube {
                title: or_fallback(title, &labels.youtube_title),
                embed_url: video_id.as_ref().map(|id| id.embed_url()),
            },
            Some(MediaItem::DirectVideo { title, url }) => Viewport::DirectVideo {
                title,
                src: url,
                overlay: VideoOverlay::for_state(gallery.playback(), labels),
            },
        };

        let navigation = gallery.shows_navigation().then_some(Navigation {
            previous_label: &labels.previous,
            next_label: &labels.next,
        });

        let selected = gallery.selected_index();
        let thumbnails = gallery
            .sequence()
            .iter()
            .enumerate()
            .map(|(index, item)| Thumbnail {
                index,
                pressed: selected == Some(index),
                label: if item.is_video() {
                    labels.play_video.as_str()
                } else {
                    labels.enlarge_image.as_str()
                },
                preview: match item {
                    MediaItem::Image { alt_text, src } => ThumbnailPreview::Image { alt: alt_text, src },
                    MediaItem::YoutubeVideo {
                        title, video_id, ..
                    } => ThumbnailPreview::Youtube {
                        alt: or_fallback(title, &labels.video_thumbnail),
                        thumbnail_url: video_id.as_ref().map(|id| id.thumbnail_url()),
                    },
                    MediaItem::DirectVideo { url, .. } => ThumbnailPreview::DirectVideo { src: url },
                },
            })
            .collect();

        Self {
            viewport,
            navigation,
            strip_label: &labels.thumbnail_navigation,
            thumbnails,
        }
    }

    /// The pressed thumbnail, if any.
    pub fn active_thumbnail(&self) -> Option<&Thumbnail<'a>> {
        self.thumbnails.iter().find(|t| t.pressed)
    }
}

impl fmt::Display for GalleryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.viewport {
            Viewport::Placeholder { label } => writeln!(f, "[ {} ]", label)?,
            Viewport::Image { alt, src } => writeln!(f, "[image] {} <{}>", alt, src)?,
            Viewport::Youtube { title, embed_url } => match embed_url {
                Some(url) => writeln!(f, "[youtube] {} <{}>", title, url)?,
                None => writeln!(f, "[youtube] {} <no embed>", title)?,
            },
            Viewport::DirectVideo {
                title,
                src,
                overlay,
            } => {
                write!(f, "[video] {} <{}> ", title, src)?;
                match overlay {
                    VideoOverlay::PlayButton { label } => writeln!(f, "(paused: {})", label)?,
                    VideoOverlay::Playing => writeln!(f, "(playing)")?,
                    VideoOverlay::Error {
                        message,
                        retry_label,
                    } => writeln!(f, "(error: {} | {})", message, retry_label)?,
                }
            }
        }

        if let Some(nav) = &self.navigation {
            writeln!(f, "< {} | {} >", nav.previous_label, nav.next_label)?;
        }

        write!(f, "{}:", self.strip_label)?;
        for thumb in &self.thumbnails {
            let marker = if thumb.pressed { "*" } else { " " };
            let kind = match &thumb.preview {
                ThumbnailPreview::Image { .. } => "image",
                ThumbnailPreview::Youtube { .. } => "youtube",
                ThumbnailPreview::DirectVideo { .. } => "video",
            };
            write!(f, " {}{}:{}", marker, thumb.index, kind)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{GalleryProps, ImageProps, VideoProps};
    use crate::playback::{MediaCommand, MediaErrorCode};

    fn mixed_props() -> GalleryProps {
        GalleryProps {
            images: vec![ImageProps {
                alt_text: "Front".into(),
                src: "/front.jpg".into(),
            }],
            videos: vec![
                VideoProps {
                    title: String::new(),
                    url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".into(),
                    kind: None,
                },
                VideoProps {
                    title: "Spin".into(),
                    url: "/spin.mp4".into(),
                    kind: None,
                },
            ],
            default_image_index: 0,
        }
    }

    #[test]
    fn empty_gallery_renders_placeholder() {
        let labels = Labels::default();
        let gallery = Gallery::new(&GalleryProps::default());
        let view = gallery.view(&labels);

        assert_eq!(view.viewport, Viewport::Placeholder { label: "Coming soon" });
        assert!(view.thumbnails.is_empty());
        assert!(view.navigation.is_none());
    }

    #[test]
    fn single_item_hides_navigation() {
        let labels = Labels::default();
        let props = GalleryProps {
            images: vec![ImageProps {
                alt_text: "Only".into(),
                src: "/only.jpg".into(),
            }],
            ..GalleryProps::default()
        };
        let gallery = Gallery::new(&props);
        let view = gallery.view(&labels);

        assert!(view.navigation.is_none());
        assert_eq!(view.thumbnails.len(), 1);
        assert_eq!(view.viewport, Viewport::Image { alt: "Only", src: "/only.jpg" });
    }

    #[test]
    fn thumbnails_follow_sequence_and_mark_selection() {
        let labels = Labels::default();
        let mut gallery = Gallery::new(&mixed_props());
        gallery.select_index(1);
        let view = gallery.view(&labels);

        assert!(view.navigation.is_some());
        let pressed: Vec<_> = view.thumbnails.iter().map(|t| t.pressed).collect();
        assert_eq!(pressed, [false, true, false]);
        assert_eq!(view.active_thumbnail().map(|t| t.index), Some(1));

        assert_eq!(view.thumbnails[0].label, "Enlarge product image");
        assert!(!view.thumbnails[0].preview.has_play_icon());
        assert_eq!(
            view.thumbnails[1].preview,
            ThumbnailPreview::Youtube {
                alt: "Video thumbnail",
                thumbnail_url: Some("https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg".into()),
            }
        );
        assert_eq!(view.thumbnails[2].label, "Play video");
        assert_eq!(
            view.thumbnails[2].preview,
            ThumbnailPreview::DirectVideo { src: "/spin.mp4" }
        );
    }

    #[test]
    fn youtube_viewport_uses_embed_url_and_fallback_title() {
        let labels = Labels::default();
        let mut gallery = Gallery::new(&mixed_props());
        gallery.select_index(1);

        assert_eq!(
            gallery.view(&labels).viewport,
            Viewport::Youtube {
                title: "YouTube video",
                embed_url: Some("https://www.youtube.com/embed/dQw4w9WgXcQ".into()),
            }
        );
    }

    #[test]
    fn broken_youtube_link_renders_empty_embed() {
        let labels = Labels::default();
        let props = GalleryProps {
            videos: vec![VideoProps {
                title: "Channel".into(),
                url: "https://www.youtube.com/@someone".into(),
                kind: None,
            }],
            ..GalleryProps::default()
        };
        let gallery = Gallery::new(&props);

        assert_eq!(
            gallery.view(&labels).viewport,
            Viewport::Youtube {
                title: "Channel",
                embed_url: None,
            }
        );
    }

    fn overlay<'a>(gallery: &'a Gallery, labels: &'a Labels) -> VideoOverlay<'a> {
        match gallery.view(labels).viewport {
            Viewport::DirectVideo { overlay, .. } => overlay,
            other => panic!("unexpected viewport {:?}", other),
        }
    }

    #[test]
    fn direct_video_overlay_tracks_playback() {
        let labels = Labels::default();
        let mut gallery = Gallery::new(&mixed_props());
        gallery.select_index(2);

        assert_eq!(overlay(&gallery, &labels), VideoOverlay::PlayButton { label: "Play video" });

        let Some(MediaCommand::Play(ticket)) = gallery.toggle_playback() else {
            panic!("expected a play command");
        };
        gallery.resolve_play(ticket, Ok(()));
        assert_eq!(overlay(&gallery, &labels), VideoOverlay::Playing);

        gallery.report_playback_error(MediaErrorCode::Unsupported);
        assert_eq!(
            overlay(&gallery, &labels),
            VideoOverlay::Error {
                message: "Video not supported".into(),
                retry_label: "Retry",
            }
        );
    }

    #[test]
    fn text_rendering_marks_active_thumbnail() {
        let labels = Labels::default();
        let gallery = Gallery::new(&mixed_props());
        let text = gallery.view(&labels).to_string();

        assert!(text.starts_with("[image] Front </front.jpg>"));
        assert!(text.contains("< Previous product image | Next product image >"));
        assert!(text.ends_with("Thumbnail navigation: *0:image  1:youtube  2:video"));
    }
}
