//! Product media gallery for a storefront product page.
//!
//! The [`Gallery`] controller owns which image or video is selected and the
//! playback state of direct videos. [`GalleryView`] describes what to draw,
//! and a [`session::Session`] connects the controller to a media element.

pub mod config;
pub mod details;
pub mod gallery;
pub mod logging;
pub mod media;
pub mod playback;
pub mod session;
pub mod source;
pub mod view;
pub mod youtube;

pub use gallery::Gallery;
pub use media::{GalleryProps, ImageProps, MediaItem, MediaSequence, VideoKind, VideoProps};
pub use playback::{MediaCommand, MediaErrorCode, PlayTicket, PlaybackError, PlaybackState};
pub use view::{GalleryView, Labels};
