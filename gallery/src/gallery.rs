//! Gallery state controller.
//!
//! Owns the selected entry of the media sequence and the playback state of
//! the selected direct video. State only changes through the operations
//! below; each one is a discrete user action or a media-runtime callback.

use crate::media::{GalleryProps, MediaItem, MediaSequence};
use crate::playback::{MediaCommand, MediaErrorCode, PlayTicket, PlaybackError, PlaybackState};
use crate::view::{GalleryView, Labels};

/// Selection and playback state for one gallery instance.
#[derive(Debug, Clone)]
pub struct Gallery {
    sequence: MediaSequence,
    /// Meaningless while the sequence is empty.
    selected: usize,
    playback: PlaybackState,
    /// Bumped on every reset and every play attempt.
    generation: u64,
}

/// Clamp a caller-supplied index into `[0, len - 1]`.
fn clamp_index(index: i64, len: usize) -> usize {
    if len == 0 || index <= 0 {
        return 0;
    }
    usize::try_from(index).map_or(len - 1, |i| i.min(len - 1))
}

/// Wrap any integer into `[0, len - 1]`. `len` must be non-zero.
fn wrap_index(index: i64, len: usize) -> usize {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    // rem_euclid is always in [0, len)
    index.rem_euclid(len) as usize
}

impl Gallery {
    /// Build a gallery from props, clamping the initial index.
    pub fn new(props: &GalleryProps) -> Self {
        let sequence = MediaSequence::from(props);
        let selected = clamp_index(props.default_image_index, sequence.len());

        tracing::debug!(
            "Gallery created with {} items, selected {}",
            sequence.len(),
            selected
        );

        Self {
            sequence,
            selected,
            playback: PlaybackState::default(),
            generation: 0,
        }
    }

    /// Re-derive the sequence from new props.
    ///
    /// The selection is clamped into the new bounds. Playback is reset when
    /// the selected item is no longer the same.
    pub fn set_props(&mut self, props: &GalleryProps) {
        let previous = self.selected_item().cloned();

        self.sequence = MediaSequence::from(props);
        if self.selected >= self.sequence.len() {
            self.selected = self.sequence.len().saturating_sub(1);
        }

        if self.selected_item() != previous.as_ref() {
            tracing::debug!("Selected item changed after props update");
            self.reset_playback();
        }
    }

    pub fn sequence(&self) -> &MediaSequence {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Index of the selected item; `None` when the sequence is empty.
    pub fn selected_index(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.selected)
    }

    pub fn selected_item(&self) -> Option<&MediaItem> {
        self.sequence.get(self.selected)
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    /// Whether previous/next controls are shown.
    pub fn shows_navigation(&self) -> bool {
        self.len() > 1
    }

    /// Select an item by index, wrapping any integer into range.
    ///
    /// Returns the new index, or `None` when the sequence is empty.
    pub fn select_index(&mut self, index: i64) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some(self.select(wrap_index(index, self.len())))
    }

    /// Advance to the next item, wrapping to the first after the last.
    pub fn select_next(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let next = if self.selected + 1 >= self.len() {
            0
        } else {
            self.selected + 1
        };
        Some(self.select(next))
    }

    /// Step back to the previous item, wrapping to the last before the first.
    pub fn select_previous(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let previous = if self.selected == 0 {
            self.len() - 1
        } else {
            self.selected - 1
        };
        Some(self.select(previous))
    }

    fn select(&mut self, index: usize) -> usize {
        tracing::debug!("Selecting item {} of {}", index, self.len());
        self.selected = index;
        self.reset_playback();
        index
    }

    fn reset_playback(&mut self) {
        self.generation += 1;
        self.playback = PlaybackState::default();
    }

    fn selected_is_direct_video(&self) -> bool {
        matches!(self.selected_item(), Some(MediaItem::DirectVideo { .. }))
    }

    /// Pause if playing, otherwise start a play attempt.
    ///
    /// Returns `None` when the selected item is not a direct video, or when
    /// a play attempt is already in flight. A returned `Play` command must be
    /// answered with [`Gallery::resolve_play`].
    pub fn toggle_playback(&mut self) -> Option<MediaCommand> {
        if !self.selected_is_direct_video() {
            tracing::debug!("Ignoring playback toggle: selected item is not a direct video");
            return None;
        }

        if self.playback.is_playing {
            self.playback.is_playing = false;
            return Some(MediaCommand::Pause);
        }

        if let Some(pending) = self.playback.pending {
            tracing::debug!("Play attempt {:?} still pending", pending);
            return None;
        }

        self.generation += 1;
        let ticket = PlayTicket {
            index: self.selected,
            generation: self.generation,
        };
        self.playback.pending = Some(ticket);
        Some(MediaCommand::Play(ticket))
    }

    /// Fold the outcome of a play attempt into the state.
    ///
    /// Results for attempts that were superseded (by a new selection, a
    /// retry, an error or a props change) are ignored. Returns whether the
    /// result was applied.
    pub fn resolve_play(&mut self, ticket: PlayTicket, result: Result<(), PlaybackError>) -> bool {
        if self.playback.pending != Some(ticket) || ticket.index != self.selected {
            tracing::debug!("Discarding stale play result for {:?}", ticket);
            return false;
        }

        self.playback.pending = None;
        match result {
            Ok(()) => {
                self.playback.is_playing = true;
                self.playback.last_error = None;
            }
            Err(error) => {
                if let PlaybackError::StartRejected { reason } = &error {
                    tracing::debug!("Playback start rejected: {}", reason);
                }
                self.record_error(error);
            }
        }
        true
    }

    /// Record an error reported by the media element.
    ///
    /// Ignored unless a direct video is selected. Returns whether it was
    /// recorded.
    pub fn report_playback_error(&mut self, code: MediaErrorCode) -> bool {
        if !self.selected_is_direct_video() {
            return false;
        }
        tracing::debug!("Media element reported {} error", code.as_str());
        self.record_error(PlaybackError::Media(code));
        true
    }

    /// Record a failure to load the video source itself.
    pub fn report_source_error(&mut self) -> bool {
        if !self.selected_is_direct_video() {
            return false;
        }
        self.record_error(PlaybackError::SourceUnavailable);
        true
    }

    fn record_error(&mut self, error: PlaybackError) {
        tracing::warn!("Video playback failed: {}", error);
        self.playback.is_playing = false;
        self.playback.pending = None;
        self.playback.last_error = Some(error);
    }

    /// Clear the error and ask the element to reload its source.
    ///
    /// Does not resume playback and leaves `is_playing` untouched.
    pub fn retry_playback(&mut self) -> Option<MediaCommand> {
        if !self.selected_is_direct_video() {
            return None;
        }
        self.playback.last_error = None;
        self.playback.pending = None;
        Some(MediaCommand::Reload)
    }

    /// Build the view model for the current state.
    pub fn view<'a>(&'a self, labels: &'a Labels) -> GalleryView<'a> {
        GalleryView::new(self, labels)
    }
}
