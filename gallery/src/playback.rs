//! Playback state for direct videos.
//!
//! Holds the playing flag, the last recorded failure and the in-flight play
//! attempt, along with the commands the gallery issues to its media element.

use std::str::FromStr;

/// Error codes reported by a media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaErrorCode {
    Aborted,
    Network,
    Decode,
    Unsupported,
    Unknown,
}

impl MediaErrorCode {
    pub const ALL: [MediaErrorCode; 5] = [
        MediaErrorCode::Aborted,
        MediaErrorCode::Network,
        MediaErrorCode::Decode,
        MediaErrorCode::Unsupported,
        MediaErrorCode::Unknown,
    ];

    /// Map a numeric media error code (1 to 4) to its variant.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => MediaErrorCode::Aborted,
            2 => MediaErrorCode::Network,
            3 => MediaErrorCode::Decode,
            4 => MediaErrorCode::Unsupported,
            _ => MediaErrorCode::Unknown,
        }
    }

    /// User-facing message for this code.
    pub fn message(self) -> &'static str {
        match self {
            MediaErrorCode::Aborted => "Video loading aborted",
            MediaErrorCode::Network => "Network error while loading video",
            MediaErrorCode::Decode => "Video decoding failed",
            MediaErrorCode::Unsupported => "Video not supported",
            MediaErrorCode::Unknown => "Unknown video error",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaErrorCode::Aborted => "aborted",
            MediaErrorCode::Network => "network",
            MediaErrorCode::Decode => "decode",
            MediaErrorCode::Unsupported => "unsupported",
            MediaErrorCode::Unknown => "unknown",
        }
    }
}

/// Returned when a media error code name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised media error code `{0}`")]
pub struct UnknownErrorCode(pub String);

impl FromStr for MediaErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if let Some(code) = Self::ALL.into_iter().find(|code| code.as_str() == name) {
            return Ok(code);
        }
        name.parse::<u16>()
            .map(MediaErrorCode::from_code)
            .map_err(|_| UnknownErrorCode(s.to_string()))
    }
}

/// A recoverable playback failure. Its `Display` is the message shown in the
/// error panel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("{}", .0.message())]
    Media(MediaErrorCode),
    /// The runtime refused to start playback (autoplay policy, decoder, ...).
    #[error("Failed to play video")]
    StartRejected { reason: String },
    #[error("Failed to load video source")]
    SourceUnavailable,
}

/// Tag carried by an in-flight play attempt.
///
/// `generation` is unique per attempt, so a result can only be applied to the
/// attempt that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayTicket {
    pub index: usize,
    pub generation: u64,
}

/// Side effects the gallery asks its media element to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCommand {
    /// Start playback; report the outcome with the ticket.
    Play(PlayTicket),
    Pause,
    /// Reload the source without resuming playback.
    Reload,
}

/// Playback state of the selected direct video.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub(crate) is_playing: bool,
    pub(crate) last_error: Option<PlaybackError>,
    pub(crate) pending: Option<PlayTicket>,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.last_error.as_ref()
    }

    /// Message of the last error, as shown to the user.
    pub fn last_error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(ToString::to_string)
    }

    /// The play attempt awaiting its result, if any.
    pub fn pending(&self) -> Option<PlayTicket> {
        self.pending
    }

    /// Paused, error-free and not waiting on a play attempt.
    pub fn is_idle(&self) -> bool {
        !self.is_playing && self.last_error.is_none() && self.pending.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_codes_map_to_variants() {
        assert_eq!(MediaErrorCode::from_code(1), MediaErrorCode::Aborted);
        assert_eq!(MediaErrorCode::from_code(2), MediaErrorCode::Network);
        assert_eq!(MediaErrorCode::from_code(3), MediaErrorCode::Decode);
        assert_eq!(MediaErrorCode::from_code(4), MediaErrorCode::Unsupported);
        assert_eq!(MediaErrorCode::from_code(0), MediaErrorCode::Unknown);
        assert_eq!(MediaErrorCode::from_code(99), MediaErrorCode::Unknown);
    }

    #[test]
    fn codes_parse_by_name_or_number() {
        assert_eq!("Network".parse::<MediaErrorCode>(), Ok(MediaErrorCode::Network));
        assert_eq!("3".parse::<MediaErrorCode>(), Ok(MediaErrorCode::Decode));
        assert_eq!(
            "bogus".parse::<MediaErrorCode>(),
            Err(UnknownErrorCode("bogus".to_string()))
        );
    }

    #[test]
    fn names_parse_back_to_their_code() {
        for code in MediaErrorCode::ALL {
            assert_eq!(code.as_str().parse::<MediaErrorCode>(), Ok(code));
        }
    }

    #[test]
    fn error_display_matches_user_messages() {
        assert_eq!(
            PlaybackError::Media(MediaErrorCode::Network).to_string(),
            "Network error while loading video"
        );
        assert_eq!(
            PlaybackError::StartRejected {
                reason: "autoplay".into()
            }
            .to_string(),
            "Failed to play video"
        );
        assert_eq!(
            PlaybackError::SourceUnavailable.to_string(),
            "Failed to load video source"
        );
    }

    #[test]
    fn default_state_is_idle() {
        let state = PlaybackState::default();
        assert!(state.is_idle());
        assert_eq!(state.last_error_message(), None);
    }
}
