//! Error types shared by the playback core and the runtime.

use std::path::PathBuf;

use thiserror::Error;

use crate::library::TrackId;

/// Outcomes reported by the playback engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// A session is already live; the request is rejected, not queued.
    #[error("a track is already playing")]
    AlreadyPlaying,

    /// The track could not be opened or probed. No session was created.
    #[error("cannot open {track}: {reason}")]
    ResourceUnavailable { track: TrackId, reason: String },

    /// Stop requested while nothing is playing.
    #[error("nothing is playing")]
    NotPlaying,

    /// The playback thread failed mid-stream.
    #[error("playback of {track} failed: {reason}")]
    DecodeFailure { track: TrackId, reason: String },
}

impl PlaybackError {
    /// `NotPlaying` is reported to callers but is not an engine failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::NotPlaying)
    }
}

/// Errors surfaced by [`crate::controller::PlaybackController`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("no track selected")]
    EmptySelection,

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("music directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_not_playing_is_informational() {
        assert!(PlaybackError::NotPlaying.is_informational());
        assert!(!PlaybackError::AlreadyPlaying.is_informational());
        assert!(
            !PlaybackError::DecodeFailure {
                track: TrackId::from("a.mp3"),
                reason: "boom".into(),
            }
            .is_informational()
        );
    }

    #[test]
    fn controller_error_wraps_playback_error_transparently() {
        let err: ControllerError = PlaybackError::AlreadyPlaying.into();
        assert_eq!(err.to_string(), "a track is already playing");
        assert_eq!(ControllerError::EmptySelection.to_string(), "no track selected");
    }
}
