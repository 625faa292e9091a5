//! Audio-related small types.
//!
//! This module defines the playback state machine states, the outcome of a
//! playback run and the events the engine posts from its playback thread.

use crate::library::TrackId;

/// The engine's playback state.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing has been played yet.
    #[default]
    Idle,
    /// A session is live.
    Playing,
    /// The last session ended (stopped, finished or failed).
    Stopped,
}

/// How a playback run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The track played to the end.
    Completed,
    /// Cancellation was signalled.
    Cancelled,
    /// Output or decoding failed mid-stream.
    Failed(String),
}

/// Receipt for a started session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub id: u64,
    pub track: TrackId,
}

/// Posted by the playback thread when a session ends on its own.
///
/// Sessions ended through `PlaybackEngine::stop` do not post an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Finished {
        session: SessionHandle,
        outcome: StreamOutcome,
    },
}
