use std::sync::mpsc::Sender;

use crate::audio::PlaybackState;
use crate::error::PlaybackError;
use crate::library::TrackId;

/// Snapshot emitted after each transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateUpdate {
    pub state: PlaybackState,
    /// Playlist cursor.
    pub index: Option<usize>,
    /// Selected track and its display title.
    pub track: Option<TrackId>,
    pub title: Option<String>,
    /// Track of the live session, its playlist position and display title.
    pub now_playing: Option<TrackId>,
    pub now_playing_index: Option<usize>,
    pub now_playing_title: Option<String>,
    /// Set when this transition was caused by a playback failure.
    pub fault: Option<PlaybackError>,
}

/// Anything that wants to follow the controller's state.
pub trait StateObserver {
    fn notify(&self, update: &StateUpdate);
}

/// Forward updates to another thread or a later drain.
impl StateObserver for Sender<StateUpdate> {
    fn notify(&self, update: &StateUpdate) {
        let _ = self.send(update.clone());
    }
}
