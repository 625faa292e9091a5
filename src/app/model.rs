//! Application view model: `App`.
//!
//! The `App` struct is what the terminal UI renders. It is fed by the
//! controller's state updates and by the runtime's own status messages.

use crate::audio::PlaybackState;
use crate::controller::StateUpdate;
use crate::error::{ControllerError, PlaybackError};

/// The main view model.
pub struct App {
    /// Display titles in playlist order.
    pub titles: Vec<String>,
    pub selected: Option<usize>,
    pub playback: PlaybackState,
    pub now_playing: Option<String>,
    /// One-line status message (errors, confirmations).
    pub message: Option<String>,
    pub current_dir: Option<String>,
}

impl App {
    /// Create a new `App` listing `titles`, seeded from `initial`.
    pub fn new(titles: Vec<String>, initial: &StateUpdate) -> Self {
        let mut app = Self {
            titles,
            selected: None,
            playback: PlaybackState::Idle,
            now_playing: None,
            message: None,
            current_dir: None,
        };
        app.apply(initial);
        app
    }

    /// Record the current directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Replace the displayed titles (after a title reload).
    pub fn set_titles(&mut self, titles: Vec<String>) {
        self.titles = titles;
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Return true if the playlist contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.titles.is_empty()
    }

    /// Fold one controller update into the view.
    pub fn apply(&mut self, update: &StateUpdate) {
        let finished = self.playback == PlaybackState::Playing
            && update.state == PlaybackState::Stopped;

        self.selected = update.index;
        self.playback = update.state;
        self.now_playing = update.now_playing_title.clone();

        if let Some(fault) = &update.fault {
            self.set_message(fault.to_string());
        } else if finished {
            self.set_message("Playback stopped.");
        }
    }

    /// Show a command error on the message line.
    pub fn report(&mut self, err: &ControllerError) {
        let msg = match err {
            ControllerError::EmptySelection => "Select a track to play.".to_string(),
            ControllerError::Playback(PlaybackError::AlreadyPlaying) => {
                "A track is already playing.".to_string()
            }
            other => other.to_string(),
        };
        self.set_message(msg);
    }

    /// Label of the selected track's artwork slot, if configured.
    pub fn artwork<'a>(&self, artwork: &'a [String]) -> Option<&'a str> {
        self.selected
            .and_then(|i| artwork.get(i))
            .map(String::as_str)
    }
}
