use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use crate::audio::{
    AudioBackend, EngineEvent, PlaybackEngine, PlaybackState, SessionHandle, StreamOutcome,
};
use crate::catalog::TitleCatalog;
use crate::error::{ControllerError, PlaybackError};
use crate::playlist::Playlist;

use super::notify::{StateObserver, StateUpdate};

/// Playlist navigation intents.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    First,
    Previous,
    Next,
    Last,
}

/// Binds playlist navigation to the playback engine.
///
/// Navigation never starts or stops playback; play and stop are separate
/// commands.
pub struct PlaybackController {
    catalog: TitleCatalog,
    playlist: Playlist,
    engine: PlaybackEngine,
    events: Receiver<EngineEvent>,
    observers: Vec<Box<dyn StateObserver>>,
}

impl PlaybackController {
    pub fn new(catalog: TitleCatalog, playlist: Playlist, backend: Arc<dyn AudioBackend>) -> Self {
        let (tx, rx) = mpsc::channel::<EngineEvent>();
        Self {
            catalog,
            playlist,
            engine: PlaybackEngine::new(backend, tx),
            events: rx,
            observers: Vec::new(),
        }
    }

    /// Register an observer. It is not sent the current state; call
    /// [`Self::snapshot`] for that.
    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn catalog(&self) -> &TitleCatalog {
        &self.catalog
    }

    pub fn state(&self) -> PlaybackState {
        self.engine.state()
    }

    /// Current state, selection and now-playing track.
    pub fn snapshot(&self) -> StateUpdate {
        let track = self.playlist.current().cloned();
        let title = track
            .as_ref()
            .map(|t| self.catalog.title_for(t).to_string());
        let now_playing = self.engine.now_playing();
        let now_playing_index = now_playing
            .as_ref()
            .and_then(|t| self.playlist.position(t));
        let now_playing_title = now_playing
            .as_ref()
            .map(|t| self.catalog.title_for(t).to_string());

        StateUpdate {
            state: self.engine.state(),
            index: self.playlist.cursor(),
            track,
            title,
            now_playing,
            now_playing_index,
            now_playing_title,
            fault: None,
        }
    }

    fn emit(&self, fault: Option<PlaybackError>) {
        self.publish(&StateUpdate {
            fault,
            ..self.snapshot()
        });
    }

    fn publish(&self, update: &StateUpdate) {
        for observer in &self.observers {
            observer.notify(update);
        }
    }

    /// Start playing the selected track.
    pub fn play_current(&mut self) -> Result<SessionHandle, ControllerError> {
        // A session that ended since the last sync must be reported before
        // the next one starts.
        self.sync();

        let track = self
            .playlist
            .current()
            .cloned()
            .ok_or(ControllerError::EmptySelection)?;

        let handle = self.engine.start(&track)?;
        self.emit(None);
        Ok(handle)
    }

    /// Stop playback. Returns whether a session was actually stopped.
    pub fn stop_current(&mut self) -> bool {
        match self.engine.stop() {
            Ok(()) => {
                self.emit(None);
                true
            }
            Err(e) => {
                if !e.is_informational() {
                    log::warn!("stop: {e}");
                }
                false
            }
        }
    }

    /// Move the selection. Returns whether it changed.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let changed = match direction {
            Direction::First => self.playlist.first(),
            Direction::Previous => self.playlist.previous(),
            Direction::Next => self.playlist.next(),
            Direction::Last => self.playlist.last(),
        };
        if changed {
            log::debug!("navigate {direction:?} -> {:?}", self.playlist.cursor());
            self.emit(None);
        }
        changed
    }

    /// Select the track at `index`. Out-of-range requests are ignored.
    pub fn select_index(&mut self, index: usize) -> bool {
        let changed = self.playlist.select(index);
        if changed {
            self.emit(None);
        }
        changed
    }

    /// Select the track displayed as `title`.
    pub fn select_title(&mut self, title: &str) -> bool {
        let id = self.catalog.id_for_title(title);
        match self.playlist.position(&id) {
            Some(index) => self.select_index(index),
            None => {
                log::debug!("select_title: {title:?} is not in the playlist");
                false
            }
        }
    }

    /// Re-read the title mapping. Always emits, since any title may change.
    pub fn reload_titles(&mut self, path: &Path) {
        self.catalog.reload(path);
        self.emit(None);
    }

    /// Apply sessions that ended on their own. Returns how many were handled.
    pub fn sync(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            let EngineEvent::Finished { session, outcome } = event;
            let fault = match outcome {
                StreamOutcome::Failed(reason) => Some(PlaybackError::DecodeFailure {
                    track: session.track,
                    reason,
                }),
                StreamOutcome::Completed | StreamOutcome::Cancelled => None,
            };
            let live = self.engine.session().map(|h| h.id);
            if live.is_some_and(|id| id != session.id) {
                // A newer session started before this ending was drained.
                // Report the ending as it happened, then restore the live view.
                self.publish(&StateUpdate {
                    state: PlaybackState::Stopped,
                    now_playing: None,
                    now_playing_index: None,
                    now_playing_title: None,
                    fault,
                    ..self.snapshot()
                });
                self.emit(None);
            } else {
                self.emit(fault);
            }
            handled += 1;
        }
        handled
    }

    /// Stop any live session ahead of exit.
    pub fn shutdown(&mut self) {
        if self.engine.stop().is_ok() {
            log::info!("playback stopped for shutdown");
        }
    }
}
