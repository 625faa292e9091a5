use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crate::error::PlaybackError;
use crate::library::TrackId;

use super::backend::{AudioBackend, AudioStream, CancelToken};
use super::types::{EngineEvent, PlaybackState, SessionHandle, StreamOutcome};

/// The live association between a track and its playback thread.
struct PlaybackSession {
    handle: SessionHandle,
    cancel: Sender<()>,
    join: JoinHandle<()>,
}

#[derive(Default)]
struct Shared {
    state: PlaybackState,
    session: Option<PlaybackSession>,
    next_id: u64,
}

/// Owns the playback state machine and at most one playback thread.
///
/// `start` and `stop` are serialized by `lifecycle`. The session slot lives
/// in `shared`, which the playback thread also locks when its track ends, so
/// both sides agree on whether a session is live.
pub struct PlaybackEngine {
    backend: Arc<dyn AudioBackend>,
    shared: Arc<Mutex<Shared>>,
    lifecycle: Mutex<()>,
    events: Sender<EngineEvent>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PlaybackEngine {
    /// `events` receives a [`EngineEvent::Finished`] whenever a session ends
    /// without `stop` being called.
    pub fn new(backend: Arc<dyn AudioBackend>, events: Sender<EngineEvent>) -> Self {
        Self {
            backend,
            shared: Arc::new(Mutex::new(Shared::default())),
            lifecycle: Mutex::new(()),
            events,
        }
    }

    pub fn state(&self) -> PlaybackState {
        lock(&self.shared).state
    }

    /// Track of the live session, if any.
    pub fn now_playing(&self) -> Option<TrackId> {
        self.session().map(|h| h.track)
    }

    /// Receipt of the live session, if any.
    pub fn session(&self) -> Option<SessionHandle> {
        lock(&self.shared)
            .session
            .as_ref()
            .map(|s| s.handle.clone())
    }

    /// Start playing `track` on a new playback thread.
    pub fn start(&self, track: &TrackId) -> Result<SessionHandle, PlaybackError> {
        let _serial = lock(&self.lifecycle);

        if lock(&self.shared).session.is_some() {
            log::debug!("start {track}: rejected, a session is live");
            return Err(PlaybackError::AlreadyPlaying);
        }

        let stream = self.backend.open(track).inspect_err(|e| {
            log::warn!("start {track}: {e}");
        })?;

        // Hold the slot while spawning so the thread cannot report an ending
        // before its session is recorded.
        let mut shared = lock(&self.shared);
        let handle = SessionHandle {
            id: shared.next_id,
            track: track.clone(),
        };
        shared.next_id += 1;

        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let join = self
            .spawn_playback(handle.clone(), stream, CancelToken::new(cancel_rx))
            .map_err(|e| PlaybackError::ResourceUnavailable {
                track: track.clone(),
                reason: format!("cannot spawn playback thread: {e}"),
            })?;

        shared.session = Some(PlaybackSession {
            handle: handle.clone(),
            cancel: cancel_tx,
            join,
        });
        shared.state = PlaybackState::Playing;
        log::info!("playing {track} (session {})", handle.id);
        Ok(handle)
    }

    fn spawn_playback(
        &self,
        handle: SessionHandle,
        stream: Box<dyn AudioStream>,
        cancel: CancelToken,
    ) -> std::io::Result<JoinHandle<()>> {
        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();

        thread::Builder::new()
            .name(format!("playback-{}", handle.id))
            .spawn(move || {
                let outcome = stream.play(cancel);

                let mut guard = lock(&shared);
                let owned = guard
                    .session
                    .as_ref()
                    .is_some_and(|s| s.handle.id == handle.id);
                if !owned {
                    // `stop` already took the session.
                    return;
                }
                // Dropping our own JoinHandle detaches; the thread is exiting.
                guard.session = None;
                guard.state = PlaybackState::Stopped;
                drop(guard);

                match &outcome {
                    StreamOutcome::Failed(reason) => {
                        log::warn!("playback of {} failed: {reason}", handle.track)
                    }
                    _ => log::info!("finished {} ({outcome:?})", handle.track),
                }
                let _ = events.send(EngineEvent::Finished {
                    session: handle,
                    outcome,
                });
            })
    }

    /// Stop the live session and wait for its thread to release the output.
    ///
    /// Returns `Err(NotPlaying)` when nothing is live; see
    /// [`PlaybackError::is_informational`].
    pub fn stop(&self) -> Result<(), PlaybackError> {
        let _serial = lock(&self.lifecycle);

        let session = lock(&self.shared).session.take();
        let Some(session) = session else {
            return Err(PlaybackError::NotPlaying);
        };

        let PlaybackSession {
            handle,
            cancel,
            join,
        } = session;
        let _ = cancel.send(());
        drop(cancel);
        if join.join().is_err() {
            log::error!("playback thread for {} panicked", handle.track);
        }

        lock(&self.shared).state = PlaybackState::Stopped;
        log::info!("stopped {} (session {})", handle.track, handle.id);
        Ok(())
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
