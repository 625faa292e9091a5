use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use crate::error::PlaybackError;
use crate::library::TrackId;

use super::types::StreamOutcome;

/// The decode/output capability the engine delegates to.
pub trait AudioBackend: Send + Sync {
    /// Open and probe `track`. Called on the caller's thread so an
    /// unreadable track is reported before any session exists.
    fn open(&self, track: &TrackId) -> Result<Box<dyn AudioStream>, PlaybackError>;
}

/// An opened track, ready to be played on the playback thread.
pub trait AudioStream: Send {
    /// Play until the end of the track or until `cancel` fires.
    ///
    /// Every output and decoder resource must be released before this
    /// returns.
    fn play(self: Box<Self>, cancel: CancelToken) -> StreamOutcome;
}

/// Cancellation signal handed to the playback thread.
///
/// Fires when the engine sends on, or drops, the paired sender.
pub struct CancelToken {
    rx: Receiver<()>,
}

impl CancelToken {
    pub(super) fn new(rx: Receiver<()>) -> Self {
        Self { rx }
    }

    /// Block for up to `timeout`; true once cancelled.
    pub fn wait(&self, timeout: Duration) -> bool {
        !matches!(self.rx.recv_timeout(timeout), Err(RecvTimeoutError::Timeout))
    }

    pub fn is_cancelled(&self) -> bool {
        !matches!(self.rx.try_recv(), Err(TryRecvError::Empty))
    }
}
