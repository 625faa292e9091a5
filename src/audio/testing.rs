//! Scripted backend for engine and controller tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::error::PlaybackError;
use crate::library::TrackId;

use super::backend::{AudioBackend, AudioStream, CancelToken};
use super::types::StreamOutcome;

#[derive(Debug, Clone)]
pub(crate) enum Script {
    /// `open` fails.
    Missing,
    /// Plays until cancelled.
    Hold,
    /// Completes after the delay unless cancelled first.
    FinishAfter(Duration),
    /// Fails after the delay unless cancelled first.
    FailAfter(Duration, String),
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    scripts: Mutex<HashMap<String, Script>>,
    live: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn script(&self, track: &str, script: Script) {
        self.scripts
            .lock()
            .unwrap()
            .insert(track.to_string(), script);
    }

    /// Streams currently holding the (pretend) output device.
    pub(crate) fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously live streams seen.
    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl AudioBackend for FakeBackend {
    fn open(&self, track: &TrackId) -> Result<Box<dyn AudioStream>, PlaybackError> {
        let script = self
            .scripts
            .lock()
            .unwrap()
            .get(track.as_str())
            .cloned()
            .unwrap_or(Script::Hold);

        if let Script::Missing = script {
            return Err(PlaybackError::ResourceUnavailable {
                track: track.clone(),
                reason: "no such file".to_string(),
            });
        }

        Ok(Box::new(FakeStream {
            script,
            live: self.live.clone(),
            peak: self.peak.clone(),
        }))
    }
}

struct FakeStream {
    script: Script,
    live: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl AudioStream for FakeStream {
    fn play(self: Box<Self>, cancel: CancelToken) -> StreamOutcome {
        let FakeStream { script, live, peak } = *self;
        let now = live.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);

        let outcome = match script {
            Script::Missing | Script::Hold => loop {
                if cancel.wait(Duration::from_millis(5)) {
                    break StreamOutcome::Cancelled;
                }
            },
            Script::FinishAfter(d) => {
                if cancel.wait(d) {
                    StreamOutcome::Cancelled
                } else {
                    StreamOutcome::Completed
                }
            }
            Script::FailAfter(d, reason) => {
                if cancel.wait(d) {
                    StreamOutcome::Cancelled
                } else {
                    StreamOutcome::Failed(reason)
                }
            }
        };

        live.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

/// Poll `cond` until it holds or `timeout` passes.
pub(crate) fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    cond()
}
