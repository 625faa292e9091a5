//! `rodio` implementation of the audio backend.
//!
//! Opening a track decodes its header on the calling thread; the output
//! stream and `Sink` are created on the playback thread and dropped there.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use rodio::{Decoder, OutputStreamBuilder, Sink};

use crate::error::PlaybackError;
use crate::library::TrackId;

use super::backend::{AudioBackend, AudioStream, CancelToken};
use super::types::StreamOutcome;

/// Plays files from `root` on the default output device.
pub struct RodioBackend {
    root: PathBuf,
    poll: Duration,
}

impl RodioBackend {
    pub fn new(root: impl Into<PathBuf>, poll: Duration) -> Self {
        Self {
            root: root.into(),
            poll: poll.max(Duration::from_millis(1)),
        }
    }
}

impl AudioBackend for RodioBackend {
    fn open(&self, track: &TrackId) -> Result<Box<dyn AudioStream>, PlaybackError> {
        let path = self.root.join(track.as_str());
        let unavailable = |reason: String| PlaybackError::ResourceUnavailable {
            track: track.clone(),
            reason,
        };

        let file = File::open(&path).map_err(|e| unavailable(e.to_string()))?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| unavailable(e.to_string()))?;

        Ok(Box::new(RodioStream {
            source,
            poll: self.poll,
        }))
    }
}

struct RodioStream {
    source: Decoder<BufReader<File>>,
    poll: Duration,
}

impl AudioStream for RodioStream {
    fn play(self: Box<Self>, cancel: CancelToken) -> StreamOutcome {
        if cancel.is_cancelled() {
            return StreamOutcome::Cancelled;
        }

        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => return StreamOutcome::Failed(format!("no audio output device: {e}")),
        };
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the TUI.
        stream.log_on_drop(false);

        let sink = Sink::connect_new(stream.mixer());
        sink.append(self.source);

        let outcome = loop {
            if cancel.wait(self.poll) {
                sink.stop();
                break StreamOutcome::Cancelled;
            }
            if sink.empty() {
                break StreamOutcome::Completed;
            }
        };

        drop(sink);
        drop(stream);
        outcome
    }
}
