//! Playback engine and the audio backend it drives.
//!
//! The engine owns the single playback session. Decoding and output are
//! delegated to an [`AudioBackend`]; [`RodioBackend`] is the real one.

mod backend;
mod engine;
mod sink;
mod types;

pub use backend::{AudioBackend, AudioStream, CancelToken};
pub use engine::PlaybackEngine;
pub use sink::RodioBackend;
pub use types::*;


#[cfg(test)]
pub(crate) mod testing;
