//! Track discovery: scans the music directory for playable files.
//!
//! The scanner only produces identifiers. Titles come from the
//! [`crate::catalog`] mapping and playback resolves identifiers against the
//! music directory through the audio backend.

mod model;
mod scan;

pub use model::TrackId;
pub use scan::scan;
