//! Ordered track list with a selection cursor.

mod model;

pub use model::Playlist;
