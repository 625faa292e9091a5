//! Coordinator between the playlist, the title catalog and the engine.
//!
//! Commands come in from the terminal UI and MPRIS; every resulting state
//! or selection change goes out to the subscribed observers as a single
//! [`StateUpdate`].

mod model;
mod notify;

pub use model::*;
pub use notify::*;
