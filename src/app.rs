//! Application module: exposes the view model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and mirrors the controller's
//! latest state update plus a status message line.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
