//! Track title mapping.
//!
//! Titles are side-loaded from a plain text file of `file name,title`
//! records. Tracks without a record are displayed under their identifier.

mod load;
mod model;

pub use model::TitleCatalog;
