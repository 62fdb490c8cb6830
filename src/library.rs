//! Track model and catalog selection.
//!
//! `scan` walks a directory for audio files, `select` resolves a mixed list of
//! files and directories into the ordered selection that becomes the catalog.

mod display;
mod model;
mod scan;

pub use model::Track;
pub use scan::select;
