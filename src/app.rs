//! Application module: the model behind the terminal UI.
//!
//! `App` mirrors the player's published snapshot and keeps the cursor and
//! marks that only the front-end cares about.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
