//! Playback controller: the single authority for what plays next and what
//! state the transport is in.
//!
//! The controller owns the catalog, favorites and shuffle playlist, drives a
//! `PlaybackEngine`, and exposes the two periodic tasks (auto-advance and
//! progress sampling) as plain methods so that whoever owns it decides how
//! they are scheduled.

mod controller;
mod error;
pub mod favorites;
mod progress;
mod state;

pub use controller::{Controller, ControllerOptions};
pub use error::PlayerError;
pub use progress::Progress;
pub use state::Transport;

#[cfg(test)]
pub(crate) mod fake;
