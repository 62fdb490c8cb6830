//! The seam between the playback controller and whatever produces sound.
//!
//! The controller is the only caller of the mutating operations; periodic
//! tasks only ask `is_busy` and `position`.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::library::Track;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("audio output unavailable: {0}")]
    Device(String),
    #[error("nothing is loaded")]
    NothingLoaded,
}

#[derive(Debug, thiserror::Error)]
#[error("no duration for {}: {reason}", .path.display())]
pub struct MetadataError {
    pub path: PathBuf,
    pub reason: String,
}

/// A single output device with at most one active track.
pub trait PlaybackEngine {
    /// Replace the active track with `track`, left paused until `play`.
    fn load(&mut self, track: &Track) -> Result<(), EngineError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn unpause(&mut self);
    fn stop(&mut self);
    /// `fraction` is within `0.0..=1.0`.
    fn set_volume(&mut self, fraction: f32);
    /// True while a loaded track has audio left to play, paused or not.
    fn is_busy(&self) -> bool;
    /// Elapsed time of the active track.
    fn position(&self) -> Result<Duration, EngineError>;
}

pub trait MetadataSource {
    fn duration(&self, track: &Track) -> Result<Duration, MetadataError>;
}
