use std::io;
use std::path::PathBuf;

use crate::audio::EngineError;

/// Everything the controller can refuse or fail to do.
///
/// None of these are fatal: the command loop turns them into a status line.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("File not found: {}", .0.display())]
    ResourceNotFound(PathBuf),
    #[error("Duration unavailable for {}", .0.display())]
    MetadataUnavailable(PathBuf),
    #[error("No songs selected.")]
    NoTracksSelected,
    #[error("Could not access favorites file {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No favorites to save.")]
    NoFavorites,
    #[error("No song is playing")]
    NothingPlaying,
    #[error("No track at position {index} (playlist has {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("No playable tracks.")]
    NoPlayableTracks,
    #[error("Playback failed: {0}")]
    Engine(#[source] EngineError),
}

impl From<EngineError> for PlayerError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::NotFound(path) => Self::ResourceNotFound(path),
            other => Self::Engine(other),
        }
    }
}
