//! Audio side of the player: the engine seam, its `rodio`/`lofty`
//! implementations, and the thread that owns the playback controller.

mod engine;
mod metadata;
mod player;
mod rodio_engine;
mod thread;
mod types;

pub use engine::{EngineError, MetadataError, MetadataSource, PlaybackEngine};
pub use player::AudioPlayer;
pub use types::{PlayerCmd, PlayerSnapshot};
