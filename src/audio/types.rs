//! Messages into the player thread and the state it publishes back.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::AudioSettings;
use crate::library::Track;
use crate::player::{Progress, Transport};

#[derive(Debug)]
pub enum PlayerCmd {
    /// Replace the catalog with a new selection.
    LoadCatalog(Vec<Track>),
    /// Play the catalog entry at the given index, ending auto-advance.
    PlaySelected(usize),
    /// Shuffle the catalog and keep playing through it.
    PlayRandom,
    Next,
    Prev,
    PauseResume,
    Stop,
    /// Volume change in percent from the current level; the result is clamped to 0..=100.
    AdjustVolume(i32),
    AddFavorites(Vec<Track>),
    RemoveFavorites(Vec<Track>),
    SaveFavorites(PathBuf),
    LoadFavorites(PathBuf),
    /// Stop playback and end the player thread.
    Quit,
}

#[derive(Debug, Clone)]
/// Player state shared with the UI and MPRIS.
pub struct PlayerSnapshot {
    pub catalog: Arc<[Track]>,
    pub favorites: Arc<BTreeSet<Track>>,
    pub now_playing: Option<Track>,
    pub transport: Transport,
    /// Auto-advance is active.
    pub keep_playing: bool,
    pub volume: u8,
    /// Last progress sample; `None` once stopped.
    pub progress: Option<Progress>,
    /// Last user-facing status message.
    pub status: String,
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        Self {
            catalog: Arc::from(Vec::new()),
            favorites: Arc::default(),
            now_playing: None,
            transport: Transport::Stopped,
            keep_playing: false,
            volume: 0,
            progress: None,
            status: String::new(),
        }
    }
}

impl PlayerSnapshot {
    /// Catalog index of the track currently playing, if it is in the catalog.
    pub fn now_playing_index(&self) -> Option<usize> {
        let now = self.now_playing.as_ref()?;
        self.catalog.iter().position(|t| t == now)
    }

    pub fn is_favorite(&self, track: &Track) -> bool {
        self.favorites.contains(track)
    }
}

pub type SnapshotHandle = Arc<Mutex<PlayerSnapshot>>;

/// Periods of the two background tasks run by the player thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Auto-advance check.
    pub poll: Duration,
    /// Progress sampling.
    pub progress: Duration,
}

impl Timing {
    pub fn from_settings(audio: &AudioSettings) -> Self {
        Self {
            poll: Duration::from_millis(audio.poll_interval_ms.max(1)),
            progress: Duration::from_millis(audio.progress_interval_ms.max(1)),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::from_settings(&AudioSettings::default())
    }
}
