use std::time::Duration;

use crate::library::Track;

/// Transport state as shown to the user.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Transport {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Mutable playback state owned by the controller.
///
/// `current_index` points into the active playlist whenever `current_track`
/// is set and the playlist is non-empty.
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    pub current_index: usize,
    pub is_paused: bool,
    /// Auto-advance is enabled.
    pub keep_playing: bool,
    /// Length of `current_track`; zero when unknown.
    pub total_duration: Duration,
}

impl PlaybackState {
    pub(super) fn clear_track(&mut self) {
        self.current_track = None;
        self.total_duration = Duration::ZERO;
        self.is_paused = false;
    }
}
