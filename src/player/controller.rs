use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::audio::{MetadataSource, PlaybackEngine, PlayerCmd, PlayerSnapshot};
use crate::config::Settings;
use crate::library::Track;

use super::error::PlayerError;
use super::favorites;
use super::progress::Progress;
use super::state::{PlaybackState, Transport};

/// Startup knobs for a `Controller`.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Fixed shuffle seed; `None` seeds from the OS.
    pub shuffle_seed: Option<u64>,
    pub clear_track_on_stop: bool,
    pub autoplay_favorites: bool,
    pub initial_volume: u8,
}

impl ControllerOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            shuffle_seed: settings.playback.shuffle_seed,
            clear_track_on_stop: settings.playback.clear_track_on_stop,
            autoplay_favorites: settings.favorites.autoplay_on_load,
            initial_volume: settings.audio.initial_volume,
        }
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

pub struct Controller<E, M> {
    engine: E,
    metadata: M,
    rng: StdRng,
    options: ControllerOptions,

    catalog: Arc<[Track]>,
    favorites: Arc<BTreeSet<Track>>,
    playlist: Vec<Track>,
    state: PlaybackState,

    volume: u8,
    progress: Option<Progress>,
    status: String,
    /// Tracks that failed to start since auto-advance last started one.
    failed: HashSet<PathBuf>,
}

impl<E: PlaybackEngine, M: MetadataSource> Controller<E, M> {
    pub fn new(engine: E, metadata: M, options: ControllerOptions) -> Self {
        let rng = match options.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut controller = Self {
            engine,
            metadata,
            rng,
            catalog: Arc::from(Vec::new()),
            favorites: Arc::default(),
            playlist: Vec::new(),
            state: PlaybackState::default(),
            volume: 0,
            progress: None,
            status: String::new(),
            failed: HashSet::new(),
            options,
        };
        controller.set_volume(i32::from(controller.options.initial_volume));
        controller
    }

    pub fn catalog(&self) -> &[Track] {
        &self.catalog
    }

    pub fn favorites(&self) -> &BTreeSet<Track> {
        &self.favorites
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    #[cfg(test)]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn is_favorite(&self, track: &Track) -> bool {
        self.favorites.contains(track)
    }

    pub fn transport(&self) -> Transport {
        if self.state.current_track.is_none() || !self.engine.is_busy() {
            Transport::Stopped
        } else if self.state.is_paused {
            Transport::Paused
        } else {
            Transport::Playing
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            catalog: self.catalog.clone(),
            favorites: self.favorites.clone(),
            now_playing: self.state.current_track.clone(),
            transport: self.transport(),
            keep_playing: self.state.keep_playing,
            volume: self.volume,
            progress: self.progress,
            status: self.status.clone(),
        }
    }

    /// Apply one command, turning any failure into the status line.
    pub fn handle(&mut self, cmd: PlayerCmd) {
        log::debug!("command: {cmd:?}");
        let result = match cmd {
            PlayerCmd::LoadCatalog(tracks) => self.load_catalog(tracks).map(drop),
            PlayerCmd::PlaySelected(index) => self.play_selected(index),
            PlayerCmd::PlayRandom => self.play_random(),
            PlayerCmd::Next => self.play_next(),
            PlayerCmd::Prev => self.play_previous(),
            PlayerCmd::PauseResume => self.pause_resume(),
            PlayerCmd::Stop | PlayerCmd::Quit => {
                self.stop();
                Ok(())
            }
            PlayerCmd::AdjustVolume(delta) => {
                self.adjust_volume(delta);
                Ok(())
            }
            PlayerCmd::AddFavorites(tracks) => self.add_to_favorites(&tracks).map(drop),
            PlayerCmd::RemoveFavorites(tracks) => self.remove_from_favorites(&tracks).map(drop),
            PlayerCmd::SaveFavorites(path) => self.save_favorites(&path),
            PlayerCmd::LoadFavorites(path) => self.load_favorites(&path).map(drop),
        };

        if let Err(e) = result {
            log::warn!("{e}");
            self.status = e.to_string();
        }
    }

    /// Replace the catalog. An empty selection leaves the old one in place.
    pub fn load_catalog(&mut self, tracks: Vec<Track>) -> Result<usize, PlayerError> {
        if tracks.is_empty() {
            return Err(PlayerError::NoTracksSelected);
        }
        let n = tracks.len();
        self.catalog = Arc::from(tracks);
        self.status = format!("{n} songs loaded.");
        log::info!("catalog replaced: {n} tracks");
        Ok(n)
    }

    /// Load and start `track`.
    ///
    /// The previous track is gone even when this fails. A missing duration
    /// only degrades progress reporting.
    pub fn play(&mut self, track: &Track) -> Result<(), PlayerError> {
        self.state.clear_track();
        self.progress = None;

        self.engine.load(track)?;

        let total = self.metadata.duration(track).unwrap_or_else(|e| {
            log::warn!(
                "{}: {e}",
                PlayerError::MetadataUnavailable(track.path.clone())
            );
            Duration::ZERO
        });

        self.engine.play();
        self.state.current_track = Some(track.clone());
        self.state.total_duration = total;
        self.progress = Some(Progress::new(Duration::ZERO, total));
        self.status = format!("Now Playing: {}", track.file_name());
        log::debug!("playing {}", track.path.display());
        Ok(())
    }

    pub fn play_from_playlist(&mut self, index: usize) -> Result<(), PlayerError> {
        let Some(track) = self.playlist.get(index).cloned() else {
            return Err(PlayerError::IndexOutOfRange {
                index,
                len: self.playlist.len(),
            });
        };
        self.state.current_index = index;
        self.play(&track)
    }

    /// Play one catalog entry; cancels auto-advance and makes the catalog the playlist.
    pub fn play_selected(&mut self, index: usize) -> Result<(), PlayerError> {
        if self.catalog.is_empty() {
            return Err(PlayerError::NoTracksSelected);
        }
        if index >= self.catalog.len() {
            return Err(PlayerError::IndexOutOfRange {
                index,
                len: self.catalog.len(),
            });
        }
        self.state.keep_playing = false;
        self.playlist = self.catalog.to_vec();
        self.play_from_playlist(index)
    }

    /// Shuffle the catalog into the playlist and turn on auto-advance.
    pub fn play_random(&mut self) -> Result<(), PlayerError> {
        if self.catalog.is_empty() {
            return Err(PlayerError::NoTracksSelected);
        }
        self.playlist = self.catalog.to_vec();
        self.playlist.shuffle(&mut self.rng);
        self.state.keep_playing = true;
        self.failed.clear();
        log::info!("auto-advance on over {} tracks", self.playlist.len());

        let started = self.play_from_playlist(0);
        if started.is_err() {
            self.failed.insert(self.playlist[0].path.clone());
        }
        started
    }

    /// Step forward in the playlist. No-op on the last entry.
    pub fn play_next(&mut self) -> Result<(), PlayerError> {
        let next = self.state.current_index + 1;
        if next >= self.playlist.len() {
            return Ok(());
        }
        self.play_from_playlist(next)
    }

    /// Step back in the playlist. No-op on the first entry.
    pub fn play_previous(&mut self) -> Result<(), PlayerError> {
        if self.state.current_index == 0 || self.playlist.is_empty() {
            return Ok(());
        }
        let prev = (self.state.current_index - 1).min(self.playlist.len() - 1);
        self.play_from_playlist(prev)
    }

    pub fn pause_resume(&mut self) -> Result<(), PlayerError> {
        let Some(track) = self.state.current_track.as_ref() else {
            return Err(PlayerError::NothingPlaying);
        };
        if !self.engine.is_busy() {
            return Err(PlayerError::NothingPlaying);
        }

        if self.state.is_paused {
            self.engine.unpause();
            self.status = format!("Resumed: {}", track.file_name());
        } else {
            self.engine.pause();
            self.status = "Paused".to_string();
        }
        self.state.is_paused = !self.state.is_paused;
        Ok(())
    }

    /// Stop playback and auto-advance.
    pub fn stop(&mut self) {
        self.state.keep_playing = false;
        self.state.is_paused = false;
        self.engine.stop();
        self.progress = None;
        if self.options.clear_track_on_stop {
            self.state.clear_track();
        }
        self.status = "Stopped".to_string();
    }

    /// Set volume in percent. Out-of-range levels are clamped.
    pub fn set_volume(&mut self, level: i32) {
        let level = level.clamp(0, 100) as u8;
        self.volume = level;
        self.engine.set_volume(f32::from(level) / 100.0);
    }

    /// Move the volume by `delta` percent from its current level.
    pub fn adjust_volume(&mut self, delta: i32) {
        self.set_volume(i32::from(self.volume).saturating_add(delta));
    }

    /// Returns how many tracks were not already favorites.
    pub fn add_to_favorites(&mut self, tracks: &[Track]) -> Result<usize, PlayerError> {
        if tracks.is_empty() {
            return Err(PlayerError::NoTracksSelected);
        }
        let favs = Arc::make_mut(&mut self.favorites);
        let added = tracks.iter().filter(|t| favs.insert((*t).clone())).count();
        self.status = format!("{added} songs added to favorites.");
        Ok(added)
    }

    /// Returns how many of `tracks` were favorites.
    pub fn remove_from_favorites(&mut self, tracks: &[Track]) -> Result<usize, PlayerError> {
        if tracks.is_empty() {
            return Err(PlayerError::NoTracksSelected);
        }
        let favs = Arc::make_mut(&mut self.favorites);
        let removed = tracks.iter().filter(|t| favs.remove(*t)).count();
        self.status = format!("{removed} songs removed from favorites.");
        Ok(removed)
    }

    pub fn save_favorites(&mut self, path: &Path) -> Result<(), PlayerError> {
        if self.favorites.is_empty() {
            return Err(PlayerError::NoFavorites);
        }
        favorites::save(path, &self.favorites).map_err(|source| PlayerError::Persistence {
            path: path.to_path_buf(),
            source,
        })?;
        self.status = "Favorites saved.".to_string();
        log::info!(
            "saved {} favorites to {}",
            self.favorites.len(),
            path.display()
        );
        Ok(())
    }

    /// Merge the favorites stored at `path` into the in-memory set and,
    /// when configured, start playing them in order.
    ///
    /// Returns how many entries the file contributed.
    pub fn load_favorites(&mut self, path: &Path) -> Result<usize, PlayerError> {
        let paths = favorites::load(path).map_err(|source| PlayerError::Persistence {
            path: path.to_path_buf(),
            source,
        })?;

        let loaded: Vec<Track> = paths.into_iter().map(|p| self.resolve(p)).collect();
        let n = loaded.len();
        Arc::make_mut(&mut self.favorites).extend(loaded);

        if self.favorites.is_empty() {
            self.status = "No valid favorites found.".to_string();
            return Ok(0);
        }

        if self.options.autoplay_favorites {
            self.state.keep_playing = false;
            self.playlist = self.favorites.iter().cloned().collect();
            self.play_from_playlist(0)?;
            self.status = format!("{n} favorites loaded and playing.");
        } else {
            self.status = format!("{n} favorites loaded.");
        }
        Ok(n)
    }

    /// Catalog entry for `path` when there is one (keeps its tags), else a bare track.
    fn resolve(&self, path: PathBuf) -> Track {
        self.catalog
            .iter()
            .find(|t| t.path == path)
            .cloned()
            .unwrap_or_else(|| Track::from_path(path))
    }

    /// Auto-advance step: once the current track has finished, start the next
    /// one in shuffle order, drawing a fresh permutation after the last.
    ///
    /// Returns true when it moved on to another track.
    pub fn poll_auto_advance(&mut self) -> bool {
        if !self.state.keep_playing {
            return false;
        }
        if self.state.current_track.is_some() && self.state.is_paused {
            return false;
        }
        if self.engine.is_busy() {
            return false;
        }
        if self.playlist.is_empty() {
            self.state.keep_playing = false;
            return false;
        }

        let mut next = self.state.current_index + 1;
        if next >= self.playlist.len() {
            self.playlist.shuffle(&mut self.rng);
            next = 0;
            log::debug!("playlist exhausted, reshuffled");
        }

        match self.play_from_playlist(next) {
            Ok(()) => self.failed.clear(),
            Err(e) => {
                log::warn!("skipping track: {e}");
                self.failed.insert(self.playlist[next].path.clone());
                self.status = e.to_string();
                // Give up only once every entry has failed since the last success.
                if self.playlist.iter().all(|t| self.failed.contains(&t.path)) {
                    self.state.keep_playing = false;
                    self.status = PlayerError::NoPlayableTracks.to_string();
                    log::warn!("auto-advance stopped: no playable tracks");
                }
            }
        }
        true
    }

    /// Progress sample for the current track; `None` while nothing is playing.
    ///
    /// An unreadable position counts as zero elapsed. Once the track has
    /// ended the published progress is cleared.
    pub fn report_progress(&mut self) -> Option<Progress> {
        self.state.current_track.as_ref()?;
        if !self.engine.is_busy() {
            self.progress = None;
            return None;
        }

        let elapsed = self.engine.position().unwrap_or_else(|e| {
            log::debug!("position unavailable: {e}");
            Duration::ZERO
        });
        let sample = Progress::new(elapsed, self.state.total_duration);
        self.progress = Some(sample);
        Some(sample)
    }
}
