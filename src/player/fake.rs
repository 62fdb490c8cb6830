//! Scripted engine and metadata source for controller tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audio::{EngineError, MetadataError, MetadataSource, PlaybackEngine};
use crate::library::Track;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Load(PathBuf),
    Play,
    Pause,
    Unpause,
    Stop,
    SetVolume(f32),
}

/// Plays nothing; a loaded track stays busy until `finish_track`.
#[derive(Debug, Default)]
pub(crate) struct FakeEngine {
    pub calls: Vec<Call>,
    /// Paths whose `load` fails as if the file were gone.
    pub missing: HashSet<PathBuf>,
    pub loaded: Option<PathBuf>,
    pub busy: bool,
    pub position: Duration,
    pub position_fails: bool,
}

impl FakeEngine {
    pub fn with_missing<'a>(paths: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            missing: paths.into_iter().map(PathBuf::from).collect(),
            ..Self::default()
        }
    }

    /// Simulate the active track reaching its end.
    pub fn finish_track(&mut self) {
        self.busy = false;
    }

    /// Paths passed to `load`, in call order (including failed loads).
    pub fn loads(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Load(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn last_volume(&self) -> Option<f32> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::SetVolume(v) => Some(*v),
            _ => None,
        })
    }
}

impl PlaybackEngine for FakeEngine {
    fn load(&mut self, track: &Track) -> Result<(), EngineError> {
        self.calls.push(Call::Load(track.path.clone()));
        self.busy = false;
        self.loaded = None;
        if self.missing.contains(&track.path) {
            return Err(EngineError::NotFound(track.path.clone()));
        }
        self.loaded = Some(track.path.clone());
        Ok(())
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
        if self.loaded.is_some() {
            self.busy = true;
        }
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn unpause(&mut self) {
        self.calls.push(Call::Unpause);
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.busy = false;
        self.loaded = None;
    }

    fn set_volume(&mut self, fraction: f32) {
        self.calls.push(Call::SetVolume(fraction));
    }

    fn is_busy(&self) -> bool {
        self.busy
    }

    fn position(&self) -> Result<Duration, EngineError> {
        if self.loaded.is_none() || self.position_fails {
            return Err(EngineError::NothingLoaded);
        }
        Ok(self.position)
    }
}

/// Durations by path; unknown paths fail.
#[derive(Debug, Default, Clone)]
pub(crate) struct FakeMetadata {
    pub durations: HashMap<PathBuf, Duration>,
}

impl FakeMetadata {
    pub fn with(entries: &[(&str, u64)]) -> Self {
        Self {
            durations: entries
                .iter()
                .map(|(p, secs)| (PathBuf::from(p), Duration::from_secs(*secs)))
                .collect(),
        }
    }
}

impl MetadataSource for FakeMetadata {
    fn duration(&self, track: &Track) -> Result<Duration, MetadataError> {
        self.durations
            .get(&track.path)
            .copied()
            .ok_or_else(|| MetadataError {
                path: track.path.clone(),
                reason: "no such entry".to_string(),
            })
    }
}

pub(crate) fn tracks(paths: &[&str]) -> Vec<Track> {
    paths.iter().map(|p| Track::from_path(Path::new(p))).collect()
}
