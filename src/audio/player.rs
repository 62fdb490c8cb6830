use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::config::Settings;
use crate::player::ControllerOptions;

use super::engine::{EngineError, MetadataSource, PlaybackEngine};
use super::metadata::LoftyMetadata;
use super::rodio_engine::RodioEngine;
use super::thread::spawn_player_thread;
use super::types::{PlayerCmd, PlayerSnapshot, SnapshotHandle, Timing};

/// Handle to the player thread: a command sender plus the published snapshot.
pub struct AudioPlayer {
    tx: Sender<PlayerCmd>,
    snapshot: SnapshotHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Start the player on the default output device.
    pub fn new(settings: &Settings) -> Self {
        Self::spawn(
            RodioEngine::open_default,
            LoftyMetadata,
            ControllerOptions::from_settings(settings),
            Timing::from_settings(&settings.audio),
        )
    }

    /// Start the player with an arbitrary engine and metadata source.
    pub fn spawn<E, M, F>(
        open_engine: F,
        metadata: M,
        options: ControllerOptions,
        timing: Timing,
    ) -> Self
    where
        E: PlaybackEngine + 'static,
        M: MetadataSource + Send + 'static,
        F: FnOnce() -> Result<E, EngineError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<PlayerCmd>();
        let snapshot: SnapshotHandle = Arc::new(Mutex::new(PlayerSnapshot::default()));

        let join = spawn_player_thread(
            open_engine,
            metadata,
            options,
            timing,
            rx,
            snapshot.clone(),
        );

        Self {
            tx,
            snapshot,
            join: Mutex::new(Some(join)),
        }
    }

    /// Copy of the most recently published player state.
    pub fn snapshot(&self) -> PlayerSnapshot {
        self.snapshot
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn send(&self, cmd: PlayerCmd) -> Result<(), mpsc::SendError<PlayerCmd>> {
        self.tx.send(cmd)
    }

    /// Stop playback and wait for the player thread to exit.
    pub fn quit(&self) {
        let _ = self.send(PlayerCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
