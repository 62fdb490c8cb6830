use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::player::{Controller, ControllerOptions};

use super::engine::{EngineError, MetadataSource, PlaybackEngine};
use super::types::{PlayerCmd, SnapshotHandle, Timing};

fn publish<E: PlaybackEngine, M: MetadataSource>(
    controller: &Controller<E, M>,
    snapshot: &SnapshotHandle,
) {
    if let Ok(mut s) = snapshot.lock() {
        *s = controller.snapshot();
    }
}

/// Run the playback controller on its own thread.
///
/// The engine is opened on that thread (audio streams are not always `Send`).
/// Commands apply in arrival order; between commands the thread sleeps until the
/// next auto-advance poll or progress sample is due, so both periodic tasks
/// observe every command issued before them.
pub(super) fn spawn_player_thread<E, M, F>(
    open_engine: F,
    metadata: M,
    options: ControllerOptions,
    timing: Timing,
    rx: Receiver<PlayerCmd>,
    snapshot: SnapshotHandle,
) -> JoinHandle<()>
where
    E: PlaybackEngine + 'static,
    M: MetadataSource + Send + 'static,
    F: FnOnce() -> Result<E, EngineError> + Send + 'static,
{
    thread::spawn(move || {
        let engine = match open_engine() {
            Ok(engine) => engine,
            Err(e) => {
                log::error!("player thread not started: {e}");
                if let Ok(mut s) = snapshot.lock() {
                    s.status = e.to_string();
                }
                return;
            }
        };

        let mut controller = Controller::new(engine, metadata, options);
        publish(&controller, &snapshot);

        let mut next_poll = Instant::now() + timing.poll;
        let mut next_progress = Instant::now() + timing.progress;

        loop {
            let wait = next_poll
                .min(next_progress)
                .saturating_duration_since(Instant::now());

            match rx.recv_timeout(wait) {
                Ok(PlayerCmd::Quit) => {
                    controller.handle(PlayerCmd::Quit);
                    publish(&controller, &snapshot);
                    break;
                }
                Ok(cmd) => controller.handle(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            let now = Instant::now();
            if now >= next_poll {
                controller.poll_auto_advance();
                next_poll = now + timing.poll;
            }
            if now >= next_progress {
                controller.report_progress();
                next_progress = now + timing.progress;
            }

            publish(&controller, &snapshot);
        }

        log::debug!("player thread finished");
    })
}
