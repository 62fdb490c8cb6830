use std::path::PathBuf;

use crate::audio::PlayerSnapshot;
use crate::mpris::MprisHandle;
use crate::player::Transport;

/// What MPRIS was last told, so unchanged snapshots are skipped.
#[derive(Debug, Default, PartialEq)]
pub struct MprisMirror {
    track: Option<PathBuf>,
    playback: Transport,
    volume: u8,
}

impl MprisMirror {
    fn of(view: &PlayerSnapshot) -> Self {
        Self {
            track: view.now_playing.as_ref().map(|t| t.path.clone()),
            playback: view.transport,
            volume: view.volume,
        }
    }

    /// Push `view` to MPRIS if it differs from the last push.
    pub fn update(&mut self, mpris: &MprisHandle, view: &PlayerSnapshot) -> bool {
        let next = Self::of(view);
        if *self == next {
            return false;
        }
        update_mpris(mpris, view);
        *self = next;
        true
    }
}

pub fn update_mpris(mpris: &MprisHandle, view: &PlayerSnapshot) {
    mpris.set_track_metadata(view.now_playing_index(), view.now_playing.as_ref());
    mpris.set_playback(view.transport);
    mpris.set_volume(view.volume);
}
