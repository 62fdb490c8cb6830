use std::env;
use std::path::PathBuf;

use crate::audio::{AudioPlayer, PlayerCmd};
use crate::config::{self, LibrarySettings};
use crate::library;

/// Paths named on the command line, or the current directory.
pub fn selection_from_args(args: impl IntoIterator<Item = String>) -> Vec<PathBuf> {
    let paths: Vec<PathBuf> = args.into_iter().map(PathBuf::from).collect();
    if !paths.is_empty() {
        return paths;
    }
    vec![env::current_dir().unwrap_or_else(|_| PathBuf::from("."))]
}

/// Where `w`/`o` save and load favorites.
pub fn favorites_path(settings: &config::Settings) -> PathBuf {
    settings
        .favorites_path()
        .unwrap_or_else(|| PathBuf::from("favorites.fav"))
}

/// Resolve `selection` into tracks and hand them to the player.
pub fn send_catalog(player: &AudioPlayer, selection: &[PathBuf], settings: &LibrarySettings) {
    let tracks = library::select(selection, settings);
    log::info!(
        "selected {} tracks from {} path(s)",
        tracks.len(),
        selection.len()
    );
    if player.send(PlayerCmd::LoadCatalog(tracks)).is_err() {
        log::error!("player thread is gone; catalog not loaded");
    }
}
