use std::path::{Path, PathBuf};

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::display_from_fields;
use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .any(|e| !e.is_empty() && e == ext)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn non_blank(s: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Build a `Track` for a single file, reading tags when the file parses.
///
/// Unreadable or untagged files still produce a track titled after the file stem.
pub fn read_track(path: &Path, settings: &LibrarySettings) -> Track {
    let mut track = Track::from_path(path);

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            track.duration = Some(tagged.properties().duration());
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(title) = non_blank(tag.title()) {
                    track.title = title;
                }
                track.artist = non_blank(tag.artist());
                track.album = non_blank(tag.album());
            }
        }
        Err(e) => log::debug!("no tags for {}: {e}", path.display()),
    }

    track.display = display_from_fields(
        &track.path,
        &track.title,
        track.artist.as_deref(),
        track.album.as_deref(),
        &settings.display_fields,
        &settings.display_separator,
    );
    track
}

/// Scan `dir` for audio files, sorted case-insensitively by display label.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut tracks: Vec<Track> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file() && is_audio_file(e.path(), settings))
        .map(|e| read_track(e.path(), settings))
        .collect();

    tracks.sort_by_key(|t| t.display.to_lowercase());
    tracks
}

/// Resolve a user selection into catalog order.
///
/// Directories expand to their scanned contents; audio files are taken as
/// given, in argument order. Missing paths and non-audio files are skipped.
pub fn select(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<Track> {
    let mut selection = Vec::new();
    for path in paths {
        if path.is_dir() {
            selection.extend(scan(path, settings));
        } else if path.is_file() && is_audio_file(path, settings) {
            selection.push(read_track(path, settings));
        } else {
            log::debug!("skipping selection entry {}", path.display());
        }
    }
    selection
}
