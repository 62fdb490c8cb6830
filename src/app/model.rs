//! Application model: cursor, marks and the last published player state.
//!
//! The player thread owns all playback state; `App` only keeps a copy of the
//! latest snapshot plus what is purely local to the terminal (cursor position
//! and the set of marked rows).

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::audio::PlayerSnapshot;
use crate::library::Track;

pub struct App {
    /// Cursor row in the catalog.
    pub selected: usize,
    /// Catalog rows marked for a favorites operation.
    pub marked: BTreeSet<usize>,
    /// Paths the catalog was built from; reused by rescan.
    pub selection: Vec<PathBuf>,
    pub favorites_path: PathBuf,
    pub view: PlayerSnapshot,
}

impl App {
    pub fn new(selection: Vec<PathBuf>, favorites_path: PathBuf) -> Self {
        Self {
            selected: 0,
            marked: BTreeSet::new(),
            selection,
            favorites_path,
            view: PlayerSnapshot::default(),
        }
    }

    /// Take in a freshly published snapshot.
    ///
    /// A new catalog invalidates row numbers, so cursor and marks are reset.
    pub fn sync(&mut self, snapshot: PlayerSnapshot) {
        if !Arc::ptr_eq(&self.view.catalog, &snapshot.catalog) {
            self.selected = 0;
            self.marked.clear();
        }
        self.view = snapshot;
    }

    pub fn tracks(&self) -> &[Track] {
        &self.view.catalog
    }

    pub fn has_tracks(&self) -> bool {
        !self.view.catalog.is_empty()
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        let len = self.tracks().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        let len = self.tracks().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn toggle_mark(&mut self) {
        if !self.has_tracks() {
            return;
        }
        if !self.marked.remove(&self.selected) {
            self.marked.insert(self.selected);
        }
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    pub fn clear_marks(&mut self) {
        self.marked.clear();
    }

    /// Marked tracks in catalog order, or the track under the cursor when
    /// nothing is marked.
    pub fn marked_tracks(&self) -> Vec<Track> {
        let tracks = self.tracks();
        if self.marked.is_empty() {
            return tracks.get(self.selected).cloned().into_iter().collect();
        }
        self.marked
            .iter()
            .filter_map(|&i| tracks.get(i).cloned())
            .collect()
    }

    /// Short description of where the catalog came from.
    pub fn selection_label(&self) -> String {
        match self.selection.as_slice() {
            [] => String::new(),
            [one] => one.display().to_string(),
            [first, rest @ ..] => format!("{} (+{} more)", first.display(), rest.len()),
        }
    }
}
