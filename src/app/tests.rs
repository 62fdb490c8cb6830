use super::*;
use crate::audio::PlayerSnapshot;
use crate::library::Track;
use std::path::PathBuf;
use std::sync::Arc;

fn t(path: &str) -> Track {
    Track::from_path(path)
}

fn snapshot(paths: &[&str]) -> PlayerSnapshot {
    PlayerSnapshot {
        catalog: paths.iter().map(|p| t(p)).collect::<Vec<_>>().into(),
        ..PlayerSnapshot::default()
    }
}

fn app_with(paths: &[&str]) -> App {
    let mut app = App::new(vec![PathBuf::from("/m")], PathBuf::from("/tmp/favs.fav"));
    app.sync(snapshot(paths));
    app
}

#[test]
fn cursor_wraps_both_ways() {
    let mut app = app_with(&["/m/a.mp3", "/m/b.mp3", "/m/c.mp3"]);

    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.next();
    assert_eq!(app.selected, 1);
}

#[test]
fn cursor_stays_put_without_tracks() {
    let mut app = app_with(&[]);
    app.next();
    app.prev();
    app.toggle_mark();
    assert_eq!(app.selected, 0);
    assert!(app.marked.is_empty());
    assert!(app.marked_tracks().is_empty());
}

#[test]
fn marked_tracks_fall_back_to_cursor() {
    let mut app = app_with(&["/m/a.mp3", "/m/b.mp3", "/m/c.mp3"]);
    app.selected = 1;
    assert_eq!(app.marked_tracks(), vec![t("/m/b.mp3")]);

    app.toggle_mark();
    app.selected = 2;
    app.toggle_mark();
    app.selected = 0;
    assert_eq!(app.marked_tracks(), vec![t("/m/b.mp3"), t("/m/c.mp3")]);

    app.selected = 1;
    app.toggle_mark();
    assert!(!app.is_marked(1));
    assert_eq!(app.marked_tracks(), vec![t("/m/c.mp3")]);
}

#[test]
fn new_catalog_resets_cursor_and_marks() {
    let mut app = app_with(&["/m/a.mp3", "/m/b.mp3"]);
    app.selected = 1;
    app.toggle_mark();

    let same = PlayerSnapshot {
        catalog: Arc::clone(&app.view.catalog),
        status: "Paused".to_string(),
        ..PlayerSnapshot::default()
    };
    app.sync(same);
    assert_eq!(app.selected, 1);
    assert!(app.is_marked(1));
    assert_eq!(app.view.status, "Paused");

    app.sync(snapshot(&["/m/a.mp3", "/m/b.mp3"]));
    assert_eq!(app.selected, 0);
    assert!(app.marked.is_empty());
}

#[test]
fn selection_label_summarizes_paths() {
    let mut app = app_with(&[]);
    assert_eq!(app.selection_label(), "/m");

    app.selection = vec![PathBuf::from("/m"), PathBuf::from("/x"), PathBuf::from("/y")];
    assert_eq!(app.selection_label(), "/m (+2 more)");

    app.selection.clear();
    assert_eq!(app.selection_label(), "");
}
