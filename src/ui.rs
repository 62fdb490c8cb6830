//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::UiSettings;
use crate::player::{Progress, Transport};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("j/k", "up/down"),
        ("space", "mark"),
        ("enter", "play selected"),
        ("r", "play random"),
        ("h/l", "prev/next"),
        ("p", "pause/resume"),
        ("s", "stop"),
        ("+/-", "volume"),
        ("f/F", "add/remove favorite"),
        ("w/o", "save/load favorites"),
        ("R", "rescan"),
        ("q", "quit"),
    ])
});

fn controls_text() -> String {
    let order = [
        "j/k", "space", "enter", "r", "h/l", "p", "s", "+/-", "f/F", "w/o", "R", "q",
    ];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}")))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Gauge ratio and label; a stopped player shows an empty bar.
fn progress_parts(progress: Option<Progress>) -> (f64, String) {
    match progress {
        Some(p) => (p.percent() / 100.0, p.label()),
        None => (0.0, "00:00 / 00:00".to_string()),
    }
}

fn status_line(app: &App) -> String {
    let view = &app.view;
    let mut parts: Vec<String> = Vec::new();

    let transport = match view.transport {
        Transport::Stopped => "Stopped",
        Transport::Playing => "Playing",
        Transport::Paused => "Paused",
    };
    parts.push(format!(" {transport}"));

    if let Some(track) = &view.now_playing {
        parts.push(format!("Song: {}", track.display));
    }
    if view.keep_playing {
        parts.push("Shuffle: ON".to_string());
    }
    parts.push(format!("Vol: {}%", view.volume));
    parts.push(format!("Favs: {}", view.favorites.len()));
    if !app.marked.is_empty() {
        parts.push(format!("Marked: {}", app.marked.len()));
    }

    let dir = app.selection_label();
    if !dir.is_empty() {
        parts.push(format!("Dir: {dir}"));
    }

    parts.join(" • ")
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tunebox ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let mut status = status_line(app);
    if !app.view.status.is_empty() {
        status.push('\n');
        status.push(' ');
        status.push_str(&app.view.status);
    }
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    let (ratio, label) = progress_parts(app.view.progress);
    let gauge = Gauge::default()
        .block(Block::bordered().title(" progress "))
        .gauge_style(Style::default().bold())
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, chunks[2]);

    // Main list
    {
        let tracks = app.tracks();
        let now = app.view.now_playing_index();

        // Only build items for the visible window, centred on the cursor.
        let total = tracks.len();
        let list_height = chunks[3].height.saturating_sub(2) as usize;
        let (start, end) = if total <= list_height || list_height == 0 {
            (0, total)
        } else {
            let half = list_height / 2;
            let mut start = app.selected.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height)
        };

        let items: Vec<ListItem> = (start..end)
            .map(|i| {
                let track = &tracks[i];
                let mark = if app.is_marked(i) { '+' } else { ' ' };
                let fav = if app.view.is_favorite(track) { '★' } else { ' ' };
                let line = format!("{mark}{fav} {}", track.display);
                if now == Some(i) {
                    ListItem::new(line).style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    ListItem::new(line)
                }
            })
            .collect();

        let title = format!(" tracks ({total}) ");
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(app.selected.saturating_sub(start)));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use crate::audio::PlayerSnapshot;
    use crate::library::Track;

    #[test]
    fn stopped_player_shows_empty_progress() {
        assert_eq!(progress_parts(None), (0.0, "00:00 / 00:00".to_string()));

        let p = Progress::new(Duration::from_secs(30), Duration::from_secs(120));
        let (ratio, label) = progress_parts(Some(p));
        assert!((ratio - 0.25).abs() < 1e-9);
        assert_eq!(label, "00:30 / 02:00");
    }

    #[test]
    fn controls_list_every_binding() {
        let text = controls_text();
        for key in ["[space] mark", "[r] play random", "[w/o]", "[q] quit"] {
            assert!(text.contains(key), "missing {key} in {text}");
        }
    }

    #[test]
    fn status_line_reflects_snapshot() {
        let mut app = App::new(vec![PathBuf::from("/m")], PathBuf::from("/tmp/f.fav"));
        app.sync(PlayerSnapshot {
            catalog: vec![Track::from_path("/m/a.mp3")].into(),
            now_playing: Some(Track::from_path("/m/a.mp3")),
            transport: Transport::Paused,
            keep_playing: true,
            volume: 40,
            ..PlayerSnapshot::default()
        });

        let line = status_line(&app);
        assert!(line.starts_with(" Paused"));
        assert!(line.contains("Song: a"));
        assert!(line.contains("Shuffle: ON"));
        assert!(line.contains("Vol: 40%"));
        assert!(line.contains("Dir: /m"));
    }
}
