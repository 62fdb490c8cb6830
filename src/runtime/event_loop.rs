use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{AudioPlayer, PlayerCmd};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::Transport;
use crate::runtime::mpris_sync::MprisMirror;
use crate::runtime::startup;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    pub mpris: MprisMirror,
}

/// What a key press asks the runtime to do.
#[derive(Debug)]
enum KeyAction {
    Nothing,
    Send(PlayerCmd),
    Rescan,
    Quit,
}

/// Main terminal event loop: draws the latest snapshot, forwards input to the
/// player thread and keeps MPRIS in sync. Returns `Ok(())` when shutdown is
/// requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.sync(audio_player.snapshot());

        // Changes can come from auto-advance as well as from us.
        state.mpris.update(mpris, &app.view);

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            match control_to_player(&cmd, app) {
                Some(PlayerCmd::Quit) => return Ok(()),
                Some(pc) => send(audio_player, pc),
                None => {}
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key_event(key, settings, app) {
                    KeyAction::Nothing => {}
                    KeyAction::Send(pc) => send(audio_player, pc),
                    KeyAction::Rescan => {
                        startup::send_catalog(audio_player, &app.selection, &settings.library)
                    }
                    KeyAction::Quit => break,
                }
            }
        }
    }

    Ok(())
}

fn send(audio_player: &AudioPlayer, cmd: PlayerCmd) {
    if let Err(e) = audio_player.send(cmd) {
        log::error!("player thread is gone, dropped {:?}", e.0);
    }
}

/// Map an MPRIS request onto the player, given what the UI last saw.
fn control_to_player(cmd: &ControlCmd, app: &App) -> Option<PlayerCmd> {
    let play_cursor = || app.has_tracks().then(|| PlayerCmd::PlaySelected(app.selected));

    match (cmd, app.view.transport) {
        (ControlCmd::Quit, _) => Some(PlayerCmd::Quit),
        (ControlCmd::Play, Transport::Paused) => Some(PlayerCmd::PauseResume),
        (ControlCmd::Play, Transport::Stopped) => play_cursor(),
        (ControlCmd::Play, Transport::Playing) => None,
        (ControlCmd::Pause, Transport::Playing) => Some(PlayerCmd::PauseResume),
        (ControlCmd::Pause, _) => None,
        (ControlCmd::PlayPause, Transport::Stopped) => play_cursor(),
        (ControlCmd::PlayPause, _) => Some(PlayerCmd::PauseResume),
        (ControlCmd::Stop, _) => Some(PlayerCmd::Stop),
        (ControlCmd::Next, _) => Some(PlayerCmd::Next),
        (ControlCmd::Prev, _) => Some(PlayerCmd::Prev),
    }
}

fn handle_key_event(key: KeyEvent, settings: &config::Settings, app: &mut App) -> KeyAction {
    let step = settings.ui.volume_step;

    let cmd = match key.code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('R') => return KeyAction::Rescan,
        KeyCode::Char('j') | KeyCode::Down => {
            app.next();
            return KeyAction::Nothing;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.prev();
            return KeyAction::Nothing;
        }
        KeyCode::Char(' ') => {
            app.toggle_mark();
            return KeyAction::Nothing;
        }
        KeyCode::Enter if app.has_tracks() => PlayerCmd::PlaySelected(app.selected),
        KeyCode::Char('r') => PlayerCmd::PlayRandom,
        KeyCode::Char('h') => PlayerCmd::Prev,
        KeyCode::Char('l') => PlayerCmd::Next,
        KeyCode::Char('p') => PlayerCmd::PauseResume,
        KeyCode::Char('s') => PlayerCmd::Stop,
        KeyCode::Char('+') | KeyCode::Char('=') => PlayerCmd::AdjustVolume(i32::from(step)),
        KeyCode::Char('-') => PlayerCmd::AdjustVolume(-i32::from(step)),
        KeyCode::Char('f') => {
            let picked = app.marked_tracks();
            app.clear_marks();
            PlayerCmd::AddFavorites(picked)
        }
        KeyCode::Char('F') => {
            let picked = app.marked_tracks();
            app.clear_marks();
            PlayerCmd::RemoveFavorites(picked)
        }
        KeyCode::Char('w') => PlayerCmd::SaveFavorites(app.favorites_path.clone()),
        KeyCode::Char('o') => PlayerCmd::LoadFavorites(app.favorites_path.clone()),
        _ => return KeyAction::Nothing,
    };

    KeyAction::Send(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crossterm::event::KeyModifiers;

    use crate::audio::PlayerSnapshot;
    use crate::library::Track;

    fn app(transport: Transport) -> App {
        let mut app = App::new(vec![PathBuf::from("/m")], PathBuf::from("/tmp/favs.fav"));
        app.sync(PlayerSnapshot {
            catalog: vec![Track::from_path("/m/a.mp3"), Track::from_path("/m/b.mp3")].into(),
            transport,
            volume: 50,
            ..PlayerSnapshot::default()
        });
        app.selected = 1;
        app
    }

    fn press(app: &mut App, code: KeyCode) -> KeyAction {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        handle_key_event(key, &config::Settings::default(), app)
    }

    #[test]
    fn play_resumes_when_paused_and_starts_cursor_when_stopped() {
        assert!(matches!(
            control_to_player(&ControlCmd::Play, &app(Transport::Paused)),
            Some(PlayerCmd::PauseResume)
        ));
        assert!(matches!(
            control_to_player(&ControlCmd::Play, &app(Transport::Stopped)),
            Some(PlayerCmd::PlaySelected(1))
        ));
        assert!(control_to_player(&ControlCmd::Play, &app(Transport::Playing)).is_none());
    }

    #[test]
    fn pause_only_acts_while_playing() {
        assert!(control_to_player(&ControlCmd::Pause, &app(Transport::Paused)).is_none());
        assert!(matches!(
            control_to_player(&ControlCmd::Pause, &app(Transport::Playing)),
            Some(PlayerCmd::PauseResume)
        ));
    }

    #[test]
    fn play_pause_on_empty_catalog_does_nothing() {
        let empty = App::new(Vec::new(), PathBuf::from("/tmp/favs.fav"));
        assert!(control_to_player(&ControlCmd::PlayPause, &empty).is_none());
        assert!(matches!(
            control_to_player(&ControlCmd::Quit, &empty),
            Some(PlayerCmd::Quit)
        ));
    }

    #[test]
    fn volume_keys_send_relative_steps() {
        let mut app = app(Transport::Playing);
        assert!(matches!(
            press(&mut app, KeyCode::Char('+')),
            KeyAction::Send(PlayerCmd::AdjustVolume(5))
        ));
        assert!(matches!(
            press(&mut app, KeyCode::Char('+')),
            KeyAction::Send(PlayerCmd::AdjustVolume(5))
        ));
        assert!(matches!(
            press(&mut app, KeyCode::Char('-')),
            KeyAction::Send(PlayerCmd::AdjustVolume(-5))
        ));
    }

    #[test]
    fn favorite_keys_use_marks_then_clear_them() {
        let mut app = app(Transport::Stopped);
        app.selected = 0;
        press(&mut app, KeyCode::Char(' '));
        app.selected = 1;
        press(&mut app, KeyCode::Char(' '));

        match press(&mut app, KeyCode::Char('f')) {
            KeyAction::Send(PlayerCmd::AddFavorites(tracks)) => assert_eq!(tracks.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
        assert!(app.marked.is_empty());

        match press(&mut app, KeyCode::Char('F')) {
            KeyAction::Send(PlayerCmd::RemoveFavorites(tracks)) => {
                assert_eq!(tracks, vec![Track::from_path("/m/b.mp3")])
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn persistence_keys_target_the_favorites_file() {
        let mut app = app(Transport::Stopped);
        match press(&mut app, KeyCode::Char('w')) {
            KeyAction::Send(PlayerCmd::SaveFavorites(p)) => {
                assert_eq!(p, PathBuf::from("/tmp/favs.fav"))
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            press(&mut app, KeyCode::Char('o')),
            KeyAction::Send(PlayerCmd::LoadFavorites(_))
        ));
    }

    #[test]
    fn navigation_and_lifecycle_keys() {
        let mut app = app(Transport::Stopped);
        assert!(matches!(press(&mut app, KeyCode::Char('j')), KeyAction::Nothing));
        assert_eq!(app.selected, 0);
        assert!(matches!(
            press(&mut app, KeyCode::Enter),
            KeyAction::Send(PlayerCmd::PlaySelected(0))
        ));
        assert!(matches!(
            press(&mut app, KeyCode::Char('r')),
            KeyAction::Send(PlayerCmd::PlayRandom)
        ));
        assert!(matches!(press(&mut app, KeyCode::Char('R')), KeyAction::Rescan));
        assert!(matches!(press(&mut app, KeyCode::Char('q')), KeyAction::Quit));
    }
}
