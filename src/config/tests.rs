use super::load::{default_config_path, default_favorites_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_tunebox_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TUNEBOX_CONFIG_PATH", "/tmp/tunebox-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/tunebox-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home/tunebox/config.toml")
    );
}

#[test]
fn default_paths_fall_back_to_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::remove("XDG_DATA_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.config/tunebox/config.toml")
    );
    assert_eq!(
        default_favorites_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/share/tunebox/favorites.fav")
    );
}

#[test]
fn favorites_path_prefers_configured_file() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_DATA_HOME", "/tmp/xdg-data");

    let mut s = Settings::default();
    assert_eq!(
        s.favorites_path().unwrap(),
        PathBuf::from("/tmp/xdg-data/tunebox/favorites.fav")
    );

    s.favorites.path = Some(PathBuf::from("/tmp/mine.fav"));
    assert_eq!(s.favorites_path().unwrap(), PathBuf::from("/tmp/mine.fav"));
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
initial_volume = 80
poll_interval_ms = 250
progress_interval_ms = 2000

[playback]
shuffle_seed = 42
clear_track_on_stop = false

[favorites]
path = "/tmp/favs.fav"
autoplay_on_load = false

[ui]
header_text = "hello"
volume_step = 10

[library]
extensions = ["mp3"]
recursive = false
display_fields = ["filename"]
display_separator = "::"

[log]
level = "debug"
file = "/tmp/tunebox.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNEBOX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TUNEBOX__AUDIO__POLL_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 80);
    assert_eq!(s.audio.poll_interval_ms, 250);
    assert_eq!(s.audio.progress_interval_ms, 2000);
    assert_eq!(s.playback.shuffle_seed, Some(42));
    assert!(!s.playback.clear_track_on_stop);
    assert_eq!(s.favorites.path, Some(PathBuf::from("/tmp/favs.fav")));
    assert!(!s.favorites.autoplay_on_load);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.volume_step, 10);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(matches!(s.library.display_fields[0], TrackDisplayField::Filename));
    assert_eq!(s.log.level, "debug");
    assert_eq!(s.log.file, Some(PathBuf::from("/tmp/tunebox.log")));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "[audio]\npoll_interval_ms = 250\n").unwrap();

    let _g1 = EnvGuard::set("TUNEBOX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TUNEBOX__AUDIO__POLL_INTERVAL_MS", "100");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.poll_interval_ms, 100);
    // untouched keys keep their defaults
    assert_eq!(s.audio.progress_interval_ms, 1000);
}

#[test]
fn partial_toml_keeps_defaults_for_missing_sections() {
    let s: Settings = toml::from_str("[playback]\nshuffle_seed = 7\n").unwrap();
    assert_eq!(s.playback.shuffle_seed, Some(7));
    assert!(s.playback.clear_track_on_stop);
    assert_eq!(s.audio.initial_volume, 30);
    assert!(s.favorites.autoplay_on_load);
    assert!(s.log.file.is_none());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.audio.initial_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.poll_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.progress_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.volume_step = 0;
    assert!(s.validate().is_err());
}
