use crate::config;

/// Load settings, falling back to defaults on any problem.
///
/// Runs before the logger exists, so problems go to stderr.
pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => s,
            Err(msg) => {
                eprintln!("tunebox: invalid config, using defaults: {msg}");
                config::Settings::default()
            }
        },
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("tunebox: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
