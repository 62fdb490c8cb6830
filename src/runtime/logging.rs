use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use env_logger::{Env, Target};

use crate::config::LogSettings;

/// Open `path` for appending, creating it and its parent directory.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger.
///
/// The terminal belongs to the UI, so records only go somewhere when
/// `log.file` is set. `RUST_LOG` takes precedence over `log.level`.
pub fn init(settings: &LogSettings) {
    let Some(path) = settings.file.as_deref() else {
        return;
    };

    let file = match open_log_file(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("tunebox: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(settings.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .try_init();
    log::info!("logging to {}", path.display());
}
