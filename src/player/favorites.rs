//! Favorites file: one track path per line, sorted, stored as the raw path
//! bytes so names that are not valid UTF-8 survive a round trip.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::library::Track;

/// Write `favorites` to `path`, creating parent directories as needed.
///
/// A path containing a newline cannot be represented and fails the save.
pub fn save(path: &Path, favorites: &BTreeSet<Track>) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut body = Vec::new();
    for track in favorites {
        let bytes = encode(&track.path)?;
        if bytes.contains(&b'\n') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} contains a newline", track.path.display()),
            ));
        }
        body.extend_from_slice(bytes);
        body.push(b'\n');
    }
    fs::write(path, body)
}

/// Read the paths listed in `path`, dropping blank lines and files that no
/// longer exist.
pub fn load(path: &Path) -> io::Result<Vec<PathBuf>> {
    let body = fs::read(path)?;
    let paths = body
        .split(|b| *b == b'\n')
        .map(<[u8]>::trim_ascii)
        .filter(|line| !line.is_empty())
        .filter_map(decode)
        .filter(|p| {
            let exists = p.exists();
            if !exists {
                log::debug!("dropping missing favorite {}", p.display());
            }
            exists
        })
        .collect();
    Ok(paths)
}

#[cfg(unix)]
fn encode(path: &Path) -> io::Result<&[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Ok(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn encode(path: &Path) -> io::Result<&[u8]> {
    path.to_str().map(str::as_bytes).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not valid UTF-8", path.display()),
        )
    })
}

#[cfg(unix)]
fn decode(line: &[u8]) -> Option<PathBuf> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    Some(PathBuf::from(OsStr::from_bytes(line)))
}

#[cfg(not(unix))]
fn decode(line: &[u8]) -> Option<PathBuf> {
    match std::str::from_utf8(line) {
        Ok(s) => Some(PathBuf::from(s)),
        Err(_) => {
            log::debug!("dropping favorite that is not valid UTF-8");
            None
        }
    }
}
