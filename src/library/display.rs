use std::path::Path;

use crate::config::TrackDisplayField;

/// Text contributed by one display field, or `None` when the field is blank.
fn field_text(
    field: TrackDisplayField,
    path: &Path,
    title: &str,
    artist: Option<&str>,
    album: Option<&str>,
) -> Option<String> {
    let non_blank = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    match field {
        TrackDisplayField::Display => {
            let parts: Vec<String> = [artist, Some(title)]
                .into_iter()
                .flatten()
                .filter_map(non_blank)
                .collect();
            (!parts.is_empty()).then(|| parts.join(" - "))
        }
        TrackDisplayField::Title => non_blank(title),
        TrackDisplayField::Artist => artist.and_then(non_blank),
        TrackDisplayField::Album => album.and_then(non_blank),
        TrackDisplayField::Filename => path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(non_blank),
        TrackDisplayField::Path => Some(path.display().to_string()),
    }
}

/// Build the list label for a track from the configured `fields`, joined by `sep`.
///
/// Falls back to `title` when every field is blank.
pub fn display_from_fields(
    path: &Path,
    title: &str,
    artist: Option<&str>,
    album: Option<&str>,
    fields: &[TrackDisplayField],
    sep: &str,
) -> String {
    let parts: Vec<String> = fields
        .iter()
        .filter_map(|&f| field_text(f, path, title, artist, album))
        .collect();

    if parts.is_empty() {
        title.to_string()
    } else {
        parts.join(sep)
    }
}
