use std::time::Duration;

use lofty::prelude::*;

use crate::library::Track;

use super::engine::{MetadataError, MetadataSource};

/// Reads track length from file properties with `lofty`.
///
/// Durations already captured while scanning are reused.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyMetadata;

impl MetadataSource for LoftyMetadata {
    fn duration(&self, track: &Track) -> Result<Duration, MetadataError> {
        if let Some(d) = track.duration.filter(|d| !d.is_zero()) {
            return Ok(d);
        }

        let tagged = lofty::read_from_path(&track.path).map_err(|e| MetadataError {
            path: track.path.clone(),
            reason: e.to_string(),
        })?;
        let d = tagged.properties().duration();
        if d.is_zero() {
            return Err(MetadataError {
                path: track.path.clone(),
                reason: "file reports zero length".to_string(),
            });
        }
        Ok(d)
    }
}
