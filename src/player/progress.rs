use std::time::Duration;

/// Format seconds as `MM:SS`, truncating fractions.
///
/// Negative and non-finite input formats as `00:00`.
pub fn format_time(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// One sample of playback position against the track length.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Progress {
    pub elapsed: Duration,
    /// Zero when the length is unknown.
    pub total: Duration,
}

impl Progress {
    pub fn new(elapsed: Duration, total: Duration) -> Self {
        Self { elapsed, total }
    }

    /// Percentage in `0.0..=100.0`; 0 when the length is unknown.
    pub fn percent(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        (100.0 * self.elapsed.as_secs_f64() / self.total.as_secs_f64()).clamp(0.0, 100.0)
    }

    /// `elapsed / total`, or just the elapsed time when the length is unknown.
    pub fn label(&self) -> String {
        let elapsed = format_time(self.elapsed.as_secs_f64());
        if self.total.is_zero() {
            elapsed
        } else {
            format!("{elapsed} / {}", format_time(self.total.as_secs_f64()))
        }
    }
}
