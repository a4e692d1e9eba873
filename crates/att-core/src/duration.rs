//! Rendering of worked/break/span durations.

use chrono::TimeDelta;

/// Formats a duration as `H:MM:SS` with unpadded hours.
///
/// Negative values keep their sign (`-0:30:00`); sub-second parts are dropped.
pub fn format_duration(delta: TimeDelta) -> String {
    let total = delta.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let secs = total.unsigned_abs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{sign}{hours}:{minutes:02}:{seconds:02}")
}

/// Like [`format_duration`], but renders a zero duration as an empty string.
pub fn format_nonzero(delta: TimeDelta) -> String {
    if delta.is_zero() {
        String::new()
    } else {
        format_duration(delta)
    }
}
