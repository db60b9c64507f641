//! Timestamp formatting for the control surface.

/// Format a position or duration as `M:SS`.
///
/// Minutes run unbounded (61:05 rather than 1:01:05) and seconds are
/// zero-padded. Negative, NaN, and infinite inputs all render as the
/// placeholder `0:00` so a half-initialized session never shows garbage.
pub fn format_timestamp(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// The `position / duration` readout shown next to the progress bar.
pub fn format_time_readout(position_seconds: f64, duration_seconds: f64) -> String {
    format!(
        "{} / {}",
        format_timestamp(position_seconds),
        format_timestamp(duration_seconds)
    )
}
