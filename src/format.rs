//! Text formatting for time labels and on-screen indicators.

/// Format seconds as `m:ss`, or `h:mm:ss` when `show_hours` is set.
///
/// Negative and non-finite inputs render as zero.
pub fn format_time_label(seconds: f64, show_hours: bool) -> String {
    let secs = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let secs = secs % 60;

    if show_hours {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        // Minutes keep counting past the hour, like the desktop bar expects.
        format!("{}:{:02}", hours * 60 + minutes, secs)
    }
}

/// Playback rate indicator, e.g. `1.25x`.
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}x", rate)
}

/// Volume indicator, e.g. `80%`.
pub fn format_volume_percent(volume: f64) -> String {
    format!("{}%", (volume * 100.0).round() as i64)
}
