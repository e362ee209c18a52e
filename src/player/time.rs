use std::time::Duration;

/// Format seconds as `m:ss`, flooring fractional seconds.
///
/// Minutes are not wrapped into hours: `3725.0` renders as `"62:05"`.
/// Negative, NaN and infinite inputs render as `"0:00"`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format an optional media duration; unknown durations render as `"0:00"`.
pub fn format_duration(duration: Option<Duration>) -> String {
    duration.map_or_else(|| format_time(0.0), |d| format_time(d.as_secs_f64()))
}
