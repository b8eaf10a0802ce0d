//! Time formatting helpers.

use dirvote_types::TimestampMs;

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// How long before `now` the instant `then` was, e.g. `"3h 5m ago"`.
/// Instants in the future read as `"in the future"`.
pub fn format_age(now: TimestampMs, then: TimestampMs) -> String {
    match now.as_millis().checked_sub(then.as_millis()) {
        Some(ms) => format!("{} ago", format_duration(ms / 1000)),
        None => "in the future".to_string(),
    }
}
