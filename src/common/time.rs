use chrono::{Local, Utc};

/// Get current Unix timestamp in milliseconds (UTC).
///
/// Liveness comparisons only ever subtract two of these values, so the
/// timezone is irrelevant as long as it is consistent.
pub fn get_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format the current wall clock as `HH:MM:SS` in server local time.
///
/// This is the display-only `time` field carried by chat messages.
pub fn clock_time_now() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
