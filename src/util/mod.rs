use std::sync::atomic::{AtomicUsize, Ordering};

use time::{macros::format_description, OffsetDateTime};

pub mod assets;
pub mod persistence;
pub mod version;

static ID_COUNTER: AtomicUsize = AtomicUsize::new(1);

pub fn generate_id(prefix: &str) -> String {
    let value = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{value}")
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
}

/// `HH:MM` (UTC) for an epoch-millisecond timestamp, or an empty string when
/// the value is out of range.
pub fn format_time_of_day(millis: i64) -> String {
    let format = format_description!("[hour]:[minute]");
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .ok()
        .and_then(|moment| moment.format(&format).ok())
        .unwrap_or_default()
}
