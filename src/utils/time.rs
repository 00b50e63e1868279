use crate::error::{Error, PlanResult};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Convert epoch seconds to a UTC timestamp
pub fn seconds_to_datetime(seconds: i64) -> PlanResult<DateTime<Utc>> {
    match Utc.timestamp_opt(seconds, 0) {
        chrono::LocalResult::Single(dt) => Ok(dt),
        _ => Err(Error::Other(format!(
            "Epoch seconds out of range: {}",
            seconds
        ))),
    }
}

/// Render a UTC timestamp in the given timezone, minute precision
pub fn format_local(dt: &DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%d.%m.%Y %H:%M").to_string()
}
