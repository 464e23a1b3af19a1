//! Date/time utilities for Postboard.

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Default display format for timestamps in HTML pages.
pub const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Format a DateTime<Utc> in the specified timezone.
///
/// Falls back to UTC when the timezone name is unknown.
pub fn format_utc_datetime(dt: &DateTime<Utc>, timezone: &str, format: &str) -> String {
    let tz: Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => return dt.format(format).to_string(),
    };
    dt.with_timezone(&tz).format(format).to_string()
}

/// Format a DateTime<Utc> with the default display format.
pub fn format_display(dt: &DateTime<Utc>, timezone: &str) -> String {
    format_utc_datetime(dt, timezone, DISPLAY_FORMAT)
}

/// Format a DateTime<Utc> as RFC3339 with second precision and a `Z` suffix.
pub fn to_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an RFC3339 string into a DateTime<Utc>.
pub fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
