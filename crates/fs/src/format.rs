use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use filedock_runtime::DISPLAY_TIME_FORMAT;

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const SIZE_STEP: u64 = 1024;

/// Human-readable size with binary steps, e.g. `1536` -> `1.5 KB`.
///
/// The unit is `floor(log1024(bytes))`, clamped to TB so that very large
/// values render as a big TB count instead of running off the unit table.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let mut exp = 0;
    let mut scaled = bytes;
    while scaled >= SIZE_STEP && exp < SIZE_UNITS.len() - 1 {
        scaled /= SIZE_STEP;
        exp += 1;
    }

    let value = bytes as f64 / (SIZE_STEP as f64).powi(exp as i32);
    format!("{} {}", two_decimals_trimmed(value), SIZE_UNITS[exp])
}

/// Round to two decimals (ties away from zero) and drop trailing zeros:
/// 1.50 -> 1.5, 1.00 -> 1, 1.125 -> 1.13.
fn two_decimals_trimmed(value: f64) -> String {
    // `{:.2}` alone would round exact ties to even.
    let rounded = (value * 100.0).round() / 100.0;
    let fixed = format!("{rounded:.2}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}

/// Display string for a timestamp in the local time zone.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    format_timestamp_in(ts, &Local)
}

pub fn format_timestamp_in<Tz>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format(DISPLAY_TIME_FORMAT).to_string()
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
