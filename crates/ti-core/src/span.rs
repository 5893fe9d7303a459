//! Human-readable time spans.

use chrono::Duration;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;

/// Formats a duration as hours, minutes and seconds.
///
/// Zero components are omitted and the last two parts are joined with `&`:
/// 3725 seconds renders as `1 hour, 2 minutes & 5 seconds`. A zero or
/// negative duration renders as an empty string.
#[must_use]
pub fn format_compound(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0);
    let hours = secs / SECONDS_PER_HOUR;
    let minutes = (secs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = secs % SECONDS_PER_MINUTE;

    join_parts(&[
        quantity(hours, "hour"),
        quantity(minutes, "minute"),
        quantity(seconds, "second"),
    ])
}

/// Formats a duration as hours and minutes, dropping seconds.
#[must_use]
pub fn format_total(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0);
    let hours = secs / SECONDS_PER_HOUR;
    let minutes = (secs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    join_parts(&[quantity(hours, "hour"), quantity(minutes, "minute")])
}

/// Describes roughly how long ago something started, e.g. `about 3 hours`.
#[must_use]
pub fn humanize_gap(duration: Duration) -> String {
    let mins = duration.num_minutes().max(0);
    match mins {
        0 => "less than a minute".to_string(),
        1 => "a minute".to_string(),
        2..44 => format!("{mins} minutes"),
        44..89 => "about an hour".to_string(),
        89..1439 => format!("about {} hours", (mins / 60).max(2)),
        1439..2519 => "about a day".to_string(),
        2519..43199 => format!("about {} days", (mins / 1440).max(2)),
        43199..86399 => "about a month".to_string(),
        86399..525_599 => format!("about {} months", (mins / 43200).max(2)),
        _ => "more than a year".to_string(),
    }
}

fn quantity(n: i64, unit: &str) -> Option<String> {
    match n {
        0 => None,
        1 => Some(format!("1 {unit}")),
        _ => Some(format!("{n} {unit}s")),
    }
}

/// Joins all but the last part with `, ` and the last with ` & `.
fn join_parts(parts: &[Option<String>]) -> String {
    let parts: Vec<&str> = parts.iter().flatten().map(String::as_str).collect();
    match parts.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{} & {last}", rest.join(", ")),
    }
}
