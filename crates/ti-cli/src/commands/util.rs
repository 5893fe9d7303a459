//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone, Utc};
use regex::Regex;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(second|minute|hour|day|week)s?\s+ago$").unwrap()
});

/// Conservative bounds for relative time parsing (~1000 years in seconds).
const MAX_RELATIVE_SECONDS: i64 = 1000 * 365 * 24 * 60 * 60;

/// Parse a time override relative to the wall clock.
pub fn parse_datetime(s: &str) -> anyhow::Result<DateTime<Utc>> {
    parse_datetime_at(s, Utc::now())
}

/// Parse a time override as RFC 3339, a local `HH:MM` today, or relative time.
///
/// Supports:
/// - RFC 3339: "2026-01-15T10:30:00Z"
/// - Clock time: "09:30" (today, local time)
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_datetime_at(s: &str, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();

    if s == "now" {
        return Ok(now);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(time) = NaiveTime::parse_from_str(s, "%H:%M") {
        let local_day = now.with_timezone(&Local).date_naive();
        let local = Local
            .from_local_datetime(&local_day.and_time(time))
            .earliest()
            .with_context(|| format!("{s} does not exist today in the local timezone"))?;
        return Ok(local.with_timezone(&Utc));
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        anyhow::bail!(
            "Invalid time: {s}. Use RFC 3339 (e.g., 2026-01-15T10:30:00Z), HH:MM, or relative (e.g., '2 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, seconds_per_unit) = match &caps[2] {
        "second" => (MAX_RELATIVE_SECONDS, 1),
        "minute" => (MAX_RELATIVE_SECONDS / 60, 60),
        "hour" => (MAX_RELATIVE_SECONDS / (60 * 60), 60 * 60),
        "day" => (MAX_RELATIVE_SECONDS / (60 * 60 * 24), 60 * 60 * 24),
        "week" => (MAX_RELATIVE_SECONDS / (60 * 60 * 24 * 7), 60 * 60 * 24 * 7),
        unit => anyhow::bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        anyhow::bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    // In range for Duration after the check above
    let duration = Duration::seconds(n * seconds_per_unit);
    Ok(now - duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_datetime_at("2026-03-10T10:30:00+02:00", now()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 3, 10, 8, 30, 0).unwrap());
    }

    #[test]
    fn parses_relative_units() {
        let cases = [
            ("30 seconds ago", Duration::seconds(30)),
            ("1 minute ago", Duration::minutes(1)),
            ("45 minutes ago", Duration::minutes(45)),
            ("2 hours ago", Duration::hours(2)),
            ("1 day ago", Duration::days(1)),
            ("3 weeks ago", Duration::weeks(3)),
        ];
        for (input, expected) in cases {
            assert_eq!(
                parse_datetime_at(input, now()).unwrap(),
                now() - expected,
                "parsing {input}"
            );
        }
    }

    #[test]
    fn parses_now() {
        assert_eq!(parse_datetime_at("now", now()).unwrap(), now());
    }

    #[test]
    fn parses_clock_time_as_local_today() {
        let parsed = parse_datetime_at("09:15", now()).unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.date_naive(), now().with_timezone(&Local).date_naive());
        assert_eq!(local.time(), NaiveTime::from_hms_opt(9, 15, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_datetime_at("yesterday-ish", now()).unwrap_err();
        assert!(err.to_string().contains("Invalid time"));
        assert!(parse_datetime_at("25:00", now()).is_err());
    }

    #[test]
    fn rejects_huge_relative_values() {
        let err = parse_datetime_at("99999999999 weeks ago", now()).unwrap_err();
        assert!(err.to_string().contains("too large"));

        let err = parse_datetime_at("99999999999 seconds ago", now()).unwrap_err();
        assert!(err.to_string().contains("too large: 99999999999 second"), "{err}");
    }
}
