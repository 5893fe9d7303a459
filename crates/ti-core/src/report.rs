//! Per-task time aggregation.
//!
//! A report groups every entry of a [`WorkLog`] by name, sums the durations and
//! sorts the groups longest first. An optional lookback window (in days) keeps
//! only entries that ended on or after `today - period`.

use std::collections::HashMap;

use chrono::{DateTime, Days, Duration, Local, TimeZone, Utc};

use crate::entry::WorkEntry;
use crate::log::WorkLog;
use crate::span;

/// Accumulated time for one task name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub name: String,
    pub total: Duration,
    /// Whether this is the task currently being worked on.
    pub running: bool,
}

impl ReportRow {
    /// The row total as `1 hour, 2 minutes & 5 seconds`.
    #[must_use]
    pub fn formatted(&self) -> String {
        span::format_compound(self.total)
    }
}

/// Aggregated time per task, longest first.
///
/// Rows with equal totals keep the order in which their names first appear in
/// the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    /// Sum of every row.
    pub total: Duration,
}

impl Report {
    /// Builds a report using the local timezone to decide which day an entry ended on.
    #[must_use]
    pub fn build(log: &WorkLog, period: Option<u32>, now: DateTime<Utc>) -> Self {
        Self::build_in(log, period, now, &Local)
    }

    /// Builds a report, deciding entry dates in `tz`.
    ///
    /// Running entries are measured up to `now` and dated by `now`. Entries on
    /// the interrupt stack are included unless the same interval is already in
    /// the log's entries.
    #[must_use]
    pub fn build_in<Tz: TimeZone>(
        log: &WorkLog,
        period: Option<u32>,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Self {
        let today = now.with_timezone(tz).date_naive();
        // A window reaching past the earliest representable date has no lower bound.
        let window = period.map(|days| today.checked_sub_days(Days::new(u64::from(days))));

        let within_period = |entry: &&WorkEntry| {
            window.is_none_or(|earliest| {
                let ended_on = entry.end.unwrap_or(now).with_timezone(tz).date_naive();
                ended_on <= today && earliest.is_none_or(|earliest| ended_on >= earliest)
            })
        };

        let suspended = log.interrupt_stack().iter().filter(|suspended| {
            !log.entries()
                .iter()
                .any(|entry| entry.same_interval(suspended))
        });

        let mut rows: Vec<ReportRow> = Vec::new();
        let mut index_by_name: HashMap<&str, usize> = HashMap::new();
        for entry in log.entries().iter().chain(suspended).filter(within_period) {
            let duration = entry.duration_at(now);
            if let Some(&index) = index_by_name.get(entry.name.as_str()) {
                rows[index].total += duration;
            } else {
                index_by_name.insert(&entry.name, rows.len());
                rows.push(ReportRow {
                    name: entry.name.clone(),
                    total: duration,
                    running: false,
                });
            }
        }

        if let Some(current) = log.current() {
            for row in rows.iter_mut().filter(|row| row.name == current.name) {
                row.running = true;
            }
        }

        rows.sort_by(|a, b| b.total.cmp(&a.total));
        let total = rows
            .iter()
            .fold(Duration::zero(), |acc, row| acc + row.total);

        tracing::debug!(rows = rows.len(), ?period, "built report");
        Self { rows, total }
    }

    /// The grand total as hours and minutes.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        span::format_total(self.total)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
