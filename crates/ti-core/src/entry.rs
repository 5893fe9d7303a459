//! A single timed interval on a named sheet.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One interval of work on a named task.
///
/// An entry without `end` is running. Notes and tags may only be attached
/// while the entry is running; [`WorkLog`](crate::WorkLog) enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    /// Raw task name, free of any display decoration.
    pub name: String,
    /// When work started.
    pub start: DateTime<Utc>,
    /// When work stopped, absent while running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// Free-form notes in the order they were added.
    #[serde(default)]
    pub notes: Vec<String>,
    /// Tags attached to this interval.
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl WorkEntry {
    /// Creates a running entry.
    pub fn start(name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            start: at,
            end: None,
            notes: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    /// Stops the entry at `at`.
    pub fn end(&mut self, at: DateTime<Utc>) {
        self.end = Some(at);
    }

    pub fn add_note(&mut self, text: impl Into<String>) {
        self.notes.push(text.into());
    }

    /// Attaches tags, returning how many were not already present.
    pub fn add_tags<I>(&mut self, tags: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        tags.into_iter()
            .map(|tag| self.tags.insert(tag))
            .filter(|inserted| *inserted)
            .count()
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.end.is_none()
    }

    /// Elapsed time measured against `now` when the entry is still running.
    ///
    /// Never negative: a running entry whose start lies after `now` counts as zero.
    #[must_use]
    pub fn duration_at(&self, now: DateTime<Utc>) -> Duration {
        let stop = self.end.unwrap_or(now);
        (stop - self.start).max(Duration::zero())
    }

    /// Elapsed time measured against the wall clock.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration_at(Utc::now())
    }

    /// The latest instant this entry records: its end, or its start while running.
    #[must_use]
    pub fn latest_instant(&self) -> DateTime<Utc> {
        self.end.unwrap_or(self.start)
    }

    /// Whether `other` covers the same named interval.
    pub(crate) fn same_interval(&self, other: &Self) -> bool {
        self.name == other.name && self.start == other.start && self.end == other.end
    }
}
