//! Date range value type

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A date cell value in the unified `{ start, end }` format.
///
/// Timestamps are epoch milliseconds in UTC. Single-date columns keep
/// `end == start`; range columns may differ. Both ends may be `None` for
/// an empty cell.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::types::DateRange;
///
/// let single = DateRange::single(1_700_000_000_000);
/// assert_eq!(single.start, single.end);
/// assert!(DateRange::empty().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRange {
    /// Start timestamp in epoch milliseconds, if set.
    pub start: Option<i64>,
    /// End timestamp in epoch milliseconds, if set.
    pub end: Option<i64>,
}

impl DateRange {
    /// Creates an empty range (both ends unset).
    pub fn empty() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Creates a single-date range where `end == start`.
    pub fn single(timestamp_ms: i64) -> Self {
        Self {
            start: Some(timestamp_ms),
            end: Some(timestamp_ms),
        }
    }

    /// Creates a range from explicit ends.
    pub fn range(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    /// Returns `true` if neither end is set.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Returns the start as a UTC datetime, if set and in range.
    pub fn start_datetime(&self) -> Option<DateTime<Utc>> {
        self.start.and_then(DateTime::from_timestamp_millis)
    }

    /// Returns the end as a UTC datetime, if set and in range.
    pub fn end_datetime(&self) -> Option<DateTime<Utc>> {
        self.end.and_then(DateTime::from_timestamp_millis)
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<DateTime<Utc>> for DateRange {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::single(dt.timestamp_millis())
    }
}
