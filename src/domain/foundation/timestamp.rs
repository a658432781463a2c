//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Number of complete 24-hour days elapsed since `earlier`.
    ///
    /// Partial days are truncated; a negative span yields 0.
    pub fn whole_days_since(&self, earlier: &Timestamp) -> i64 {
        self.duration_since(earlier).num_days().max(0)
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs as i64))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn whole_days_truncates_partial_days() {
        let created = at("2024-01-15T10:00:00Z");
        assert_eq!(at("2024-01-16T09:59:59Z").whole_days_since(&created), 0);
        assert_eq!(at("2024-01-16T10:00:00Z").whole_days_since(&created), 1);
        assert_eq!(at("2024-01-17T23:00:00Z").whole_days_since(&created), 2);
    }

    #[test]
    fn whole_days_is_never_negative() {
        let created = at("2024-01-15T10:00:00Z");
        assert_eq!(created.minus_days(3).whole_days_since(&created), 0);
    }

    #[test]
    fn add_days_moves_forward() {
        let ts = at("2024-01-15T10:00:00Z").add_days(2);
        assert_eq!(ts.as_datetime().day(), 17);
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let ts = at("2024-01-15T10:30:00Z");
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15"));
    }

    #[test]
    fn timestamp_ordering_works() {
        let ts1 = at("2024-01-15T10:30:00Z");
        let ts2 = ts1.plus_secs(1);
        assert!(ts1 < ts2);
        assert!(ts1.is_before(&ts2));
    }
}
