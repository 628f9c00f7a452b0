//! UTC timestamps for balances, ledger rows and analytics batches.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A point in time, always UTC. Serializes as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// For binding into SQL parameters.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Browser clients send `Date.now()`. `None` outside chrono's range.
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Shifts by whole days; negative moves into the past.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_rfc3339_string() {
        let ts = Timestamp::from_unix_millis(1_705_312_200_000).unwrap();
        assert_eq!(
            serde_json::to_value(ts).unwrap(),
            serde_json::json!("2024-01-15T09:50:00Z")
        );
    }

    #[test]
    fn browser_millis_round_to_seconds() {
        let ts = Timestamp::from_unix_millis(1_705_276_800_999).unwrap();
        assert_eq!(ts.as_unix_secs(), 1_705_276_800);
    }

    #[test]
    fn out_of_range_millis_are_rejected() {
        assert!(Timestamp::from_unix_millis(i64::MAX).is_none());
    }

    #[test]
    fn negative_days_move_backwards() {
        let now = Timestamp::now();
        assert!(now.add_days(-3) < now);
    }
}
