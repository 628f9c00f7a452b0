//! Client analytics batches.
//!
//! Browsers post batches of events or page views; the server validates the
//! envelope and forwards it to an `AnalyticsSink`. Individual entries are
//! opaque JSON objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Largest number of entries accepted in one batch.
pub const MAX_BATCH_SIZE: usize = 500;

/// What a batch contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsKind {
    Events,
    PageViews,
}

impl AnalyticsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsKind::Events => "events",
            AnalyticsKind::PageViews => "page_views",
        }
    }
}

/// A validated analytics batch.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsBatch {
    pub kind: AnalyticsKind,
    pub entries: Vec<Value>,
    /// Client-side send time.
    pub sent_at: Timestamp,
    pub received_at: Timestamp,
}

impl AnalyticsBatch {
    /// Validates a raw `{type, data, timestamp}` payload.
    ///
    /// `timestamp` may be Unix milliseconds or an RFC 3339 string.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let obj = payload
            .as_object()
            .ok_or_else(|| ValidationError::invalid_format("body", "expected a JSON object"))?;

        let kind = match obj.get("type").and_then(Value::as_str) {
            Some("events") => AnalyticsKind::Events,
            Some("page_views") => AnalyticsKind::PageViews,
            Some(other) => {
                return Err(ValidationError::invalid_format(
                    "type",
                    format!("expected events or page_views, got '{}'", other),
                ))
            }
            None => return Err(ValidationError::empty_field("type")),
        };

        let entries = match obj.get("data") {
            Some(Value::Array(items)) => items.clone(),
            Some(_) => return Err(ValidationError::invalid_format("data", "expected an array")),
            None => return Err(ValidationError::empty_field("data")),
        };
        if entries.len() > MAX_BATCH_SIZE {
            return Err(ValidationError::out_of_range(
                "data",
                0,
                MAX_BATCH_SIZE as i64,
                entries.len() as i64,
            ));
        }

        let sent_at = match obj.get("timestamp") {
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(Timestamp::from_unix_millis)
                .ok_or_else(|| {
                    ValidationError::invalid_format("timestamp", "out of range")
                })?,
            Some(Value::String(s)) => chrono::DateTime::parse_from_rfc3339(s)
                .map(|dt| Timestamp::from_datetime(dt.with_timezone(&chrono::Utc)))
                .map_err(|e| ValidationError::invalid_format("timestamp", e.to_string()))?,
            Some(_) => {
                return Err(ValidationError::invalid_format(
                    "timestamp",
                    "expected milliseconds or an RFC 3339 string",
                ))
            }
            None => return Err(ValidationError::empty_field("timestamp")),
        };

        Ok(Self {
            kind,
            entries,
            sent_at,
            received_at: Timestamp::now(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_event_batch_with_millis() {
        let batch = AnalyticsBatch::from_payload(&json!({
            "type": "events",
            "data": [{ "name": "click" }, { "name": "view" }],
            "timestamp": 1_705_276_800_000i64
        }))
        .unwrap();
        assert_eq!(batch.kind, AnalyticsKind::Events);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.sent_at.as_unix_secs(), 1_705_276_800);
    }

    #[test]
    fn accepts_page_views_with_rfc3339() {
        let batch = AnalyticsBatch::from_payload(&json!({
            "type": "page_views",
            "data": [],
            "timestamp": "2024-01-15T10:30:00Z"
        }))
        .unwrap();
        assert_eq!(batch.kind, AnalyticsKind::PageViews);
        assert!(batch.is_empty());
    }

    #[test]
    fn rejects_unknown_type() {
        let err = AnalyticsBatch::from_payload(&json!({
            "type": "clicks", "data": [], "timestamp": 1
        }))
        .unwrap_err();
        assert_eq!(err.field(), "type");
    }

    #[test]
    fn rejects_non_array_data() {
        let err = AnalyticsBatch::from_payload(&json!({
            "type": "events", "data": {"a": 1}, "timestamp": 1
        }))
        .unwrap_err();
        assert_eq!(err.field(), "data");
    }

    #[test]
    fn rejects_missing_timestamp() {
        let err = AnalyticsBatch::from_payload(&json!({ "type": "events", "data": [] })).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("timestamp"));
    }

    #[test]
    fn rejects_oversized_batch() {
        let data: Vec<Value> = (0..=MAX_BATCH_SIZE).map(|i| json!({ "i": i })).collect();
        let err = AnalyticsBatch::from_payload(&json!({
            "type": "events", "data": data, "timestamp": 1
        }))
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn rejects_non_object_body() {
        assert!(AnalyticsBatch::from_payload(&json!([1, 2])).is_err());
    }
}
