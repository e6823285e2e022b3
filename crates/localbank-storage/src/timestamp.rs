//! Stored timestamp representation and normalization.
//!
//! Documents carry timestamps as `{ "seconds": i64, "nanos": u32 }` objects.
//! Older or foreign records may instead hold RFC 3339 strings, epoch
//! milliseconds, or the `_seconds`/`_nanoseconds` export form. [`normalize`]
//! accepts all of them.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Seconds + nanoseconds since the Unix epoch, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole seconds.
    pub seconds: i64,
    /// Sub-second nanoseconds, `0..1_000_000_000`.
    pub nanos: u32,
}

impl Timestamp {
    /// The current time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Convert from a chrono UTC datetime.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos(),
        }
    }

    /// Convert to a chrono UTC datetime. `None` if out of range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanos)
    }

    /// The stored JSON form.
    pub fn to_value(&self) -> Value {
        serde_json::json!({ "seconds": self.seconds, "nanos": self.nanos })
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

/// Normalize any supported stored timestamp form to a UTC datetime.
pub fn normalize(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Object(map) => {
            let (seconds, nanos) = match (map.get("seconds"), map.get("_seconds")) {
                (Some(s), _) => (s, map.get("nanos")),
                (None, Some(s)) => (s, map.get("_nanoseconds")),
                (None, None) => return None,
            };
            let seconds = seconds.as_i64()?;
            let nanos = match nanos {
                Some(n) => u32::try_from(n.as_u64()?).ok()?,
                None => 0,
            };
            DateTime::from_timestamp(seconds, nanos)
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
        _ => None,
    }
}

/// Order two stored values: timestamps chronologically (across forms), then
/// numbers, then strings. Incomparable values are equal.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    if let (Some(x), Some(y)) = (normalize(a), normalize(b)) {
        return x.cmp(&y);
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
