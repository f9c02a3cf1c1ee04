//! The envelope persisted around every stored value.

use std::time::Duration;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Wrapper persisted in the backend around a caller-supplied value.
///
/// Serialized as `{"saveTime": ..., "expireDate": ... | null, "value": ...}`
/// with RFC 3339 timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<V = serde_json::Value> {
    /// When the value was written.
    pub save_time: DateTime<Utc>,

    /// When the value expires. `None` means it never does.
    pub expire_date: Option<DateTime<Utc>>,

    /// The wrapped value.
    pub value: V,
}

impl<V> Envelope<V> {
    /// Wrap `value`, stamping it with the current time.
    pub fn new(value: V, expire: Option<Duration>) -> Self {
        let now = now();
        Self {
            save_time: now,
            expire_date: expire_date_from(now, expire),
            value,
        }
    }

    /// Wrap `value` with an explicit expiration date.
    pub fn with_expire_date(value: V, expire_date: Option<DateTime<Utc>>) -> Self {
        Self {
            save_time: now(),
            expire_date,
            value,
        }
    }

    /// Whether the envelope's expiration date lies strictly before `at`.
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        match self.expire_date {
            None => false,
            Some(expire_date) => expire_date < at,
        }
    }

    /// Whether the envelope has expired as of now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Time left before expiry, `None` for entries that never expire.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn time_to_live(&self) -> Option<Duration> {
        self.expire_date
            .map(|expire_date| (expire_date - Utc::now()).to_std().unwrap_or(Duration::ZERO))
    }
}

/// Compute the expiration date for a write happening at `now`.
///
/// A missing or zero duration means the entry never expires. Durations too
/// large to represent as a date are treated the same way.
pub fn expire_date_from(now: DateTime<Utc>, expire: Option<Duration>) -> Option<DateTime<Utc>> {
    let expire = expire.filter(|d| !d.is_zero())?;
    let delta = chrono::Duration::from_std(expire).ok()?;
    now.checked_add_signed(delta)
}

/// Current time at millisecond precision, matching the wire format.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_zero_and_none_never_expire() {
        let now = Utc::now();
        assert_eq!(expire_date_from(now, None), None);
        assert_eq!(expire_date_from(now, Some(Duration::ZERO)), None);
    }

    #[test]
    fn test_expire_date_offset() {
        let now = Utc::now();
        let expire = expire_date_from(now, Some(Duration::from_secs(90))).unwrap();
        assert_eq!((expire - now).num_seconds(), 90);
    }

    #[test]
    fn test_huge_duration_never_expires() {
        let now = Utc::now();
        assert_eq!(expire_date_from(now, Some(Duration::MAX)), None);
    }

    #[test]
    fn test_wire_format_field_names() {
        let envelope = Envelope::new(json!({"x": 1}), None);
        let value = serde_json::to_value(&envelope).unwrap();

        assert!(value.get("saveTime").unwrap().is_string());
        assert!(value.get("expireDate").unwrap().is_null());
        assert_eq!(value.get("value").unwrap(), &json!({"x": 1}));
    }

    #[test]
    fn test_parses_foreign_envelope() {
        let raw = r#"{"saveTime":"2020-01-01T00:00:00.000Z","expireDate":"2020-01-01T00:01:00.000Z","value":[1,2]}"#;
        let envelope: Envelope = serde_json::from_str(raw).unwrap();

        assert_eq!(envelope.value, json!([1, 2]));
        assert!(envelope.is_expired());
        assert_eq!(envelope.time_to_live(), Some(Duration::ZERO));
    }

    #[test]
    fn test_expiry_is_strict() {
        let now = Utc::now();
        let envelope = Envelope::with_expire_date(1, Some(now));

        assert!(!envelope.is_expired_at(now));
        assert!(envelope.is_expired_at(now + chrono::Duration::milliseconds(1)));
    }

    #[test]
    fn test_missing_fields() {
        let raw = r#"{"saveTime":"2020-01-01T00:00:00Z","value":1}"#;
        // expireDate may be absent from foreign writers; Option tolerates it
        let envelope: Envelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.expire_date, None);

        let raw = r#"{"expireDate":null,"value":1}"#;
        assert!(serde_json::from_str::<Envelope>(raw).is_err());
    }
}
