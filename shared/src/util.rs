use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// 当前 UTC 时间
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Generate a new record ID (UUID v4, matches the hosted backend's `uuid` columns)
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Minutes elapsed between two timestamps, fractional
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 60_000.0
}

/// Deserialize a nullable column into its `Default` when the value is `null`.
///
/// The hosted schema declares most enum/flag columns nullable even though the
/// application always writes them.
pub fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_minutes_between() {
        let start = Utc::now();
        let end = start + Duration::seconds(90);
        assert!((minutes_between(start, end) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_null_to_default() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "null_to_default")]
            flag: bool,
        }

        let row: Row = serde_json::from_str(r#"{"flag":null}"#).unwrap();
        assert!(!row.flag);
        let row: Row = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!row.flag);
        let row: Row = serde_json::from_str(r#"{"flag":true}"#).unwrap();
        assert!(row.flag);
    }
}
