// Serialized form of the task collection

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use eyre::{Context, Result, eyre};
use tracing::debug;

use crate::models::Task;

/// Encode the whole collection as a JSON array of task records
pub fn encode(tasks: &[Task]) -> Result<String> {
    let json = serde_json::to_string(tasks).context("Failed to serialize tasks")?;
    debug!(count = tasks.len(), bytes = json.len(), "Encoded task collection");
    Ok(json)
}

/// Decode a JSON array of task records, rehydrating date strings into timestamps
pub fn decode(data: &str) -> Result<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(data).context("Failed to parse task collection")?;
    debug!(count = tasks.len(), "Decoded task collection");
    Ok(tasks)
}

/// Format a timestamp the way it is persisted: RFC 3339, UTC, millisecond precision
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a persisted timestamp.
///
/// Accepts RFC 3339 date-times with any offset and bare `YYYY-MM-DD` dates,
/// which are taken as UTC midnight.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(eyre!("Invalid timestamp: {}", s))
}

/// serde adapter for required timestamp fields
pub(crate) mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s).map_err(D::Error::custom)
    }
}

/// serde adapter for optional timestamp fields; `null` reads as absent
pub(crate) mod optional_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(ts: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => serializer.serialize_str(&super::format_timestamp(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => super::parse_timestamp(&s).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}
