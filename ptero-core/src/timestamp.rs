//! Serde helpers for panel timestamps.
//!
//! The panel sends RFC 3339 strings. A creation time is always present;
//! an update time may be missing, `null` or empty, all of which mean
//! "never updated".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize an optional timestamp, mapping absent, `null` and `""` to
/// `None`.
///
/// Use together with `#[serde(default)]` so a missing field is accepted.
pub fn optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
