//! Node locations.

use chrono::{DateTime, Utc};
use ptero_core::{timestamp, Entity};
use serde::{Deserialize, Serialize};

/// A location grouping nodes, usually by region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Location ID.
    pub id: u64,

    /// Short name, usually a country code.
    pub short: String,

    /// Long name.
    pub long: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp, if the panel recorded one.
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Location {
    const KIND: &'static str = "location";
    const FILTERS: &'static [&'static str] = &["short", "long"];
    const INCLUDES: &'static [&'static str] = &["nodes", "servers"];

    fn id(&self) -> u64 {
        self.id
    }

    fn matches_alias(&self, alias: &str) -> bool {
        self.short == alias || self.long == alias
    }
}

/// Parameters for creating a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLocationParams {
    /// Short name.
    pub short: String,

    /// Long name.
    pub long: String,
}

/// Changes to apply to a location. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationUpdate {
    /// New short name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    /// New long name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
}

impl LocationUpdate {
    /// Change the short name.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self
    }

    /// Change the long name.
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }
}
