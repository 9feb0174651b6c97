//! Servers as seen by the application API.

use chrono::{DateTime, Utc};
use ptero_core::{timestamp, Entity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Resource limits of a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Memory in MiB; 0 is unlimited.
    pub memory: i64,
    /// Swap in MiB; -1 is unlimited.
    pub swap: i64,
    /// Disk in MiB; 0 is unlimited.
    pub disk: i64,
    /// Block IO weight.
    pub io: i64,
    /// CPU limit as a percentage of one core.
    pub cpu: i64,
    /// Cores the server is pinned to, e.g. `"0-1,3"`.
    #[serde(default)]
    pub threads: Option<String>,
    #[serde(default)]
    pub oom_disabled: bool,
}

/// Feature limits of a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLimits {
    pub databases: u32,
    pub allocations: u32,
    #[serde(default)]
    pub backups: u32,
}

/// A server on the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationServer {
    /// Internal ID (separate from the UUID).
    pub id: u64,

    /// External ID, if set.
    #[serde(default)]
    pub external_id: Option<String>,

    /// Server UUID.
    pub uuid: Uuid,

    /// Short identifier, a prefix of the UUID.
    pub identifier: String,

    /// Server name.
    pub name: String,

    /// Description, if set.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the server is suspended.
    #[serde(default)]
    pub suspended: bool,

    /// Resource limits.
    pub limits: Limits,

    /// Feature limits.
    pub feature_limits: FeatureLimits,

    /// ID of the owning user.
    #[serde(rename = "user")]
    pub owner_id: u64,

    /// ID of the node the server runs on.
    #[serde(rename = "node")]
    pub node_id: u64,

    /// ID of the primary allocation.
    pub allocation: u64,

    /// ID of the nest.
    pub nest: u64,

    /// ID of the egg.
    pub egg: u64,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for ApplicationServer {
    const KIND: &'static str = "server";
    const FILTERS: &'static [&'static str] = &["name", "uuid", "uuidShort", "external_id", "image"];
    const INCLUDES: &'static [&'static str] = &[
        "allocations",
        "user",
        "subusers",
        "nest",
        "egg",
        "variables",
        "location",
        "node",
        "databases",
    ];
    const SORTS: &'static [&'static str] = &["id", "uuid"];

    fn id(&self) -> u64 {
        self.id
    }

    fn matches_alias(&self, alias: &str) -> bool {
        self.identifier == alias
            || self.uuid.to_string() == alias
            || self.external_id.as_deref() == Some(alias)
    }
}

/// Changes to a server's details. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDetailsUpdate {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New owner ID.
    #[serde(rename = "user", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,

    /// New external ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attributes() -> serde_json::Value {
        json!({
            "id": 5,
            "external_id": null,
            "uuid": "1a7ce997-259b-452e-8b4e-cecc464142ca",
            "identifier": "1a7ce997",
            "name": "Survival",
            "description": "",
            "suspended": false,
            "limits": { "memory": 1024, "swap": -1, "disk": 5120, "io": 500, "cpu": 100, "threads": null },
            "feature_limits": { "databases": 2, "allocations": 1, "backups": 3 },
            "user": 3,
            "node": 1,
            "allocation": 12,
            "nest": 1,
            "egg": 4,
            "container": { "image": "ghcr.io/pterodactyl/yolks:java_17" },
            "created_at": "2021-01-01T00:00:00+00:00",
            "updated_at": "2021-01-02T00:00:00+00:00"
        })
    }

    #[test]
    fn test_deserialize_server() {
        let server: ApplicationServer = serde_json::from_value(attributes()).unwrap();
        assert_eq!(server.owner_id, 3);
        assert_eq!(server.node_id, 1);
        assert_eq!(server.limits.swap, -1);
        assert!(!server.limits.oom_disabled);
        assert_eq!(server.feature_limits.backups, 3);
    }

    #[test]
    fn test_server_aliases() {
        let server: ApplicationServer = serde_json::from_value(attributes()).unwrap();
        assert!(server.matches_alias("1a7ce997"));
        assert!(server.matches_alias("1a7ce997-259b-452e-8b4e-cecc464142ca"));
        assert!(!server.matches_alias("Survival"));
        assert!(!server.matches_alias("1a7ce"));
    }

    #[test]
    fn test_details_update_renames_owner() {
        let update = ServerDetailsUpdate {
            owner_id: Some(9),
            ..ServerDetailsUpdate::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({ "user": 9 }));
    }
}
