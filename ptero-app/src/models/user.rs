//! Panel users.

use chrono::{DateTime, Utc};
use ptero_core::{timestamp, Entity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A panel account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: u64,

    /// External ID, if the account is linked to another system.
    #[serde(default)]
    pub external_id: Option<String>,

    /// User UUID.
    pub uuid: Uuid,

    /// Login name.
    pub username: String,

    /// Email address.
    pub email: String,

    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Interface language code.
    pub language: String,

    /// Whether the account is a panel administrator.
    pub root_admin: bool,

    /// Whether two-factor authentication is enabled.
    #[serde(rename = "2fa")]
    pub two_factor: bool,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for User {
    const KIND: &'static str = "user";
    const FILTERS: &'static [&'static str] = &["email", "uuid", "username", "external_id"];
    const INCLUDES: &'static [&'static str] = &["servers"];
    const SORTS: &'static [&'static str] = &["id", "uuid"];

    fn id(&self) -> u64 {
        self.id
    }

    fn matches_alias(&self, alias: &str) -> bool {
        self.username == alias || self.email == alias || self.external_id.as_deref() == Some(alias)
    }
}

/// Parameters for creating a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserParams {
    /// Email address.
    pub email: String,

    /// Login name.
    pub username: String,

    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// External ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Initial password. The panel emails a setup link when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Grant administrator access.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_admin: Option<bool>,

    /// Interface language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl CreateUserParams {
    /// Parameters with the required fields set.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }
}

/// Changes to apply to a user. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}
