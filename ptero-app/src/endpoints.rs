//! Application API paths, relative to `/api/application`.

/// Location paths.
pub mod locations {
    /// Collection root.
    pub const MAIN: &str = "/locations";

    /// A single location.
    pub fn get(id: u64) -> String {
        format!("/locations/{}", id)
    }
}

/// User paths.
pub mod users {
    /// Collection root.
    pub const MAIN: &str = "/users";

    /// A single user.
    pub fn get(id: u64) -> String {
        format!("/users/{}", id)
    }

    /// A user addressed by external id. The id is percent-encoded.
    pub fn external(id: &str) -> String {
        format!("/users/external/{}", urlencoding::encode(id))
    }
}

/// Server paths.
pub mod servers {
    /// Collection root.
    pub const MAIN: &str = "/servers";

    /// A single server.
    pub fn get(id: u64) -> String {
        format!("/servers/{}", id)
    }

    /// Name, owner, description and external id.
    pub fn details(id: u64) -> String {
        format!("/servers/{}/details", id)
    }

    pub fn suspend(id: u64) -> String {
        format!("/servers/{}/suspend", id)
    }

    pub fn unsuspend(id: u64) -> String {
        format!("/servers/{}/unsuspend", id)
    }

    /// Deletion that skips the node's cleanup checks.
    pub fn force(id: u64) -> String {
        format!("/servers/{}/force", id)
    }
}
