//! # Ptero Permissions
//!
//! This crate models the sub-user permission flags of a Pterodactyl panel.
//!
//! ## Overview
//!
//! - **Flags**: the fixed universe of known permissions, each with an
//!   internal name (`CONTROL_CONSOLE`) and a numeric code (`1`)
//! - **Permissions**: an immutable set of granted flags, resolved from
//!   names, codes, or the keys of a map
//!
//! ## Naming
//!
//! ```text
//! internal   CONTROL_CONSOLE   (used by the set and by `to_array`)
//! external   control.console   (used by the panel API and `to_strings`)
//! code       1
//! ```
//!
//! The wildcard flag `*` has code 40. It is an ordinary member of the set:
//! holding it does not make `has` succeed for other flags.
//!
//! ## Usage
//!
//! ```rust
//! use ptero_permissions::{Flag, Permissions};
//!
//! let perms = Permissions::new(["control.console", "control.start"]).unwrap();
//!
//! // AND semantics
//! assert!(perms.has(["control.console", "control.start"]).unwrap());
//! assert!(!perms.has(["control.console", "control.stop"]).unwrap());
//!
//! // Full-universe view
//! assert_eq!(perms.to_flag_map().len(), Flag::ALL.len());
//! ```

pub mod error;
pub mod flags;
pub mod permissions;

pub use error::{PermissionError, PermissionResult};
pub use flags::Flag;
pub use permissions::{PermissionRef, PermissionResolvable, Permissions};
