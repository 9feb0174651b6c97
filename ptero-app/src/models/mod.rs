//! Typed application-API resources.
//!
//! Each model deserializes from the `attributes` object of an API fragment
//! and implements [`ptero_core::Entity`] so a manager can cache, normalize
//! and resolve it.

pub mod location;
pub mod server;
pub mod user;

pub use location::{CreateLocationParams, Location, LocationUpdate};
pub use server::{ApplicationServer, FeatureLimits, Limits, ServerDetailsUpdate};
pub use user::{CreateUserParams, User, UserUpdate};
