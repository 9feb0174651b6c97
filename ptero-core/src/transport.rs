//! The transport boundary.
//!
//! The engine never builds URLs or speaks HTTP itself. It hands a path and
//! a [`Query`] to a [`Transport`] and receives already-parsed JSON back.
//! Authentication, retries and batching are the transport's business.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::options::Query;

/// A collaborator that performs requests against the panel API.
///
/// Paths are relative to the API root (e.g. `/locations/3`). Every method
/// returns parsed JSON; empty bodies come back as `Value::Null`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET request.
    async fn get(&self, path: &str, query: &Query) -> Result<Value, TransportError>;

    /// Issue a POST request with a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    /// Issue a PATCH request with a JSON body.
    async fn patch(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    /// Issue a DELETE request.
    async fn delete(&self, path: &str) -> Result<Value, TransportError>;
}
