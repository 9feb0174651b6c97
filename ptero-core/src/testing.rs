//! Test fixtures: a scripted transport and a small entity type.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::entity::Entity;
use crate::error::TransportError;
use crate::options::Query;
use crate::timestamp;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Region {
    pub id: u64,
    pub short: String,
    pub long: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Region {
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

pub fn region_fragment(id: u64, short: &str, long: &str) -> Value {
    json!({
        "object": "location",
        "attributes": {
            "id": id,
            "short": short,
            "long": long,
            "created_at": "2021-01-01T00:00:00+00:00",
            "updated_at": null
        }
    })
}

pub fn region_page(fragments: Vec<Value>, current: u32, total_pages: u32) -> Value {
    let count = fragments.len();
    json!({
        "object": "list",
        "data": fragments,
        "meta": {
            "pagination": {
                "total": count,
                "count": count,
                "per_page": 50,
                "current_page": current,
                "total_pages": total_pages
            }
        }
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub query: Option<Query>,
    pub body: Option<Value>,
}

/// Replays scripted responses in order and records every call.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, path: &str, query: &Query) -> Result<Value, TransportError> {
        self.record(Call {
            method: "GET",
            path: path.to_string(),
            query: Some(query.clone()),
            body: None,
        })
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.record(Call {
            method: "POST",
            path: path.to_string(),
            query: None,
            body: Some(body.clone()),
        })
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.record(Call {
            method: "PATCH",
            path: path.to_string(),
            query: None,
            body: Some(body.clone()),
        })
    }

    async fn delete(&self, path: &str) -> Result<Value, TransportError> {
        self.record(Call {
            method: "DELETE",
            path: path.to_string(),
            query: None,
            body: None,
        })
    }
}
