//! Normalization of the three upstream plan payloads.
//!
//! Each platform surface names and types the same fields differently. The
//! constructors here map them onto [`PlanData`] and keep each surface's own
//! defaulting rules for `location` and `location_id`.

use super::models::{GuestStatus, Plan, PlanData};
use crate::error::{invalid_field, missing_field, Error, PlanResult};
use crate::session::Session;
use crate::utils::time::seconds_to_datetime;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// The platform surface a plan payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadShape {
    /// Incremental sync feed (delta messages)
    PullFeed,
    /// One-shot plan detail fetch
    FetchResponse,
    /// Graph query node
    GraphQuery,
}

impl PayloadShape {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PullFeed => "pull feed",
            Self::FetchResponse => "fetch response",
            Self::GraphQuery => "graph query",
        }
    }
}

/// One guest record, as found in pull feed guest lists and graph edges
#[derive(Debug, Deserialize)]
struct GuestEdge {
    node: GuestNode,
    guest_list_state: String,
}

#[derive(Debug, Deserialize)]
struct GuestNode {
    id: Value,
}

impl PlanData {
    /// Build a plan from an incremental sync feed payload
    pub fn from_pull_feed(session: Arc<Session>, data: &Value) -> PlanResult<Self> {
        logged(PayloadShape::PullFeed, pull_feed(session, data))
    }

    /// Build a plan from a one-shot fetch response
    pub fn from_fetch_response(session: Arc<Session>, data: &Value) -> PlanResult<Self> {
        logged(PayloadShape::FetchResponse, fetch_response(session, data))
    }

    /// Build a plan from a graph query node
    pub fn from_graph_query(session: Arc<Session>, data: &Value) -> PlanResult<Self> {
        logged(PayloadShape::GraphQuery, graph_query(session, data))
    }

    /// Build a plan from a payload of a known shape
    pub fn from_payload(session: Arc<Session>, shape: PayloadShape, data: &Value) -> PlanResult<Self> {
        match shape {
            PayloadShape::PullFeed => Self::from_pull_feed(session, data),
            PayloadShape::FetchResponse => Self::from_fetch_response(session, data),
            PayloadShape::GraphQuery => Self::from_graph_query(session, data),
        }
    }

    /// Parse a raw JSON body and build a plan from it
    pub fn from_json_str(session: Arc<Session>, shape: PayloadShape, body: &str) -> PlanResult<Self> {
        let data: Value = serde_json::from_str(body)?;
        Self::from_payload(session, shape, &data)
    }
}

fn logged(shape: PayloadShape, result: PlanResult<PlanData>) -> PlanResult<PlanData> {
    match &result {
        Ok(plan) => debug!(
            "Normalized {} plan {} with {} guests",
            shape.as_str(),
            plan.id(),
            plan.guest_count()
        ),
        Err(e) => warn!("Failed to normalize {} plan: {}", shape.as_str(), e),
    }
    result
}

fn pull_feed(session: Arc<Session>, data: &Value) -> PlanResult<PlanData> {
    const SHAPE: &str = PayloadShape::PullFeed.as_str();

    let id = required_id(data, SHAPE, "event_id")?;
    let time = seconds_to_datetime(epoch_seconds(data, SHAPE, "event_time", true)?)
        .map_err(|e| invalid_field(SHAPE, "event_time", e.to_string()))?;

    // The guest list is a JSON document embedded in a string field
    let guests = match non_null(data, "guest_state_list") {
        Some(Value::String(raw)) => {
            let edges: Vec<GuestEdge> = serde_json::from_str(raw)
                .map_err(|e| Error::MalformedGuestListPayload(e.to_string()))?;
            guests_from_edges(edges)?
        }
        Some(other) => {
            return Err(Error::MalformedGuestListPayload(format!(
                "expected a JSON string, got {}",
                other
            )))
        }
        None => return Err(missing_field(SHAPE, "guest_state_list")),
    };

    Ok(PlanData {
        plan: Plan::new(session, id),
        time,
        title: optional_text(data, SHAPE, "event_title")?,
        location: Some(or_empty(optional_text(data, SHAPE, "event_location_name")?)),
        location_id: Some(or_empty(truthy_text(data, SHAPE, "event_location_id")?)),
        author_id: optional_text(data, SHAPE, "event_creator_id")?,
        guests: Some(guests),
    })
}

fn fetch_response(session: Arc<Session>, data: &Value) -> PlanResult<PlanData> {
    const SHAPE: &str = PayloadShape::FetchResponse.as_str();

    let id = required_id(data, SHAPE, "oid")?;
    let time = seconds_to_datetime(epoch_seconds(data, SHAPE, "event_time", false)?)
        .map_err(|e| invalid_field(SHAPE, "event_time", e.to_string()))?;

    let guests = match non_null(data, "event_members") {
        Some(Value::Object(members)) => {
            let mut guests = HashMap::with_capacity(members.len());
            for (user_id, label) in members {
                let label = label.as_str().ok_or_else(|| {
                    Error::MalformedGuestListPayload(format!(
                        "status of guest {} is not a string",
                        user_id
                    ))
                })?;
                guests.insert(user_id.clone(), GuestStatus::from_label(label)?);
            }
            Some(guests)
        }
        Some(other) => {
            return Err(Error::MalformedGuestListPayload(format!(
                "expected an object of guests, got {}",
                other
            )))
        }
        None => None,
    };

    Ok(PlanData {
        plan: Plan::new(session, id),
        time,
        title: optional_text(data, SHAPE, "title")?,
        location: Some(or_empty(optional_text(data, SHAPE, "location_name")?)),
        // Unlike the other shapes, a missing location id stays None here
        location_id: truthy_text(data, SHAPE, "location_id")?,
        author_id: optional_text(data, SHAPE, "creator_id")?,
        guests,
    })
}

fn graph_query(session: Arc<Session>, data: &Value) -> PlanResult<PlanData> {
    const SHAPE: &str = PayloadShape::GraphQuery.as_str();

    let id = required_id(data, SHAPE, "id")?;
    let time = seconds_to_datetime(epoch_seconds(data, SHAPE, "time", false)?)
        .map_err(|e| invalid_field(SHAPE, "time", e.to_string()))?;

    let author_id = match non_null(data, "lightweight_event_creator") {
        Some(creator) => optional_text(creator, SHAPE, "id")?,
        None => None,
    };

    let guests = match non_null(data, "event_reminder_members") {
        Some(members) => {
            let edges = members.get("edges").ok_or_else(|| {
                Error::MalformedGuestListPayload("event_reminder_members has no edges".to_string())
            })?;
            let edges = Vec::<GuestEdge>::deserialize(edges)
                .map_err(|e| Error::MalformedGuestListPayload(e.to_string()))?;
            Some(guests_from_edges(edges)?)
        }
        None => None,
    };

    Ok(PlanData {
        plan: Plan::new(session, id),
        time,
        title: optional_text(data, SHAPE, "event_title")?,
        location: optional_text(data, SHAPE, "location_name")?,
        location_id: Some(String::new()),
        author_id,
        guests,
    })
}

fn guests_from_edges(edges: Vec<GuestEdge>) -> PlanResult<HashMap<String, GuestStatus>> {
    let mut guests = HashMap::with_capacity(edges.len());
    for edge in edges {
        let user_id = scalar_text(&edge.node.id).ok_or_else(|| {
            Error::MalformedGuestListPayload(format!("invalid guest id: {}", edge.node.id))
        })?;
        guests.insert(user_id, GuestStatus::from_label(&edge.guest_list_state)?);
    }
    Ok(guests)
}

/// Field value, with an explicit JSON null treated as absent
fn non_null<'a>(data: &'a Value, field: &str) -> Option<&'a Value> {
    data.get(field).filter(|v| !v.is_null())
}

/// Strings pass through, numbers and booleans are rendered as text
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required_id(data: &Value, shape: &'static str, field: &'static str) -> PlanResult<String> {
    let value = non_null(data, field).ok_or_else(|| missing_field(shape, field))?;
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(invalid_field(shape, field, format!("expected string or integer, got {}", other))),
    }
}

fn optional_text(data: &Value, shape: &'static str, field: &'static str) -> PlanResult<Option<String>> {
    match non_null(data, field) {
        Some(value) => scalar_text(value)
            .map(Some)
            .ok_or_else(|| invalid_field(shape, field, format!("expected a scalar, got {}", value))),
        None => Ok(None),
    }
}

/// Like `optional_text`, but falsy values (`""`, `0`, `false`) count as absent
fn truthy_text(data: &Value, shape: &'static str, field: &'static str) -> PlanResult<Option<String>> {
    let truthy = match non_null(data, field) {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(Value::Bool(b)) => *b,
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(_) => true,
        None => false,
    };
    if truthy {
        optional_text(data, shape, field)
    } else {
        Ok(None)
    }
}

fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Read epoch seconds. The pull feed sends them as a decimal string.
fn epoch_seconds(data: &Value, shape: &'static str, field: &'static str, allow_string: bool) -> PlanResult<i64> {
    let value = non_null(data, field).ok_or_else(|| missing_field(shape, field))?;
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(|| invalid_field(shape, field, format!("not a valid timestamp: {}", n))),
        Value::String(s) if allow_string => s
            .trim()
            .parse::<i64>()
            .map_err(|e| invalid_field(shape, field, format!("{:?}: {}", s, e))),
        other => Err(invalid_field(shape, field, format!("expected epoch seconds, got {}", other))),
    }
}
