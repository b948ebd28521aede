use std::collections::BTreeMap;

use nrz_core::utc_timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One recorded step of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// RFC 3339 UTC time the step completed.
    pub timestamp: String,
    /// Step name (`validation`, `randomization`, ...).
    pub action: String,
    /// Small structured detail map.
    #[serde(default)]
    pub details: BTreeMap<String, Value>,
}

/// Append-only event log. Events are never rewritten or removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditLog {
    events: Vec<AuditEvent>,
}

impl AuditLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event stamped with the current time.
    pub fn record<I, K>(&mut self, action: &str, details: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.events.push(AuditEvent {
            timestamp: utc_timestamp(),
            action: action.to_string(),
            details: details
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        });
    }

    /// All events in recording order.
    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    /// Events recorded at or after position `start`.
    pub fn since(&self, start: usize) -> &[AuditEvent] {
        &self.events[start.min(self.events.len())..]
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
