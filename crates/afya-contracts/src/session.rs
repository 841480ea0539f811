//! Session identity and interaction events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for one assessment session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A privacy-friendly interaction event recorded by a session.
///
/// Events never leave the process on their own; the host decides whether to
/// forward them anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// e.g. "symptom_selected", "assessment_completed".
    pub name: String,
    pub timestamp: DateTime<Utc>,
    /// Event-specific fields.
    pub data: serde_json::Value,
    /// Milliseconds between session start and this event.
    pub session_duration_ms: i64,
}
