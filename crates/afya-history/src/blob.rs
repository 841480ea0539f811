//! The exported history blob.
//!
//! A `HistoryBlob` is everything a storage backend needs to persist and
//! later restore a history store. Callers treat its byte form as opaque;
//! the checksum makes edits to a stored blob detectable on import.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use afya_contracts::{
    error::{AfyaError, AfyaResult},
    result::HistoryEntry,
};

/// Storage namespace every Afya history blob is written under.
pub const HISTORY_NAMESPACE: &str = "afya-history";

/// Entries kept per profile unless configured otherwise.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// A sealed snapshot of every profile's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryBlob {
    /// Always `HISTORY_NAMESPACE` for blobs this crate produces.
    pub namespace: String,

    /// Profile → entries, most recent first.
    pub profiles: BTreeMap<String, Vec<HistoryEntry>>,

    /// Wall-clock time (UTC) the blob was exported. Not covered by the
    /// checksum.
    pub exported_at: DateTime<Utc>,

    /// SHA-256 (hex) over `namespace` and the canonical JSON of `profiles`.
    pub checksum: String,
}

impl HistoryBlob {
    /// Total number of entries across all profiles.
    pub fn entry_count(&self) -> usize {
        self.profiles.values().map(Vec::len).sum()
    }

    /// Serialize the blob to JSON bytes for storage.
    pub fn to_bytes(&self) -> AfyaResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| AfyaError::HistoryWriteFailed {
            reason: format!("failed to serialize history blob: {}", e),
        })
    }

    /// Parse bytes produced by `to_bytes`.
    ///
    /// Only the shape is checked here; `InMemoryHistory::import_blob` checks
    /// the namespace and checksum.
    pub fn from_bytes(bytes: &[u8]) -> AfyaResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| AfyaError::HistoryCorrupt {
            reason: format!("history blob is not valid JSON: {}", e),
        })
    }
}
