//! In-memory implementation of `HistoryWriter`.
//!
//! `InMemoryHistory` keeps one bounded deque per profile behind a `Mutex`,
//! so a runner holding it can be shared across threads. New entries go to
//! the front; anything past the capacity is dropped from the back.
//!
//! Persistence is left to the caller: `export_blob()` produces a
//! checksummed `HistoryBlob`, and `import_blob()` restores one after
//! checking it has not been altered.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info, warn};

use afya_contracts::{
    error::{AfyaError, AfyaResult},
    result::HistoryEntry,
};
use afya_core::traits::HistoryWriter;

use crate::{
    blob::{HistoryBlob, HISTORY_NAMESPACE, MAX_HISTORY_ENTRIES},
    checksum::{blob_checksum, verify_blob},
};

type ProfileMap = BTreeMap<String, VecDeque<HistoryEntry>>;

/// A bounded, per-profile assessment history held in memory.
pub struct InMemoryHistory {
    capacity: usize,
    pub(crate) state: Arc<Mutex<ProfileMap>>,
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHistory {
    /// A store keeping `MAX_HISTORY_ENTRIES` per profile.
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY_ENTRIES)
    }

    /// A store keeping at most `capacity` entries per profile (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> AfyaResult<MutexGuard<'_, ProfileMap>> {
        self.state.lock().map_err(|e| AfyaError::HistoryWriteFailed {
            reason: format!("history state lock poisoned: {}", e),
        })
    }

    /// Profiles with at least one entry, sorted.
    pub fn profiles(&self) -> AfyaResult<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    /// Forget every entry for `profile`. Returns how many were removed.
    pub fn clear(&self, profile: &str) -> AfyaResult<usize> {
        let removed = self.lock()?.remove(profile).map_or(0, |entries| entries.len());
        info!(profile = %profile, removed, "history cleared");
        Ok(removed)
    }

    /// Snapshot every profile into a checksummed `HistoryBlob`.
    pub fn export_blob(&self) -> AfyaResult<HistoryBlob> {
        let profiles: BTreeMap<String, Vec<HistoryEntry>> = self
            .lock()?
            .iter()
            .map(|(profile, entries)| (profile.clone(), entries.iter().cloned().collect()))
            .collect();

        let checksum = blob_checksum(HISTORY_NAMESPACE, &profiles)?;
        let blob = HistoryBlob {
            namespace: HISTORY_NAMESPACE.to_string(),
            profiles,
            exported_at: Utc::now(),
            checksum,
        };

        debug!(
            profiles = blob.profiles.len(),
            entries = blob.entry_count(),
            checksum = %blob.checksum,
            "history exported"
        );
        Ok(blob)
    }

    /// Replace the store's contents with `blob`.
    ///
    /// Rejects a foreign namespace or a checksum mismatch with
    /// `AfyaError::HistoryCorrupt`, leaving the current contents untouched.
    /// Each profile is cut back to this store's capacity, keeping the most
    /// recent entries. Returns the number of entries loaded.
    pub fn import_blob(&self, blob: HistoryBlob) -> AfyaResult<usize> {
        if blob.namespace != HISTORY_NAMESPACE {
            warn!(namespace = %blob.namespace, "history blob from another namespace");
            return Err(AfyaError::HistoryCorrupt {
                reason: format!(
                    "expected namespace '{}', found '{}'",
                    HISTORY_NAMESPACE, blob.namespace
                ),
            });
        }
        if !verify_blob(&blob) {
            warn!(checksum = %blob.checksum, "history blob checksum mismatch");
            return Err(AfyaError::HistoryCorrupt {
                reason: "checksum does not match blob contents".to_string(),
            });
        }

        let profiles: ProfileMap = blob
            .profiles
            .into_iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(profile, entries)| {
                let bounded: VecDeque<HistoryEntry> =
                    entries.into_iter().take(self.capacity).collect();
                (profile, bounded)
            })
            .collect();
        let loaded = profiles.values().map(VecDeque::len).sum();

        *self.lock()? = profiles;

        info!(entries = loaded, "history imported");
        Ok(loaded)
    }

    /// Round-trip the current contents through `export_blob` and confirm the
    /// checksum verifies.
    pub fn verify_integrity(&self) -> AfyaResult<bool> {
        Ok(verify_blob(&self.export_blob()?))
    }
}

// ── HistoryWriter impl ────────────────────────────────────────────────────────

impl HistoryWriter for InMemoryHistory {
    /// Push `entry` to the front of its profile's list, dropping the oldest
    /// entry once the list exceeds capacity.
    fn append(&self, entry: &HistoryEntry) -> AfyaResult<()> {
        let mut state = self.lock()?;
        let entries = state.entry(entry.profile.clone()).or_default();

        entries.push_front(entry.clone());
        entries.truncate(self.capacity);

        debug!(
            profile = %entry.profile,
            entry_id = %entry.id,
            stored = entries.len(),
            "history entry appended"
        );
        Ok(())
    }

    fn recent(&self, profile: &str) -> AfyaResult<Vec<HistoryEntry>> {
        Ok(self
            .lock()?
            .get(profile)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default())
    }
}
