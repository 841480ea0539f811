//! Blob checksum primitives.
//!
//! Hash input layout (bytes, in order):
//!   1. namespace as UTF-8 bytes
//!   2. a single `\n` separator
//!   3. canonical JSON of the profile map (serde_json, no pretty-printing;
//!      `BTreeMap` keeps profile order stable)

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use afya_contracts::{
    error::{AfyaError, AfyaResult},
    result::HistoryEntry,
};

use crate::blob::HistoryBlob;

/// Compute the checksum for a namespace and profile map.
///
/// Returns a lowercase 64-character hex string.
pub fn blob_checksum(
    namespace: &str,
    profiles: &BTreeMap<String, Vec<HistoryEntry>>,
) -> AfyaResult<String> {
    let profiles_json = serde_json::to_vec(profiles).map_err(|e| AfyaError::HistoryWriteFailed {
        reason: format!("failed to serialize history entries: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b"\n");
    hasher.update(&profiles_json);

    Ok(hex::encode(hasher.finalize()))
}

/// True when the blob's stored checksum matches its contents.
pub fn verify_blob(blob: &HistoryBlob) -> bool {
    match blob_checksum(&blob.namespace, &blob.profiles) {
        Ok(recomputed) => recomputed == blob.checksum,
        Err(_) => false,
    }
}
