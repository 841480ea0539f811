//! Scenario 4: Bounded history and blob tamper detection
//!
//!   1. One profile runs more assessments than the history keeps; only the
//!      newest `MAX_HISTORY_ENTRIES` survive
//!   2. The store is exported to bytes and restored into a fresh store
//!   3. The stored bytes are edited (a confidence lowered) and the import is
//!      rejected as corrupt

use std::sync::Arc;

use serde_json::Value;

use afya_contracts::error::{AfyaError, AfyaResult};
use afya_core::traits::HistoryWriter;
use afya_history::{HistoryBlob, InMemoryHistory, MAX_HISTORY_ENTRIES};
use afya_rules::TomlRuleBook;

use crate::{
    harness::{build_runner, print_history},
    mock_data::CHIDI_ABUJA,
};

/// Extra assessments run past the capacity.
const OVERFLOW: usize = 3;

/// Run Scenario 4: Bounded history.
pub fn run_scenario(book: &TomlRuleBook) -> AfyaResult<()> {
    println!("=== Scenario 4: Bounded History and Tamper Detection ===");
    println!();

    let history = Arc::new(InMemoryHistory::new());
    let runner = build_runner(book, Arc::clone(&history));
    let profile = CHIDI_ABUJA.profile;

    // ── Fill past capacity ───────────────────────────────────────────────────
    let runs = MAX_HISTORY_ENTRIES + OVERFLOW;
    for _ in 0..runs {
        let mut session = CHIDI_ABUJA.session();
        runner.run(&mut session)?;
    }
    let entries = history.recent(profile)?;
    println!("  Assessments run:        {}", runs);
    println!("  Entries kept:           {} (capacity {})", entries.len(), history.capacity());
    print_history(profile, &entries[..3.min(entries.len())]);
    println!();

    // ── Export and restore ───────────────────────────────────────────────────
    let bytes = history.export_blob()?.to_bytes()?;
    let restored = InMemoryHistory::new();
    let loaded = restored.import_blob(HistoryBlob::from_bytes(&bytes)?)?;
    println!("  Exported blob:          {} bytes", bytes.len());
    println!("  Restored entries:       {}", loaded);
    println!(
        "  Restored integrity:     {}",
        if restored.verify_integrity()? { "VERIFIED" } else { "FAILED" }
    );
    println!();

    // ── Tamper with the stored bytes ─────────────────────────────────────────
    let tampered = lower_first_confidence(&bytes, profile)?;
    let target = InMemoryHistory::new();
    match target.import_blob(HistoryBlob::from_bytes(&tampered)?) {
        Err(AfyaError::HistoryCorrupt { reason }) => {
            println!("  Tampered blob import:   REJECTED ({})", reason);
        }
        Err(e) => return Err(e),
        Ok(count) => {
            println!("  Tampered blob import:   ACCEPTED {} entries (unexpected)", count);
        }
    }
    println!();
    println!("  Scenario 4 complete.");
    println!();

    Ok(())
}

/// Rewrite the newest entry's confidence in a serialized blob, leaving the
/// checksum as it was.
pub fn lower_first_confidence(bytes: &[u8], profile: &str) -> AfyaResult<Vec<u8>> {
    let corrupt = |e: serde_json::Error| AfyaError::HistoryCorrupt {
        reason: format!("cannot edit blob: {}", e),
    };

    let mut blob: Value = serde_json::from_slice(bytes).map_err(corrupt)?;
    if let Some(confidence) = blob
        .pointer_mut(&format!("/profiles/{}/0/result/confidence", profile))
    {
        *confidence = Value::from(30);
    }
    serde_json::to_vec(&blob).map_err(corrupt)
}
