//! Scenario 3: Fallback rule and insufficient input
//!
//!   1. An empty session cannot continue; running it anyway returns
//!      `InsufficientInput` and nothing is recorded
//!   2. Selecting then deselecting a symptom leaves the session empty again
//!   3. An unlisted combination resolves to the fallback rule: moderate
//!      urgency and generic advice

use std::sync::Arc;

use afya_contracts::error::AfyaResult;
use afya_core::{traits::HistoryWriter, AssessmentSession};
use afya_history::InMemoryHistory;
use afya_rules::TomlRuleBook;

use crate::{
    harness::{build_runner, print_outcome},
    mock_data::MUSA_KAMPALA,
};

/// Run Scenario 3: Fallback and insufficient input.
pub fn run_scenario(book: &TomlRuleBook) -> AfyaResult<()> {
    println!("=== Scenario 3: Fallback Rule and Insufficient Input ===");
    println!();

    let history = Arc::new(InMemoryHistory::new());
    let runner = build_runner(book, Arc::clone(&history));

    // ── Empty session ────────────────────────────────────────────────────────
    let mut session = AssessmentSession::new("walk-in");
    println!("  Empty session, can continue: {}", session.can_continue());
    print_outcome(&runner.run(&mut session)?);

    session.toggle_symptom("fever");
    session.toggle_symptom("fever");
    println!(
        "  After selecting and deselecting fever, can continue: {}",
        session.can_continue()
    );
    print_outcome(&runner.run(&mut session)?);
    println!("  History recorded:       {} entries", history.recent("walk-in")?.len());
    println!();

    // ── Unlisted combination ─────────────────────────────────────────────────
    println!("  Visit: {} ({})", MUSA_KAMPALA.summary, MUSA_KAMPALA.profile);
    let mut session = MUSA_KAMPALA.session();
    print_outcome(&runner.run(&mut session)?);
    println!();

    let names: Vec<&str> = session.events().iter().map(|e| e.name.as_str()).collect();
    println!("  Session events:         {}", names.join(", "));
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}
