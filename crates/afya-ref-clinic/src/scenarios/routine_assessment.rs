//! Scenario 1: Routine assessment with regional filtering
//!
//! Two users report the same three symptoms from different regions.
//!
//! Walk-through:
//!   1. Each visit is replayed through an `AssessmentSession`
//!   2. The runner resolves `fever,headache,nausea` (moderate, base 85)
//!   3. Lagos keeps Malaria and Typhoid (tagged `ng`) and earns the regional
//!      bonus; Durban keeps only the global condition
//!   4. Both results pass verification and land in history

use std::sync::Arc;

use afya_contracts::error::AfyaResult;
use afya_core::{traits::HistoryWriter, AssessmentRunner};
use afya_history::InMemoryHistory;
use afya_rules::TomlRuleBook;

use crate::{
    harness::{build_runner, print_confidence_breakdown, print_outcome},
    mock_data::{MockVisit, AMARA_LAGOS, THANDI_DURBAN},
};

/// Run Scenario 1: Routine assessment.
pub fn run_scenario(book: &TomlRuleBook) -> AfyaResult<()> {
    println!("=== Scenario 1: Routine Assessment with Regional Filtering ===");
    println!();

    let history = Arc::new(InMemoryHistory::new());
    let runner = build_runner(book, Arc::clone(&history));

    for visit in [AMARA_LAGOS, THANDI_DURBAN] {
        run_visit(book, &runner, &visit)?;
    }

    println!(
        "  History recorded:       {} + {} entries",
        history.recent(AMARA_LAGOS.profile)?.len(),
        history.recent(THANDI_DURBAN.profile)?.len()
    );
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}

fn run_visit(book: &TomlRuleBook, runner: &AssessmentRunner, visit: &MockVisit) -> AfyaResult<()> {
    println!("  Visit: {} ({})", visit.summary, visit.profile);

    let mut session = visit.session();
    let input = session.build_input();
    let outcome = runner.run(&mut session)?;

    print_outcome(&outcome);
    if let Some(result) = outcome.result() {
        print_confidence_breakdown(book, &input, result);
    }
    println!("  Session events:         {}", session.events().len());
    println!();

    Ok(())
}
