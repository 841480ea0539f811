//! Scenario 2: Emergency escalation
//!
//! Shows both escalation triggers and that urgency never drops:
//!   1. Chest pain with breathing trouble hits a `high` rule directly; the
//!      Kenyan emergency number is attached
//!   2. A severe headache resolves to a `low` rule and is escalated to
//!      `high` by severity alone
//!   3. The same headache at a mild severity label stays `low`

use std::sync::Arc;

use afya_contracts::{error::AfyaResult, input::Severity, result::AssessmentOutcome};
use afya_history::InMemoryHistory;
use afya_rules::TomlRuleBook;

use crate::{
    harness::{build_runner, print_outcome},
    mock_data::{KOFI_ACCRA, WANJIRU_NAIROBI},
};

/// Run Scenario 2: Emergency escalation.
pub fn run_scenario(book: &TomlRuleBook) -> AfyaResult<()> {
    println!("=== Scenario 2: Emergency Escalation ===");
    println!();

    let history = Arc::new(InMemoryHistory::new());
    let runner = build_runner(book, Arc::clone(&history));

    for visit in [WANJIRU_NAIROBI, KOFI_ACCRA] {
        println!("  Visit: {} ({})", visit.summary, visit.profile);
        let mut session = visit.session();
        let outcome = runner.run(&mut session)?;
        print_outcome(&outcome);
        println!();
    }

    // The same headache answered with the "mild" label instead of 9/10.
    let mild: Severity = "mild".parse()?;
    let mut session = KOFI_ACCRA.session();
    session.set_severity(mild);

    println!("  Visit: {} at severity '{}'", KOFI_ACCRA.summary, mild);
    let outcome = runner.run(&mut session)?;
    if let AssessmentOutcome::Assessed(result) = &outcome {
        println!(
            "  Urgency:                {} (escalated: {})",
            result.urgency, result.escalated
        );
        println!("  Confidence:             {}%", result.confidence);
    }
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
