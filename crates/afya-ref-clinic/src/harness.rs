//! Wiring and console output shared by the scenarios and the CLI.

use std::sync::Arc;

use afya_contracts::{
    error::AfyaResult,
    input::AssessmentInput,
    result::{AssessmentOutcome, AssessmentResult, HistoryEntry, RuleMatch},
    rule::UrgencyTier,
};
use afya_core::{
    engine::confidence_adjustments,
    traits::{HistoryWriter, RuleSource},
    AssessmentEngine, AssessmentRunner,
};
use afya_history::InMemoryHistory;
use afya_rules::TomlRuleBook;
use afya_verify::{standard_result_schema, ResultSchemaVerifier};

// ── Arc-wrapped history helper ───────────────────────────────────────────────

/// Lets an `Arc<InMemoryHistory>` be handed to the runner as
/// `Box<dyn HistoryWriter>` while the caller keeps a handle for export.
pub struct ArcHistory(pub Arc<InMemoryHistory>);

impl HistoryWriter for ArcHistory {
    fn append(&self, entry: &HistoryEntry) -> AfyaResult<()> {
        self.0.append(entry)
    }

    fn recent(&self, profile: &str) -> AfyaResult<Vec<HistoryEntry>> {
        self.0.recent(profile)
    }
}

/// A runner over `book` with the standard verifier and schema, recording
/// into `history`.
pub fn build_runner(book: &TomlRuleBook, history: Arc<InMemoryHistory>) -> AssessmentRunner {
    let schema = standard_result_schema(book.scoring());
    AssessmentRunner::new(
        AssessmentEngine::new(Box::new(book.clone())),
        Box::new(ArcHistory(history)),
        Box::new(ResultSchemaVerifier::with_standard_rules()),
        schema,
    )
}

// ── Printing ─────────────────────────────────────────────────────────────────

/// Print an outcome the way a result screen would lay it out.
pub fn print_outcome(outcome: &AssessmentOutcome) {
    match outcome {
        AssessmentOutcome::Assessed(result) => print_result(result),
        AssessmentOutcome::InsufficientInput { reason } => {
            println!("  Needs more input:       {}", reason);
        }
    }
}

fn print_result(result: &AssessmentResult) {
    let matched = match result.matched {
        RuleMatch::Exact => format!("exact ({})", result.rule.key),
        RuleMatch::Fallback => "fallback (no rule for this combination)".to_string(),
    };
    let urgency = if result.escalated {
        format!("{} (escalated from {})", result.urgency, result.rule.urgency)
    } else {
        result.urgency.to_string()
    };

    println!("  Rule match:             {}", matched);
    println!("  Urgency:                {}", urgency);
    println!("  Confidence:             {}%", result.confidence);
    println!("  Possible conditions:");
    for condition in &result.conditions {
        println!("    - {:<24} {:>3.0}%", condition.name, condition.weight * 100.0);
    }
    println!("  Recommended actions:");
    for action in &result.rule.actions {
        println!("    - {}", action);
    }
    if !result.rule.first_aid.is_empty() {
        println!("  First aid:");
        for step in &result.rule.first_aid {
            println!("    - {}", step);
        }
    }
    if !result.rule.seek_help.is_empty() {
        println!("  Seek help:              {}", result.rule.seek_help);
    }

    if let Some(region) = &result.region {
        println!("  Region:                 {} ({})", region.name, region.code);
        if !region.seasonal_alert.is_empty() {
            println!("  Seasonal alert:         {}", region.seasonal_alert);
        }
        if !region.health_tip.is_empty() {
            println!("  Health tip:             {}", region.health_tip);
        }
    }
    if result.urgency == UrgencyTier::High {
        match result.emergency_number() {
            Some(number) => println!("  EMERGENCY: call {} now", number),
            None => println!("  EMERGENCY: call your local emergency number now"),
        }
    }
}

/// Print how `result.confidence` was reached from the rule's base.
pub fn print_confidence_breakdown(book: &TomlRuleBook, input: &AssessmentInput, result: &AssessmentResult) {
    let config = book.scoring();
    let base = result.rule.base_confidence.unwrap_or(config.default_base_confidence);

    println!("  Confidence breakdown:");
    println!("    base                  {:>+4}", base);
    let mut raw = i32::from(base);
    for adjustment in confidence_adjustments(&result.rule, input, config) {
        println!("    {:<21} {:>+4}", adjustment.factor, adjustment.delta);
        raw += adjustment.delta;
    }
    println!(
        "    = {} clamped to [{}, {}] -> {}",
        raw, config.min_confidence, config.max_confidence, result.confidence
    );
}

/// Print a profile's history, most recent first.
pub fn print_history(profile: &str, entries: &[HistoryEntry]) {
    println!("  History for '{}' ({} entries, most recent first):", profile, entries.len());
    for entry in entries {
        println!(
            "    {}  {:<24} {:<8} {}%",
            entry.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            entry.input.symptoms.canonical_key(),
            entry.result.urgency.as_str(),
            entry.result.confidence
        );
    }
}
