//! Assessment results and history entries.
//!
//! `AssessmentOutcome` is what the engine returns for every request.
//! `HistoryEntry` is what gets appended to a profile's history, one per
//! completed assessment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    input::AssessmentInput,
    region::RegionProfile,
    rule::{AssessmentRule, Condition, UrgencyTier},
};

/// How the rule for a result was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleMatch {
    /// The canonical key matched a rule in the table.
    Exact,
    /// No rule matched; the designated fallback rule was used.
    Fallback,
}

/// The engine's answer for one assessment.
///
/// Contains no timestamps or random values: identical inputs always produce
/// identical results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// The resolved rule, unmodified.
    pub rule: AssessmentRule,
    pub matched: RuleMatch,
    /// The rule's conditions, filtered to the input region when one was given.
    /// Never empty when the rule has conditions.
    pub conditions: Vec<Condition>,
    /// Final urgency, never lower than `rule.urgency`.
    pub urgency: UrgencyTier,
    /// True when the input raised urgency above the rule's tier.
    pub escalated: bool,
    /// Clamped confidence score.
    pub confidence: u8,
    /// Profile for the input region, when the region is known.
    pub region: Option<RegionProfile>,
}

impl AssessmentResult {
    /// The local emergency number, if the input region is known.
    pub fn emergency_number(&self) -> Option<&str> {
        self.region.as_ref().map(|r| r.emergency_number.as_str())
    }
}

/// The outcome of a single assessment request.
///
/// Callers pattern-match on this:
/// - `Assessed` → render, record, share
/// - `InsufficientInput` → prompt the user for more information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssessmentOutcome {
    Assessed(AssessmentResult),
    InsufficientInput {
        /// Why the engine could not assess, suitable for display.
        reason: String,
    },
}

impl AssessmentOutcome {
    pub fn result(&self) -> Option<&AssessmentResult> {
        match self {
            AssessmentOutcome::Assessed(result) => Some(result),
            AssessmentOutcome::InsufficientInput { .. } => None,
        }
    }
}

/// One completed assessment in a profile's history.
///
/// History entries are written once and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: uuid::Uuid,
    /// The profile (or session owner) this entry belongs to.
    pub profile: String,
    pub input: AssessmentInput,
    pub result: AssessmentResult,
    /// Wall-clock time the entry was created (UTC).
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(profile: impl Into<String>, input: AssessmentInput, result: AssessmentResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            profile: profile.into(),
            input,
            result,
            recorded_at: Utc::now(),
        }
    }
}
