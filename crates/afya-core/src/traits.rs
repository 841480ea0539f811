//! Seam traits for the Afya assessment pipeline.
//!
//! - `RuleSource`: the static rule and region tables (read-only)
//! - `HistoryWriter`: the bounded per-profile assessment history
//! - `ResultVerifier`: checks a result before it is recorded or shared
//!
//! The engine only ever needs a `RuleSource`. The runner adds the other two.

use afya_contracts::{
    config::ScoringConfig,
    error::AfyaResult,
    region::{RegionCode, RegionProfile},
    result::{AssessmentResult, HistoryEntry},
    rule::AssessmentRule,
    verify::{ResultSchema, VerificationReport},
};

/// Read-only access to the rule table, fallback rule, region table, and
/// scoring configuration.
///
/// Implementations are loaded once at start and never mutated, so they are
/// safe to share across any number of concurrent callers.
pub trait RuleSource: Send + Sync {
    /// Look up a rule by canonical symptom key.
    fn lookup(&self, key: &str) -> Option<&AssessmentRule>;

    /// The rule used when `lookup` finds nothing.
    fn fallback(&self) -> &AssessmentRule;

    fn region(&self, code: &RegionCode) -> Option<&RegionProfile>;

    /// All known regions, ordered by code.
    fn regions(&self) -> Vec<&RegionProfile>;

    fn scoring(&self) -> &ScoringConfig;
}

/// The assessment history: bounded, most-recent-first, keyed by profile.
pub trait HistoryWriter: Send + Sync {
    /// Prepend one entry to `entry.profile`'s history, evicting the oldest
    /// entry if the history is full.
    fn append(&self, entry: &HistoryEntry) -> AfyaResult<()>;

    /// The profile's entries, most recent first.
    fn recent(&self, profile: &str) -> AfyaResult<Vec<HistoryEntry>>;
}

/// The result verifier: the last gate before a result is recorded.
///
/// Implementations must not call back into the engine. They inspect the
/// result against a declarative `ResultSchema` and return a report; a failing
/// report keeps the result out of history.
pub trait ResultVerifier: Send + Sync {
    fn verify(&self, result: &AssessmentResult, schema: &ResultSchema) -> AfyaResult<VerificationReport>;
}
