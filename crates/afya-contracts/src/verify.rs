//! Result verification schema and report types.
//!
//! Before a result is appended to history or handed to a share target, the
//! verifier runs it against a `ResultSchema`. Only a passing
//! `VerificationReport` lets the result through.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a result is checked against.
///
/// Combines a JSON Schema document for the result's shape with semantic
/// rules JSON Schema cannot express conveniently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSchema {
    /// e.g. "assessment-result-v1".
    pub schema_id: String,
    /// JSON Schema for the serialized `AssessmentResult`. `Null` skips the
    /// structural phase.
    pub json_schema: Value,
    pub rules: Vec<VerificationRule>,
}

/// A single semantic check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRule {
    /// Referenced in failure reports.
    pub rule_id: String,
    pub description: String,
    pub rule_type: VerificationRuleType,
}

/// Checks the verifier knows how to run.
///
/// Field paths are dot-separated keys into the serialized result, e.g.
/// `"rule.actions"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VerificationRuleType {
    /// The field must be present and non-null.
    RequiredField { field_path: String },

    /// The field must be a non-empty array.
    NonEmpty { field_path: String },

    /// The field must equal one of `allowed`.
    AllowedValues { field_path: String, allowed: Vec<Value> },

    /// The top-level `confidence` must lie in `[min, max]`.
    ConfidenceWithin { min: u8, max: u8 },

    /// No string at the field (or inside an array at the field) may contain
    /// `phrase`, compared case-insensitively.
    ForbiddenPhrase { field_path: String, phrase: String },

    /// Delegate to a function registered with the verifier by name.
    Custom { function_name: String },
}

/// The outcome of running a `ResultSchema` against one result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True only if every check passed.
    pub passed: bool,
    /// Every failure found. Empty on pass.
    pub failures: Vec<VerificationFailure>,
}

/// One failed check within a `VerificationReport`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationFailure {
    pub rule_id: String,
    pub message: String,
}
