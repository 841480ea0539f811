//! Schema-based result verifier.
//!
//! `ResultSchemaVerifier` implements the `ResultVerifier` trait from
//! `afya-core`. The result is serialized to JSON and checked in two phases:
//!
//! 1. **Structural**: the JSON is validated against
//!    `ResultSchema::json_schema` using the `jsonschema` crate.
//! 2. **Semantic**: each `VerificationRule` in `ResultSchema::rules` is
//!    evaluated in order. All failures are collected before returning.
//!
//! Custom rules delegate to named functions registered via `register_rule`.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use afya_contracts::{
    error::{AfyaError, AfyaResult},
    result::AssessmentResult,
    verify::{ResultSchema, VerificationFailure, VerificationReport, VerificationRuleType},
};
use afya_core::traits::ResultVerifier;

/// A caller-supplied verification function.
///
/// Receives the serialized result. Returns `Some(message)` when the check
/// fails, or `None` on success.
pub type CustomVerifierFn = Box<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Name of the built-in custom check that urgency never drops below the
/// rule's tier and that `escalated` agrees with the two tiers.
pub const URGENCY_FLOOR_CHECK: &str = "urgency-floor";

/// The Afya result verifier.
pub struct ResultSchemaVerifier {
    custom_rules: HashMap<String, CustomVerifierFn>,
}

impl ResultSchemaVerifier {
    /// Create a verifier with no custom rules registered.
    pub fn new() -> Self {
        Self {
            custom_rules: HashMap::new(),
        }
    }

    /// Create a verifier with the built-in custom checks registered, as
    /// referenced by `standard_result_schema`.
    pub fn with_standard_rules() -> Self {
        let mut verifier = Self::new();
        verifier.register_rule(URGENCY_FLOOR_CHECK, Box::new(check_urgency_floor));
        verifier
    }

    /// Register a custom verification function under `name`.
    ///
    /// Registering the same name twice replaces the previous function.
    pub fn register_rule(&mut self, name: impl Into<String>, f: CustomVerifierFn) {
        self.custom_rules.insert(name.into(), f);
    }

    /// Verify an already-serialized result.
    pub fn verify_value(&self, payload: &Value, schema: &ResultSchema) -> VerificationReport {
        let mut failures: Vec<VerificationFailure> = Vec::new();

        // ── Phase 1: JSON Schema structural validation ────────────────────────
        if !schema.json_schema.is_null() {
            match jsonschema::validator_for(&schema.json_schema) {
                Ok(validator) => {
                    for error in validator.iter_errors(payload) {
                        let message = format!(
                            "JSON Schema violation at {}: {}",
                            error.instance_path, error
                        );
                        warn!(schema_id = %schema.schema_id, %message, "structural validation failure");
                        failures.push(VerificationFailure {
                            rule_id: "json-schema".to_string(),
                            message,
                        });
                    }
                }
                Err(e) => {
                    let message = format!("invalid JSON Schema document: {e}");
                    warn!(schema_id = %schema.schema_id, %message, "schema compilation failure");
                    failures.push(VerificationFailure {
                        rule_id: "json-schema".to_string(),
                        message,
                    });
                }
            }
        }

        // ── Phase 2: Semantic rule evaluation ────────────────────────────────
        for rule in &schema.rules {
            debug!(
                rule_id = %rule.rule_id,
                description = %rule.description,
                "evaluating verification rule"
            );

            let failure_msg: Option<String> = match &rule.rule_type {
                VerificationRuleType::RequiredField { field_path } => {
                    if resolve_path(payload, field_path).is_none() {
                        Some(format!("required field '{field_path}' is missing or null"))
                    } else {
                        None
                    }
                }

                VerificationRuleType::NonEmpty { field_path } => {
                    match resolve_path(payload, field_path).and_then(Value::as_array) {
                        Some(items) if !items.is_empty() => None,
                        Some(_) => Some(format!("field '{field_path}' is an empty list")),
                        None => Some(format!("field '{field_path}' is missing or not a list")),
                    }
                }

                VerificationRuleType::AllowedValues { field_path, allowed } => {
                    match resolve_path(payload, field_path) {
                        None => Some(format!(
                            "field '{field_path}' is missing; cannot check allowed values"
                        )),
                        Some(actual) if allowed.contains(actual) => None,
                        Some(actual) => Some(format!(
                            "field '{field_path}' has value {actual} which is not in the allowed set"
                        )),
                    }
                }

                VerificationRuleType::ConfidenceWithin { min, max } => {
                    match payload.get("confidence").and_then(Value::as_u64) {
                        None => Some("confidence is missing or not a whole number".to_string()),
                        Some(c) if c < u64::from(*min) || c > u64::from(*max) => {
                            Some(format!("confidence {c} outside [{min}, {max}]"))
                        }
                        Some(_) => None,
                    }
                }

                // Absent fields and non-string values have nothing to check.
                VerificationRuleType::ForbiddenPhrase { field_path, phrase } => {
                    let needle = phrase.to_lowercase();
                    let hit = match resolve_path(payload, field_path) {
                        Some(Value::String(s)) => s.to_lowercase().contains(&needle),
                        Some(Value::Array(items)) => items
                            .iter()
                            .filter_map(Value::as_str)
                            .any(|s| s.to_lowercase().contains(&needle)),
                        _ => false,
                    };
                    hit.then(|| format!("field '{field_path}' contains forbidden phrase '{phrase}'"))
                }

                // An unregistered name is itself a failure.
                VerificationRuleType::Custom { function_name } => {
                    match self.custom_rules.get(function_name.as_str()) {
                        Some(f) => f(payload),
                        None => Some(format!(
                            "no custom rule registered for function name '{function_name}'"
                        )),
                    }
                }
            };

            if let Some(message) = failure_msg {
                warn!(
                    rule_id = %rule.rule_id,
                    %message,
                    "semantic rule failed"
                );
                failures.push(VerificationFailure {
                    rule_id: rule.rule_id.clone(),
                    message,
                });
            }
        }

        let passed = failures.is_empty();
        debug!(
            schema_id = %schema.schema_id,
            passed,
            failure_count = failures.len(),
            "verification complete"
        );

        VerificationReport { passed, failures }
    }
}

impl Default for ResultSchemaVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultVerifier for ResultSchemaVerifier {
    /// Serialize `result` and verify it against `schema`.
    ///
    /// Fails with `AfyaError::SchemaValidation` only if the result cannot be
    /// serialized; rule failures are reported in the returned report.
    fn verify(&self, result: &AssessmentResult, schema: &ResultSchema) -> AfyaResult<VerificationReport> {
        let payload = serde_json::to_value(result).map_err(|e| AfyaError::SchemaValidation {
            reason: format!("failed to serialize assessment result: {e}"),
        })?;
        Ok(self.verify_value(&payload, schema))
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Resolve a dot-notation field path (e.g. `"rule.actions"`). Returns `None`
/// when any segment is missing or the value is JSON `null`.
fn resolve_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let mut current = value;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(v) if !v.is_null() => current = v,
            _ => return None,
        }
    }
    Some(current)
}

fn urgency_rank(tier: Option<&str>) -> Option<u8> {
    match tier? {
        "low" => Some(0),
        "moderate" => Some(1),
        "high" => Some(2),
        _ => None,
    }
}

fn check_urgency_floor(payload: &Value) -> Option<String> {
    let final_rank = urgency_rank(payload.get("urgency").and_then(Value::as_str));
    let rule_rank = urgency_rank(resolve_path(payload, "rule.urgency").and_then(Value::as_str));
    let (final_rank, rule_rank) = match (final_rank, rule_rank) {
        (Some(f), Some(r)) => (f, r),
        _ => return Some("urgency or rule.urgency is missing or unknown".to_string()),
    };

    if final_rank < rule_rank {
        return Some("urgency is lower than the rule's urgency".to_string());
    }
    let escalated = payload.get("escalated").and_then(Value::as_bool).unwrap_or(false);
    if escalated != (final_rank > rule_rank) {
        return Some(format!(
            "escalated is {escalated} but urgency {} the rule's tier",
            if final_rank > rule_rank { "exceeds" } else { "equals" }
        ));
    }
    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────
