//! The result schema the assessment runner verifies against.

use serde_json::json;

use afya_contracts::{
    config::ScoringConfig,
    verify::{ResultSchema, VerificationRule, VerificationRuleType},
};

use crate::engine::URGENCY_FLOOR_CHECK;

pub const STANDARD_SCHEMA_ID: &str = "assessment-result-v1";

/// Phrases advice must never contain: the engine suggests, it does not
/// diagnose.
pub const FORBIDDEN_PHRASES: &[&str] = &["diagnosis confirmed", "you definitely have"];

fn rule(rule_id: &str, description: &str, rule_type: VerificationRuleType) -> VerificationRule {
    VerificationRule {
        rule_id: rule_id.to_string(),
        description: description.to_string(),
        rule_type,
    }
}

/// Build the standard schema for results scored under `scoring`.
///
/// Requires a `ResultSchemaVerifier` created with `with_standard_rules`.
pub fn standard_result_schema(scoring: &ScoringConfig) -> ResultSchema {
    let json_schema = json!({
        "type": "object",
        "required": ["rule", "matched", "conditions", "urgency", "escalated", "confidence"],
        "properties": {
            "rule": {
                "type": "object",
                "required": ["key", "urgency", "actions", "seek_help"],
                "properties": {
                    "key": { "type": "string" },
                    "actions": { "type": "array", "items": { "type": "string" } },
                    "first_aid": { "type": "array", "items": { "type": "string" } },
                    "base_confidence": {
                        "type": ["integer", "null"],
                        "minimum": 0,
                        "maximum": 100
                    }
                }
            },
            "matched": { "enum": ["exact", "fallback"] },
            "conditions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "weight", "regions"],
                    "properties": {
                        "name": { "type": "string", "minLength": 1 },
                        "weight": { "type": "number", "minimum": 0, "maximum": 1 },
                        "regions": { "type": "array", "items": { "type": "string" } }
                    }
                }
            },
            "urgency": { "enum": ["low", "moderate", "high"] },
            "escalated": { "type": "boolean" },
            "confidence": { "type": "integer", "minimum": 0, "maximum": 100 },
            "region": {
                "type": ["object", "null"],
                "required": ["code", "name", "emergency_number"]
            }
        }
    });

    let mut rules = vec![
        rule(
            "actions-present",
            "every result carries at least one recommended action",
            VerificationRuleType::NonEmpty { field_path: "rule.actions".to_string() },
        ),
        rule(
            "conditions-present",
            "every result lists at least one candidate condition",
            VerificationRuleType::NonEmpty { field_path: "conditions".to_string() },
        ),
        rule(
            "urgency-allowed",
            "urgency is one of the three tiers",
            VerificationRuleType::AllowedValues {
                field_path: "urgency".to_string(),
                allowed: vec![json!("low"), json!("moderate"), json!("high")],
            },
        ),
        rule(
            "confidence-range",
            "confidence lies within the configured clamp range",
            VerificationRuleType::ConfidenceWithin {
                min: scoring.min_confidence,
                max: scoring.max_confidence,
            },
        ),
        rule(
            "urgency-floor",
            "urgency never drops below the rule's tier",
            VerificationRuleType::Custom { function_name: URGENCY_FLOOR_CHECK.to_string() },
        ),
    ];

    for phrase in FORBIDDEN_PHRASES {
        for field_path in ["rule.actions", "rule.seek_help"] {
            rules.push(rule(
                &format!("no-diagnosis-claim:{field_path}"),
                "advice must not claim a diagnosis",
                VerificationRuleType::ForbiddenPhrase {
                    field_path: field_path.to_string(),
                    phrase: phrase.to_string(),
                },
            ));
        }
    }

    ResultSchema {
        schema_id: STANDARD_SCHEMA_ID.to_string(),
        json_schema,
        rules,
    }
}

#[cfg(test)]
mod tests {
    use afya_contracts::{
        config::ScoringConfig,
        region::{RegionCode, RegionProfile},
        result::{AssessmentResult, RuleMatch},
        rule::{AssessmentRule, Condition, UrgencyTier},
    };
    use afya_core::traits::ResultVerifier;

    use super::standard_result_schema;
    use crate::ResultSchemaVerifier;

    fn make_result(confidence: u8) -> AssessmentResult {
        let rule = AssessmentRule {
            key: "fever,headache,nausea".to_string(),
            conditions: vec![
                Condition::regional("Malaria", 0.6, ["ng"]),
                Condition::global("Viral infection", 0.4),
            ],
            urgency: UrgencyTier::Moderate,
            base_confidence: Some(85),
            actions: vec!["Get a malaria test".to_string()],
            first_aid: vec![],
            seek_help: "Go to a clinic if the fever persists".to_string(),
        };
        AssessmentResult {
            conditions: rule.conditions.clone(),
            rule,
            matched: RuleMatch::Exact,
            urgency: UrgencyTier::High,
            escalated: true,
            confidence,
            region: Some(RegionProfile {
                code: RegionCode::new("ng"),
                name: "Nigeria".to_string(),
                emergency_number: "112".to_string(),
                common_diseases: vec![],
                seasonal_alert: String::new(),
                health_tip: String::new(),
            }),
        }
    }

    #[test]
    fn test_well_formed_result_passes() {
        let verifier = ResultSchemaVerifier::with_standard_rules();
        let schema = standard_result_schema(&ScoringConfig::default());

        let report = verifier.verify(&make_result(95), &schema).unwrap();
        assert!(report.passed, "expected pass, failures: {:?}", report.failures);
    }

    #[test]
    fn test_confidence_outside_clamp_range_fails() {
        let verifier = ResultSchemaVerifier::with_standard_rules();
        let schema = standard_result_schema(&ScoringConfig::default());

        let report = verifier.verify(&make_result(99), &schema).unwrap();
        assert!(!report.passed);
        assert!(report.failures.iter().any(|f| f.rule_id == "confidence-range"));
    }

    #[test]
    fn test_range_follows_scoring_config() {
        let verifier = ResultSchemaVerifier::with_standard_rules();
        let scoring = ScoringConfig { max_confidence: 99, ..ScoringConfig::default() };

        let report = verifier.verify(&make_result(99), &standard_result_schema(&scoring)).unwrap();
        assert!(report.passed, "expected pass, failures: {:?}", report.failures);
    }

    #[test]
    fn test_empty_actions_and_conditions_fail() {
        let verifier = ResultSchemaVerifier::with_standard_rules();
        let schema = standard_result_schema(&ScoringConfig::default());

        let mut result = make_result(80);
        result.rule.actions.clear();
        result.conditions.clear();

        let report = verifier.verify(&result, &schema).unwrap();
        let ids: Vec<&str> = report.failures.iter().map(|f| f.rule_id.as_str()).collect();
        assert!(ids.contains(&"actions-present"));
        assert!(ids.contains(&"conditions-present"));
    }

    #[test]
    fn test_diagnosis_claims_fail() {
        let verifier = ResultSchemaVerifier::with_standard_rules();
        let schema = standard_result_schema(&ScoringConfig::default());

        let mut result = make_result(80);
        result.rule.seek_help = "You definitely have malaria".to_string();

        let report = verifier.verify(&result, &schema).unwrap();
        assert!(report
            .failures
            .iter()
            .any(|f| f.rule_id == "no-diagnosis-claim:rule.seek_help"));
    }

    /// Without the built-in checks registered, the schema's custom rule fails.
    #[test]
    fn test_requires_standard_rules() {
        let verifier = ResultSchemaVerifier::new();
        let schema = standard_result_schema(&ScoringConfig::default());

        let report = verifier.verify(&make_result(80), &schema).unwrap();
        assert!(report.failures.iter().any(|f| f.rule_id == "urgency-floor"));
    }
}
