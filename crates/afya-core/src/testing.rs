//! Small in-memory rule source shared by this crate's unit tests.

use std::collections::BTreeMap;

use afya_contracts::{
    config::ScoringConfig,
    region::{RegionCode, RegionProfile},
    rule::{AssessmentRule, Condition, UrgencyTier},
    symptom::canonical_key,
};

use crate::traits::RuleSource;

pub(crate) struct FixtureRules {
    rules: BTreeMap<String, AssessmentRule>,
    fallback: AssessmentRule,
    regions: BTreeMap<RegionCode, RegionProfile>,
    scoring: ScoringConfig,
}

fn rule(
    symptoms: &[&str],
    urgency: UrgencyTier,
    base: Option<u8>,
    conditions: Vec<Condition>,
) -> AssessmentRule {
    AssessmentRule {
        key: canonical_key(symptoms.iter().copied()),
        conditions,
        urgency,
        base_confidence: base,
        actions: vec!["Rest and drink fluids".to_string()],
        first_aid: vec![],
        seek_help: "See a clinician if symptoms persist".to_string(),
    }
}

fn region(code: &str, name: &str, emergency: &str) -> RegionProfile {
    RegionProfile {
        code: RegionCode::new(code),
        name: name.to_string(),
        emergency_number: emergency.to_string(),
        common_diseases: vec![],
        seasonal_alert: String::new(),
        health_tip: String::new(),
    }
}

impl FixtureRules {
    pub(crate) fn new() -> Self {
        let rules = [
            rule(
                &["fever", "headache", "nausea"],
                UrgencyTier::Moderate,
                Some(85),
                vec![
                    Condition::regional("Malaria", 0.6, ["ng", "gh", "ke"]),
                    Condition::regional("Typhoid", 0.25, ["ng", "gh"]),
                    Condition::global("Viral infection", 0.15),
                ],
            ),
            rule(
                &["chest-pain", "breathing"],
                UrgencyTier::High,
                Some(90),
                vec![Condition::global("Cardiac event", 0.7)],
            ),
            rule(
                &["headache"],
                UrgencyTier::Low,
                Some(65),
                vec![Condition::global("Tension headache", 0.6)],
            ),
            rule(
                &["fever"],
                UrgencyTier::Moderate,
                None,
                vec![
                    Condition::regional("Malaria", 0.7, ["ng"]),
                    Condition::regional("Influenza", 0.3, ["ke"]),
                ],
            ),
        ]
        .into_iter()
        .map(|r| (r.key.clone(), r))
        .collect();

        let fallback = AssessmentRule {
            key: String::new(),
            conditions: vec![Condition::global("Unclassified symptoms", 1.0)],
            urgency: UrgencyTier::Moderate,
            base_confidence: None,
            actions: vec![
                "Monitor your symptoms".to_string(),
                "Stay hydrated".to_string(),
                "Seek care if symptoms worsen".to_string(),
            ],
            first_aid: vec![],
            seek_help: "Visit a clinic if you feel worse".to_string(),
        };

        let regions = [region("ng", "Nigeria", "112"), region("ke", "Kenya", "999")]
            .into_iter()
            .map(|r| (r.code.clone(), r))
            .collect();

        Self {
            rules,
            fallback,
            regions,
            scoring: ScoringConfig::default(),
        }
    }
}

impl RuleSource for FixtureRules {
    fn lookup(&self, key: &str) -> Option<&AssessmentRule> {
        self.rules.get(key)
    }

    fn fallback(&self) -> &AssessmentRule {
        &self.fallback
    }

    fn region(&self, code: &RegionCode) -> Option<&RegionProfile> {
        self.regions.get(code)
    }

    fn regions(&self) -> Vec<&RegionProfile> {
        self.regions.values().collect()
    }

    fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }
}
