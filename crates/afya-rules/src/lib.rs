//! # afya-rules
//!
//! The TOML rule book for the Afya assessment engine.
//!
//! ## Overview
//!
//! This crate provides [`TomlRuleBook`], which implements the
//! [`RuleSource`](afya_core::traits::RuleSource) trait. A rule book holds the
//! scoring configuration, one rule per symptom combination, a fallback rule,
//! and per-region profiles. A default book is compiled in and available via
//! [`TomlRuleBook::embedded`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use afya_rules::TomlRuleBook;
//!
//! let book = TomlRuleBook::embedded()?;
//! // Pass `book` to `afya_core::AssessmentEngine::new(...)`.
//! ```

pub mod book;
pub mod rule;

pub use book::TomlRuleBook;
pub use rule::{FallbackEntry, RuleBookConfig, RuleEntry};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use afya_contracts::{
        error::AfyaError,
        region::RegionCode,
        rule::UrgencyTier,
    };
    use afya_core::traits::RuleSource;

    use crate::TomlRuleBook;

    // ── Helpers ───────────────────────────────────────────────────────────────

    const FALLBACK: &str = r#"
        [fallback]
        actions = ["Monitor your symptoms"]

        [[fallback.conditions]]
        name = "Unclassified symptoms"
        weight = 1.0
    "#;

    /// Prefix `body` with a minimal valid fallback table.
    fn book(body: &str) -> String {
        format!("{}\n{}", FALLBACK, body)
    }

    fn expect_config_error(toml: &str, needle: &str) {
        match TomlRuleBook::from_toml_str(toml) {
            Err(AfyaError::ConfigError { reason }) => {
                assert!(reason.contains(needle), "expected '{needle}' in reason, got: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── 1. loading ────────────────────────────────────────────────────────────

    /// Symptoms listed in any order produce the canonical sorted key.
    #[test]
    fn test_rule_key_is_canonicalized() {
        let toml = book(
            r#"
            [[rules]]
            symptoms = ["Nausea", "fever", " headache "]
            urgency = "moderate"
            base_confidence = 85
            actions = ["Get tested"]

            [[rules.conditions]]
            name = "Malaria"
            weight = 0.6
            regions = ["NG"]
        "#,
        );

        let book = TomlRuleBook::from_toml_str(&toml).unwrap();
        let rule = book.lookup("fever,headache,nausea").expect("rule indexed by canonical key");

        assert_eq!(rule.urgency, UrgencyTier::Moderate);
        assert_eq!(rule.base_confidence, Some(85));
        assert_eq!(rule.conditions[0].regions, vec![RegionCode::new("ng")]);
    }

    /// A missing `[scoring]` table keeps every default; a partial one
    /// overrides only what it names.
    #[test]
    fn test_scoring_defaults_and_overrides() {
        let defaults = TomlRuleBook::from_toml_str(&book("")).unwrap();
        assert_eq!(defaults.scoring().max_confidence, 95);
        assert_eq!(defaults.scoring().photo_bonus, 10);

        let toml = book(
            r#"
            [scoring]
            photo_bonus = 15
            critical_symptoms = [" Chest-Pain "]
        "#,
        );
        let custom = TomlRuleBook::from_toml_str(&toml).unwrap();
        assert_eq!(custom.scoring().photo_bonus, 15);
        assert_eq!(custom.scoring().min_confidence, 30);
        assert_eq!(custom.scoring().critical_symptoms, vec!["chest-pain".to_string()]);
    }

    /// Conditions without `regions` are global.
    #[test]
    fn test_conditions_default_to_global() {
        let toml = book(
            r#"
            [[rules]]
            symptoms = ["headache"]
            urgency = "low"
            actions = ["Rest"]

            [[rules.conditions]]
            name = "Tension headache"
            weight = 1.0
        "#,
        );

        let book = TomlRuleBook::from_toml_str(&toml).unwrap();
        assert!(book.lookup("headache").unwrap().conditions[0].is_global());
        assert_eq!(book.fallback().urgency, UrgencyTier::Moderate);
        assert!(book.fallback().key.is_empty());
    }

    /// Region codes are normalized and looked up case-insensitively.
    #[test]
    fn test_regions_are_indexed_by_normalized_code() {
        let toml = book(
            r#"
            [[regions]]
            code = " KE "
            name = "Kenya"
            emergency_number = "999"
        "#,
        );

        let book = TomlRuleBook::from_toml_str(&toml).unwrap();
        let kenya = book.region(&RegionCode::new("ke")).expect("kenya profile");
        assert_eq!(kenya.emergency_number, "999");
        assert!(kenya.common_diseases.is_empty());
        assert_eq!(book.regions().len(), 1);
    }

    // ── 2. validation ─────────────────────────────────────────────────────────

    #[test]
    fn test_malformed_toml_is_rejected() {
        expect_config_error("[fallback\nactions = [", "failed to parse rule book TOML");
    }

    #[test]
    fn test_missing_fallback_is_rejected() {
        expect_config_error("rules = []", "failed to parse rule book TOML");
    }

    #[test]
    fn test_rule_without_symptoms_is_rejected() {
        let toml = book(
            r#"
            [[rules]]
            symptoms = ["  "]
            urgency = "low"
            actions = ["Rest"]
            conditions = [{ name = "X", weight = 1.0 }]
        "#,
        );
        expect_config_error(&toml, "rule lists no symptoms");
    }

    /// Two rules whose symptom lists differ only in order collide.
    #[test]
    fn test_duplicate_key_is_rejected() {
        let toml = book(
            r#"
            [[rules]]
            symptoms = ["fever", "rash"]
            urgency = "low"
            actions = ["Rest"]
            conditions = [{ name = "Measles", weight = 1.0 }]

            [[rules]]
            symptoms = ["rash", "fever"]
            urgency = "high"
            actions = ["Go to hospital"]
            conditions = [{ name = "Measles", weight = 1.0 }]
        "#,
        );
        expect_config_error(&toml, "duplicate symptom combination 'fever,rash'");
    }

    #[test]
    fn test_rule_without_actions_is_rejected() {
        let toml = book(
            r#"
            [[rules]]
            symptoms = ["cough"]
            urgency = "low"
            conditions = [{ name = "Cold", weight = 1.0 }]
        "#,
        );
        expect_config_error(&toml, "rule has no actions");
    }

    #[test]
    fn test_rule_without_conditions_is_rejected() {
        let toml = book(
            r#"
            [[rules]]
            symptoms = ["cough"]
            urgency = "low"
            actions = ["Rest"]
        "#,
        );
        expect_config_error(&toml, "rule has no conditions");
    }

    #[test]
    fn test_fallback_without_actions_is_rejected() {
        let toml = r#"
            [fallback]
            conditions = [{ name = "Unclassified", weight = 1.0 }]
        "#;
        expect_config_error(toml, "fallback: rule has no actions");
    }

    #[test]
    fn test_fallback_below_moderate_is_rejected() {
        let toml = r#"
            [fallback]
            urgency = "low"
            actions = ["Monitor your symptoms"]
            conditions = [{ name = "Unclassified", weight = 1.0 }]
        "#;
        expect_config_error(toml, "fallback: urgency 'low' is below moderate");
    }

    #[test]
    fn test_fallback_may_be_raised_to_high() {
        let toml = r#"
            [fallback]
            urgency = "high"
            actions = ["Seek care today"]
            conditions = [{ name = "Unclassified", weight = 1.0 }]
        "#;
        let book = TomlRuleBook::from_toml_str(toml).unwrap();
        assert_eq!(book.fallback().urgency, UrgencyTier::High);
    }

    #[test]
    fn test_base_confidence_above_hundred_is_rejected() {
        let toml = book(
            r#"
            [[rules]]
            symptoms = ["cough"]
            urgency = "low"
            base_confidence = 120
            actions = ["Rest"]
            conditions = [{ name = "Cold", weight = 1.0 }]
        "#,
        );
        expect_config_error(&toml, "base_confidence 120 exceeds 100");
    }

    #[test]
    fn test_duplicate_region_is_rejected() {
        let toml = book(
            r#"
            [[regions]]
            code = "ng"
            name = "Nigeria"
            emergency_number = "112"

            [[regions]]
            code = "NG"
            name = "Nigeria again"
            emergency_number = "199"
        "#,
        );
        expect_config_error(&toml, "duplicate region code 'ng'");
    }

    #[test]
    fn test_inverted_clamp_range_is_rejected() {
        let toml = book(
            r#"
            [scoring]
            min_confidence = 90
            max_confidence = 40
        "#,
        );
        expect_config_error(&toml, "min_confidence 90 is above max_confidence 40");

        let toml = book(
            r#"
            [scoring]
            max_confidence = 120
        "#,
        );
        expect_config_error(&toml, "max_confidence 120 exceeds 100");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TomlRuleBook::from_file(std::path::Path::new("/nonexistent/afya.toml")).unwrap_err();
        assert!(matches!(err, AfyaError::ConfigError { .. }));
    }

    // ── 3. embedded book ──────────────────────────────────────────────────────

    #[test]
    fn test_embedded_book_loads() {
        let book = TomlRuleBook::embedded().unwrap();
        assert!(book.rule_count() >= 10);
        assert_eq!(book.regions().len(), 5);
        assert_eq!(book.fallback().urgency, UrgencyTier::Moderate);
        assert_eq!(book.fallback().actions.len(), 3);
    }

    #[test]
    fn test_embedded_reference_rules() {
        let book = TomlRuleBook::embedded().unwrap();

        let malaria = book.lookup("fever,headache,nausea").unwrap();
        assert_eq!(malaria.urgency, UrgencyTier::Moderate);
        assert_eq!(malaria.base_confidence, Some(85));

        let cardiac = book.lookup("breathing,chest-pain").unwrap();
        assert_eq!(cardiac.urgency, UrgencyTier::High);
        assert_eq!(cardiac.base_confidence, Some(90));

        let nigeria = book.region(&RegionCode::new("ng")).unwrap();
        assert_eq!(nigeria.emergency_number, "112");
    }

    /// Every key in the embedded book is already canonical, so it round-trips
    /// through the canonicalizer unchanged.
    #[test]
    fn test_embedded_keys_are_canonical() {
        let book = TomlRuleBook::embedded().unwrap();
        for key in book.keys() {
            let recomputed = afya_contracts::symptom::canonical_key(key.split(','));
            assert_eq!(recomputed, key);
        }
    }

    /// Rules serialize to JSON for renderers.
    #[test]
    fn test_rule_serializes_to_json() {
        let book = TomlRuleBook::embedded().unwrap();
        let json = serde_json::to_value(book.lookup("headache").unwrap()).unwrap();
        assert_eq!(json["urgency"], "low");
        assert_eq!(json["key"], "headache");
    }
}
