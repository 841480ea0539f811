//! TOML-backed rule source.
//!
//! `TomlRuleBook` loads a `RuleBookConfig`, validates it, and indexes it for
//! the engine:
//!
//! 1. Normalize critical symptom names. Region codes and condition tags are
//!    already normalized when deserialized.
//! 2. Derive each rule's canonical key from its `symptoms`.
//! 3. Reject anything the engine could not answer sensibly: empty symptom
//!    lists, duplicate keys, rules without actions or conditions, base
//!    confidences above 100, duplicate regions, an inverted clamp range, a
//!    fallback urgency below moderate.
//!
//! Every rejection is an `AfyaError::ConfigError` naming the offending entry.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use afya_contracts::{
    config::ScoringConfig,
    error::{AfyaError, AfyaResult},
    region::{RegionCode, RegionProfile},
    rule::{AssessmentRule, UrgencyTier},
    symptom::{canonical_key, Symptom},
};
use afya_core::traits::RuleSource;

use crate::rule::{FallbackEntry, RuleBookConfig, RuleEntry};

/// The rule book compiled into the binary.
const EMBEDDED_RULE_BOOK: &str = include_str!("../data/afya.toml");

/// A `RuleSource` read from a TOML document.
///
/// ```rust,ignore
/// use afya_rules::TomlRuleBook;
///
/// let book = TomlRuleBook::from_file(Path::new("rules/clinic.toml"))?;
/// let engine = AssessmentEngine::new(Box::new(book));
/// ```
#[derive(Debug, Clone)]
pub struct TomlRuleBook {
    rules: BTreeMap<String, AssessmentRule>,
    fallback: AssessmentRule,
    regions: BTreeMap<RegionCode, RegionProfile>,
    scoring: ScoringConfig,
}

fn config_error(reason: String) -> AfyaError {
    AfyaError::ConfigError { reason }
}

impl TomlRuleBook {
    /// Parse and validate `s` as a rule book.
    ///
    /// Returns `AfyaError::ConfigError` if the TOML is malformed, does not
    /// match `RuleBookConfig`, or fails validation.
    pub fn from_toml_str(s: &str) -> AfyaResult<Self> {
        let config: RuleBookConfig = toml::from_str(s)
            .map_err(|e| config_error(format!("failed to parse rule book TOML: {}", e)))?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as a rule book.
    pub fn from_file(path: &Path) -> AfyaResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            config_error(format!("failed to read rule book '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// The default rule book shipped with the crate.
    pub fn embedded() -> AfyaResult<Self> {
        Self::from_toml_str(EMBEDDED_RULE_BOOK)
    }

    /// Validate an already-deserialized configuration.
    pub fn from_config(config: RuleBookConfig) -> AfyaResult<Self> {
        let scoring = validate_scoring(config.scoring)?;
        let fallback = build_fallback(config.fallback)?;

        let mut rules = BTreeMap::new();
        for (index, entry) in config.rules.into_iter().enumerate() {
            let rule = build_rule(index, entry)?;
            if rules.contains_key(&rule.key) {
                return Err(config_error(format!(
                    "rules[{}]: duplicate symptom combination '{}'",
                    index, rule.key
                )));
            }
            rules.insert(rule.key.clone(), rule);
        }

        let mut regions = BTreeMap::new();
        for profile in config.regions {
            if profile.code.as_str().is_empty() || profile.code.is_global() {
                return Err(config_error(format!(
                    "region '{}' must have a specific, non-empty code",
                    profile.name
                )));
            }
            if regions.contains_key(&profile.code) {
                return Err(config_error(format!("duplicate region code '{}'", profile.code)));
            }
            regions.insert(profile.code.clone(), profile);
        }

        debug!(
            rules = rules.len(),
            regions = regions.len(),
            "rule book loaded"
        );

        Ok(Self { rules, fallback, regions, scoring })
    }

    /// Number of symptom combinations with a dedicated rule.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Canonical keys of every rule, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

fn validate_scoring(mut scoring: ScoringConfig) -> AfyaResult<ScoringConfig> {
    scoring.validate()?;
    scoring.critical_symptoms = scoring
        .critical_symptoms
        .iter()
        .map(|s| Symptom::new(s).as_str().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    Ok(scoring)
}

fn check_base_confidence(label: &str, base: Option<u8>) -> AfyaResult<()> {
    match base {
        Some(b) if b > 100 => Err(config_error(format!(
            "{}: base_confidence {} exceeds 100",
            label, b
        ))),
        _ => Ok(()),
    }
}

fn build_rule(index: usize, entry: RuleEntry) -> AfyaResult<AssessmentRule> {
    let key = canonical_key(entry.symptoms.iter().map(String::as_str));
    let label = format!("rules[{}]", index);

    if key.is_empty() {
        return Err(config_error(format!("{}: rule lists no symptoms", label)));
    }
    if entry.actions.is_empty() {
        return Err(config_error(format!("{} ('{}'): rule has no actions", label, key)));
    }
    if entry.conditions.is_empty() {
        return Err(config_error(format!("{} ('{}'): rule has no conditions", label, key)));
    }
    check_base_confidence(&label, entry.base_confidence)?;

    Ok(AssessmentRule {
        key,
        conditions: entry.conditions,
        urgency: entry.urgency,
        base_confidence: entry.base_confidence,
        actions: entry.actions,
        first_aid: entry.first_aid,
        seek_help: entry.seek_help,
    })
}

fn build_fallback(entry: FallbackEntry) -> AfyaResult<AssessmentRule> {
    if entry.actions.is_empty() {
        return Err(config_error("fallback: rule has no actions".to_string()));
    }
    if entry.conditions.is_empty() {
        return Err(config_error("fallback: rule has no conditions".to_string()));
    }
    // Unknown combinations answer at least moderate.
    if entry.urgency < UrgencyTier::Moderate {
        return Err(config_error(format!(
            "fallback: urgency '{}' is below moderate",
            entry.urgency.as_str()
        )));
    }
    check_base_confidence("fallback", entry.base_confidence)?;

    Ok(AssessmentRule {
        key: String::new(),
        conditions: entry.conditions,
        urgency: entry.urgency,
        base_confidence: entry.base_confidence,
        actions: entry.actions,
        first_aid: entry.first_aid,
        seek_help: entry.seek_help,
    })
}

impl RuleSource for TomlRuleBook {
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
