//! Rule book schema as it appears in TOML.
//!
//! A `RuleBookConfig` is deserialized as-is and then validated and
//! normalized by `TomlRuleBook`. Authors list a rule's symptoms in any order;
//! the lookup key is derived from them at load time.

use serde::{Deserialize, Serialize};

use afya_contracts::{
    config::ScoringConfig,
    region::RegionProfile,
    rule::{Condition, UrgencyTier},
};

/// One `[[rules]]` entry.
///
/// ```toml
/// [[rules]]
/// symptoms = ["headache", "fever"]
/// urgency = "moderate"
/// base_confidence = 80
/// actions = ["Rest", "Drink fluids"]
/// seek_help = "If fever lasts more than 3 days"
///
/// [[rules.conditions]]
/// name = "Malaria"
/// weight = 0.6
/// regions = ["ng", "gh"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEntry {
    /// The symptom combination this rule answers. Order does not matter.
    pub symptoms: Vec<String>,

    pub urgency: UrgencyTier,

    /// 0–100. Omit to use `scoring.default_base_confidence`.
    pub base_confidence: Option<u8>,

    /// Most likely first. Conditions without `regions` are global.
    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub actions: Vec<String>,

    #[serde(default)]
    pub first_aid: Vec<String>,

    #[serde(default)]
    pub seek_help: String,
}

/// The `[fallback]` table: the rule used when no combination matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackEntry {
    #[serde(default = "fallback_urgency")]
    pub urgency: UrgencyTier,

    pub base_confidence: Option<u8>,

    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub actions: Vec<String>,

    #[serde(default)]
    pub first_aid: Vec<String>,

    #[serde(default)]
    pub seek_help: String,
}

fn fallback_urgency() -> UrgencyTier {
    UrgencyTier::Moderate
}

/// The top-level structure deserialized from a rule book file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleBookConfig {
    /// Omitted fields keep their defaults.
    #[serde(default)]
    pub scoring: ScoringConfig,

    pub fallback: FallbackEntry,

    #[serde(default)]
    pub rules: Vec<RuleEntry>,

    #[serde(default)]
    pub regions: Vec<RegionProfile>,
}
