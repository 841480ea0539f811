//! Assessment rules, candidate conditions, and urgency tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::region::{RegionCode, GLOBAL_REGION};

/// Base confidence used when neither the rule nor the scoring configuration
/// specifies one.
pub const DEFAULT_BASE_CONFIDENCE: u8 = 70;

/// How quickly the user should seek care.
///
/// Ordered `Low < Moderate < High`; escalation takes the maximum of the
/// rule's tier and whatever the input triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Low,
    Moderate,
    High,
}

impl UrgencyTier {
    pub fn as_str(self) -> &'static str {
        match self {
            UrgencyTier::Low => "low",
            UrgencyTier::Moderate => "moderate",
            UrgencyTier::High => "high",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn global_regions() -> Vec<RegionCode> {
    vec![RegionCode::new(GLOBAL_REGION)]
}

/// A candidate condition attached to a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    /// Relative likelihood among the rule's conditions, 0.0–1.0.
    pub weight: f64,
    /// Region codes this condition is relevant to. Defaults to `["global"]`.
    #[serde(default = "global_regions")]
    pub regions: Vec<RegionCode>,
}

impl Condition {
    /// A condition relevant everywhere.
    pub fn global(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            regions: global_regions(),
        }
    }

    /// A condition relevant only in the listed regions.
    pub fn regional<I, S>(name: impl Into<String>, weight: f64, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            weight,
            regions: regions.into_iter().map(RegionCode::new).collect(),
        }
    }

    /// True if the condition is tagged `global`.
    pub fn is_global(&self) -> bool {
        self.regions.iter().any(RegionCode::is_global)
    }

    /// True if the condition is explicitly tagged with `region`.
    pub fn tagged_with(&self, region: &RegionCode) -> bool {
        self.regions.iter().any(|r| r == region)
    }

    /// True if the condition should be shown for `region`.
    pub fn applies_to(&self, region: &RegionCode) -> bool {
        self.is_global() || self.tagged_with(region)
    }
}

/// A static record describing the advice for one symptom combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRule {
    /// Canonical symptom key this rule answers (sorted, comma-joined).
    /// Empty for the fallback rule.
    pub key: String,
    /// Ordered from most to least likely.
    pub conditions: Vec<Condition>,
    pub urgency: UrgencyTier,
    /// 0–100. `None` falls back to the scoring configuration's default.
    pub base_confidence: Option<u8>,
    pub actions: Vec<String>,
    pub first_aid: Vec<String>,
    pub seek_help: String,
}
