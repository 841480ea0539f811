//! Scoring configuration for urgency escalation and confidence.
//!
//! Every field has a default, so a rule book may omit the `[scoring]` table
//! entirely or override individual values:
//!
//! ```toml
//! [scoring]
//! photo_bonus = 15
//! min_confidence = 35
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AfyaError, AfyaResult};
use crate::rule::DEFAULT_BASE_CONFIDENCE;

/// Tunable constants for `escalate_urgency` and `compute_confidence`.
///
/// Adjustments are signed and summed onto the rule's base confidence; the
/// total is then clamped to `[min_confidence, max_confidence]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Base confidence for rules that do not declare one.
    pub default_base_confidence: u8,
    pub min_confidence: u8,
    pub max_confidence: u8,

    pub photo_bonus: i32,
    /// Symptom count at or above which `many_symptoms_bonus` applies.
    pub many_symptoms_threshold: usize,
    pub many_symptoms_bonus: i32,
    /// Applied whenever a duration bucket was given.
    pub duration_known_bonus: i32,
    pub minutes_adjustment: i32,
    pub days_adjustment: i32,
    /// Severity at or above which `high_severity_bonus` applies.
    pub high_severity_threshold: u8,
    pub high_severity_bonus: i32,
    /// Severity at or below which `low_severity_adjustment` applies.
    pub low_severity_threshold: u8,
    pub low_severity_adjustment: i32,
    /// Applied when a region was given and a condition is tagged with it.
    pub regional_match_bonus: i32,
    pub location_bonus: i32,

    /// Severity at or above which urgency escalates to `high`.
    pub escalation_severity: u8,
    /// Symptoms that escalate urgency to `high` whenever present.
    pub critical_symptoms: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_base_confidence: DEFAULT_BASE_CONFIDENCE,
            min_confidence: 30,
            max_confidence: 95,
            photo_bonus: 10,
            many_symptoms_threshold: 3,
            many_symptoms_bonus: 10,
            duration_known_bonus: 8,
            minutes_adjustment: -15,
            days_adjustment: 10,
            high_severity_threshold: 8,
            high_severity_bonus: 5,
            low_severity_threshold: 3,
            low_severity_adjustment: -10,
            regional_match_bonus: 10,
            location_bonus: 5,
            escalation_severity: 8,
            critical_symptoms: vec!["chest-pain".to_string(), "breathing".to_string()],
        }
    }
}

impl ScoringConfig {
    /// Check the percentage bounds. Rule sources call this at load time.
    pub fn validate(&self) -> AfyaResult<()> {
        if self.max_confidence > 100 {
            return Err(invalid(format!(
                "scoring.max_confidence {} exceeds 100",
                self.max_confidence
            )));
        }
        if self.min_confidence > self.max_confidence {
            return Err(invalid(format!(
                "scoring.min_confidence {} is above max_confidence {}",
                self.min_confidence, self.max_confidence
            )));
        }
        if self.default_base_confidence > 100 {
            return Err(invalid(format!(
                "scoring.default_base_confidence {} exceeds 100",
                self.default_base_confidence
            )));
        }
        Ok(())
    }

    /// Clamp a raw confidence sum into the configured range.
    ///
    /// An inverted range is read with its bounds swapped.
    pub fn clamp_confidence(&self, raw: i32) -> u8 {
        let low = self.min_confidence.min(self.max_confidence);
        let high = self.min_confidence.max(self.max_confidence);
        let clamped = raw.clamp(i32::from(low), i32::from(high));
        // Bounds are u8, so the clamped value always fits.
        u8::try_from(clamped).unwrap_or(high)
    }
}

fn invalid(reason: String) -> AfyaError {
    AfyaError::ConfigError { reason }
}
