//! Assessment input types.
//!
//! `AssessmentInput` is a plain request-scoped value: the engine reads it and
//! never holds on to it. Boundary parsing (CLI flags, form values) goes
//! through the `FromStr` impls here, which are the only fallible paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::AfyaError,
    region::RegionCode,
    symptom::SymptomSet,
};

/// Self-reported severity on a 1–10 scale.
///
/// Out-of-range values are clamped on construction; the engine never sees a
/// value outside 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(score: u8) -> Self {
        Self(score.clamp(Self::MIN, Self::MAX))
    }

    pub fn score(self) -> u8 {
        self.0
    }
}

impl Default for Severity {
    /// A middle-of-the-scale value used when the user skipped the severity step.
    fn default() -> Self {
        Self(5)
    }
}

impl From<u8> for Severity {
    fn from(score: u8) -> Self {
        Self::new(score)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl From<SeverityLabel> for Severity {
    fn from(label: SeverityLabel) -> Self {
        Self(label.score())
    }
}

impl FromStr for Severity {
    type Err = AfyaError;

    /// Accepts either a number in 1..=10 or one of `mild`, `moderate`, `severe`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(score) = s.parse::<u8>() {
            if (Self::MIN..=Self::MAX).contains(&score) {
                return Ok(Self(score));
            }
            return Err(AfyaError::InvalidInput {
                reason: format!("severity {score} is outside 1-10"),
            });
        }
        s.parse::<SeverityLabel>().map(Severity::from)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

/// Coarse severity labels offered by the simpler intake flows.
///
/// `severe` maps to 8 so it crosses the escalation threshold; `mild` maps to 3
/// so it receives the low-severity confidence penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLabel {
    Mild,
    Moderate,
    Severe,
}

impl SeverityLabel {
    pub fn score(self) -> u8 {
        match self {
            SeverityLabel::Mild => 3,
            SeverityLabel::Moderate => 5,
            SeverityLabel::Severe => 8,
        }
    }
}

impl FromStr for SeverityLabel {
    type Err = AfyaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(SeverityLabel::Mild),
            "moderate" => Ok(SeverityLabel::Moderate),
            "severe" => Ok(SeverityLabel::Severe),
            other => Err(AfyaError::InvalidInput {
                reason: format!("unknown severity '{other}' (expected 1-10, mild, moderate or severe)"),
            }),
        }
    }
}

/// How long the symptoms have been present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    #[serde(rename = "minutes")]
    Minutes,
    #[serde(rename = "hours")]
    Hours,
    #[serde(rename = "days")]
    Days,
    #[serde(rename = "weeks+")]
    WeeksPlus,
}

impl DurationBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            DurationBucket::Minutes => "minutes",
            DurationBucket::Hours => "hours",
            DurationBucket::Days => "days",
            DurationBucket::WeeksPlus => "weeks+",
        }
    }
}

impl FromStr for DurationBucket {
    type Err = AfyaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minutes" => Ok(DurationBucket::Minutes),
            "hours" => Ok(DurationBucket::Hours),
            "days" => Ok(DurationBucket::Days),
            "weeks+" | "weeks" => Ok(DurationBucket::WeeksPlus),
            other => Err(AfyaError::InvalidInput {
                reason: format!("unknown duration '{other}' (expected minutes, hours, days or weeks+)"),
            }),
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the engine needs for one assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub symptoms: SymptomSet,
    pub severity: Severity,
    /// `None` when the user skipped the duration step.
    pub duration: Option<DurationBucket>,
    pub region: Option<RegionCode>,
    pub photo_present: bool,
    pub location_present: bool,
}

impl AssessmentInput {
    /// An input with the given symptoms and severity and no optional signals.
    pub fn new(symptoms: SymptomSet, severity: Severity) -> Self {
        Self {
            symptoms,
            severity,
            duration: None,
            region: None,
            photo_present: false,
            location_present: false,
        }
    }

    pub fn with_duration(mut self, duration: DurationBucket) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_region(mut self, region: RegionCode) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_photo(mut self) -> Self {
        self.photo_present = true;
        self
    }

    pub fn with_location(mut self) -> Self {
        self.location_present = true;
        self
    }
}
