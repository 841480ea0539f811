//! Region codes and per-region health profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel region tag meaning "applies everywhere".
pub const GLOBAL_REGION: &str = "global";

/// Short code identifying a geographic area, e.g. `ng` or `ke`.
///
/// Normalized to trimmed lowercase on construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the `global` sentinel.
    pub fn is_global(&self) -> bool {
        self.0 == GLOBAL_REGION
    }
}

impl From<String> for RegionCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static, per-region information surfaced alongside a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub code: RegionCode,
    /// Display name, e.g. "Nigeria".
    pub name: String,
    /// Local emergency number to show on high-urgency results.
    pub emergency_number: String,
    #[serde(default)]
    pub common_diseases: Vec<String>,
    #[serde(default)]
    pub seasonal_alert: String,
    #[serde(default)]
    pub health_tip: String,
}
