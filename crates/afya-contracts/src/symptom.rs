//! Symptom identifiers and order-insensitive symptom sets.
//!
//! A `SymptomSet` is the lookup key for the rule table. Its canonical key is
//! the identifiers sorted lexicographically and joined with
//! [`KEY_SEPARATOR`], so `{headache, fever}` and `{fever, headache}` resolve
//! to the same rule.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between identifiers in a canonical rule key.
pub const KEY_SEPARATOR: &str = ",";

/// A fixed-vocabulary symptom identifier, e.g. `fever` or `chest-pain`.
///
/// Identifiers are normalized on construction: surrounding whitespace is
/// trimmed and the value is lowercased. Deserialization goes through the
/// same path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Symptom(String);

impl Symptom {
    /// Construct a normalized symptom identifier.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Symptom {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of symptoms a user reported.
///
/// Backed by a `BTreeSet`, so iteration is always in sorted order and
/// duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomSet {
    inner: BTreeSet<Symptom>,
}

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symptom. Blank identifiers are ignored.
    ///
    /// Returns true if the symptom was not already present.
    pub fn insert(&mut self, symptom: impl AsRef<str>) -> bool {
        let symptom = Symptom::new(symptom);
        if symptom.0.is_empty() {
            return false;
        }
        self.inner.insert(symptom)
    }

    /// Remove a symptom. Returns true if it was present.
    pub fn remove(&mut self, symptom: impl AsRef<str>) -> bool {
        self.inner.remove(&Symptom::new(symptom))
    }

    /// Select the symptom if absent, deselect it if present.
    ///
    /// Returns true when the symptom is selected after the call.
    pub fn toggle(&mut self, symptom: impl AsRef<str>) -> bool {
        let symptom = Symptom::new(symptom);
        if symptom.0.is_empty() {
            return false;
        }
        if self.inner.remove(&symptom) {
            false
        } else {
            self.inner.insert(symptom);
            true
        }
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.inner.contains(&Symptom::new(symptom))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Iterate symptoms in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Symptom> {
        self.inner.iter()
    }

    /// The rule-table key for this set: sorted identifiers joined by `,`.
    pub fn canonical_key(&self) -> String {
        canonical_key(self.inner.iter().map(Symptom::as_str))
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SymptomSet::new();
        for symptom in iter {
            set.insert(symptom);
        }
        set
    }
}

/// Build a canonical key from identifiers in any order.
///
/// Identifiers are normalized, blanks and duplicates are dropped, and the
/// remainder is sorted explicitly before joining. Rule books use this to key
/// rules whose symptoms were authored in arbitrary order.
pub fn canonical_key<'a>(symptoms: impl IntoIterator<Item = &'a str>) -> String {
    let mut names: Vec<String> = symptoms
        .into_iter()
        .map(|s| Symptom::new(s).0)
        .filter(|s| !s.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names.join(KEY_SEPARATOR)
}
