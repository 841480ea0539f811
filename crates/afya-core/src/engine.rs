//! The Afya assessment engine.
//!
//! Every operation here is a pure function of its arguments and the static
//! tables behind a `RuleSource`:
//!
//!   SymptomSet → resolve_rule → filter_conditions_by_region
//!              → escalate_urgency → compute_confidence → AssessmentResult
//!
//! No I/O, no clocks, no randomness. Calling `assess` twice with the same
//! input yields the same outcome.

use tracing::{debug, info};

use afya_contracts::{
    config::ScoringConfig,
    input::{AssessmentInput, DurationBucket},
    region::RegionCode,
    result::{AssessmentOutcome, AssessmentResult, RuleMatch},
    rule::{AssessmentRule, Condition, UrgencyTier},
    symptom::SymptomSet,
};

use crate::traits::RuleSource;

/// Reason reported when the symptom set is empty.
pub const INSUFFICIENT_SYMPTOMS: &str = "no symptoms selected; select at least one symptom to continue";

/// Resolve the rule for a symptom set.
///
/// The set's canonical key (sorted, comma-joined) is looked up in the rule
/// table. Unknown combinations resolve to the source's fallback rule; this
/// function never fails.
pub fn resolve_rule<'a>(source: &'a dyn RuleSource, symptoms: &SymptomSet) -> (&'a AssessmentRule, RuleMatch) {
    let key = symptoms.canonical_key();
    match source.lookup(&key) {
        Some(rule) => {
            debug!(key = %key, "rule matched");
            (rule, RuleMatch::Exact)
        }
        None => {
            debug!(key = %key, "no rule for symptom combination, using fallback");
            (source.fallback(), RuleMatch::Fallback)
        }
    }
}

/// Final urgency for `rule` given `input`.
///
/// High severity or any critical symptom raises the tier to at least `High`.
/// The result is `max(rule.urgency, trigger)`, so urgency never drops below
/// the rule's tier.
pub fn escalate_urgency(rule: &AssessmentRule, input: &AssessmentInput, config: &ScoringConfig) -> UrgencyTier {
    let severe = input.severity.score() >= config.escalation_severity;
    let critical = config
        .critical_symptoms
        .iter()
        .any(|s| input.symptoms.contains(s));

    let trigger = if severe || critical {
        UrgencyTier::High
    } else {
        UrgencyTier::Low
    };

    rule.urgency.max(trigger)
}

/// One additive term in a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceAdjustment {
    /// Short name of the factor, e.g. "photo" or "duration-minutes".
    pub factor: &'static str,
    pub delta: i32,
}

/// Every adjustment that applies to `rule` and `input`, in a fixed order.
///
/// Each factor contributes at most once. The base confidence is not
/// included; see [`compute_confidence`].
pub fn confidence_adjustments(
    rule: &AssessmentRule,
    input: &AssessmentInput,
    config: &ScoringConfig,
) -> Vec<ConfidenceAdjustment> {
    let mut adjustments = Vec::new();
    let mut push = |factor: &'static str, delta: i32| {
        adjustments.push(ConfidenceAdjustment { factor, delta });
    };

    if input.photo_present {
        push("photo", config.photo_bonus);
    }
    if input.symptoms.len() >= config.many_symptoms_threshold {
        push("symptom-count", config.many_symptoms_bonus);
    }
    if let Some(duration) = input.duration {
        push("duration-known", config.duration_known_bonus);
        match duration {
            DurationBucket::Minutes => push("duration-minutes", config.minutes_adjustment),
            DurationBucket::Days => push("duration-days", config.days_adjustment),
            DurationBucket::Hours | DurationBucket::WeeksPlus => {}
        }
    }

    let severity = input.severity.score();
    if severity >= config.high_severity_threshold {
        push("high-severity", config.high_severity_bonus);
    } else if severity <= config.low_severity_threshold {
        push("low-severity", config.low_severity_adjustment);
    }

    if let Some(region) = &input.region {
        if rule.conditions.iter().any(|c| c.tagged_with(region)) {
            push("regional-match", config.regional_match_bonus);
        }
    }
    if input.location_present {
        push("location", config.location_bonus);
    }

    adjustments
}

/// Confidence score for `rule` given `input`.
///
/// Starts from the rule's base confidence (or the configured default), adds
/// every applicable adjustment, and clamps the sum to
/// `[config.min_confidence, config.max_confidence]`.
pub fn compute_confidence(rule: &AssessmentRule, input: &AssessmentInput, config: &ScoringConfig) -> u8 {
    let base = i32::from(rule.base_confidence.unwrap_or(config.default_base_confidence));
    let raw = base
        + confidence_adjustments(rule, input, config)
            .iter()
            .map(|a| a.delta)
            .sum::<i32>();
    config.clamp_confidence(raw)
}

/// Keep the conditions relevant to `region`.
///
/// A condition is kept if it is tagged with `region` or with `global`.
/// Relative order is preserved. If nothing survives, the unfiltered list is
/// returned so the user never sees an empty recommendation set.
pub fn filter_conditions_by_region(conditions: &[Condition], region: &RegionCode) -> Vec<Condition> {
    let filtered: Vec<Condition> = conditions
        .iter()
        .filter(|c| c.applies_to(region))
        .cloned()
        .collect();

    if filtered.is_empty() {
        debug!(region = %region, "region filter removed every condition, keeping unfiltered list");
        conditions.to_vec()
    } else {
        filtered
    }
}

/// The stateless assessment engine.
///
/// Holds the rule source and nothing else; each call to `assess` is an
/// independent, pure transformation from input to outcome.
pub struct AssessmentEngine {
    source: Box<dyn RuleSource>,
}

impl AssessmentEngine {
    pub fn new(source: Box<dyn RuleSource>) -> Self {
        Self { source }
    }

    /// The rule source backing this engine.
    pub fn source(&self) -> &dyn RuleSource {
        self.source.as_ref()
    }

    /// Assess one input.
    ///
    /// An empty symptom set yields `AssessmentOutcome::InsufficientInput`;
    /// every other input yields `Assessed`.
    pub fn assess(&self, input: &AssessmentInput) -> AssessmentOutcome {
        if input.symptoms.is_empty() {
            debug!("assessment requested with no symptoms");
            return AssessmentOutcome::InsufficientInput {
                reason: INSUFFICIENT_SYMPTOMS.to_string(),
            };
        }

        let source = self.source.as_ref();
        let config = source.scoring();

        let (rule, matched) = resolve_rule(source, &input.symptoms);

        let conditions = match &input.region {
            Some(region) => filter_conditions_by_region(&rule.conditions, region),
            None => rule.conditions.clone(),
        };

        let urgency = escalate_urgency(rule, input, config);
        let confidence = compute_confidence(rule, input, config);
        let region = input
            .region
            .as_ref()
            .and_then(|code| source.region(code))
            .cloned();

        info!(
            key = %input.symptoms.canonical_key(),
            matched = ?matched,
            urgency = %urgency,
            base_urgency = %rule.urgency,
            confidence,
            "assessment complete"
        );

        AssessmentOutcome::Assessed(AssessmentResult {
            rule: rule.clone(),
            matched,
            conditions,
            urgency,
            escalated: urgency > rule.urgency,
            confidence,
            region,
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
