//! The assessment runner: engine, verifier, and history wired in order.
//!
//!   Session → Input → Engine::assess → Verify → History → Event
//!
//! A result is never appended to history unless the verifier passed it.
//! `InsufficientInput` is a normal outcome, not an error: it is reported back
//! to the caller and nothing is recorded.

use serde_json::json;
use tracing::{debug, info, warn};

use afya_contracts::{
    error::{AfyaError, AfyaResult},
    input::AssessmentInput,
    result::{AssessmentOutcome, HistoryEntry},
    verify::ResultSchema,
};

use crate::{
    engine::AssessmentEngine,
    session::AssessmentSession,
    traits::{HistoryWriter, ResultVerifier},
};

/// Drives assessments through the engine and records verified results.
///
/// Holds no per-request state, so one runner can serve any number of
/// sessions.
pub struct AssessmentRunner {
    engine: AssessmentEngine,
    history: Box<dyn HistoryWriter>,
    verifier: Box<dyn ResultVerifier>,
    schema: ResultSchema,
}

impl AssessmentRunner {
    pub fn new(
        engine: AssessmentEngine,
        history: Box<dyn HistoryWriter>,
        verifier: Box<dyn ResultVerifier>,
        schema: ResultSchema,
    ) -> Self {
        Self { engine, history, verifier, schema }
    }

    pub fn engine(&self) -> &AssessmentEngine {
        &self.engine
    }

    /// The profile's recorded assessments, most recent first.
    pub fn history(&self, profile: &str) -> AfyaResult<Vec<HistoryEntry>> {
        self.history.recent(profile)
    }

    /// Assess the session's current answers and record the outcome as a
    /// session event.
    pub fn run(&self, session: &mut AssessmentSession) -> AfyaResult<AssessmentOutcome> {
        let input = session.build_input();
        let outcome = self.run_input(session.profile(), input)?;

        match &outcome {
            AssessmentOutcome::Assessed(result) => session.track(
                "assessment_completed",
                json!({
                    "rule_key": result.rule.key,
                    "urgency": result.urgency.as_str(),
                    "confidence": result.confidence,
                    "symptom_count": session.symptoms().len(),
                }),
            ),
            AssessmentOutcome::InsufficientInput { reason } => {
                session.track("assessment_insufficient", json!({ "reason": reason }))
            }
        }

        Ok(outcome)
    }

    /// Assess `input` on behalf of `profile`.
    ///
    /// # Pipeline
    ///
    /// 1. `engine.assess()`; `InsufficientInput` returns immediately
    /// 2. `verifier.verify()` against the configured schema; a failing report
    ///    returns `AfyaError::VerificationFailed` with every failure listed
    /// 3. `history.append()` a new `HistoryEntry`
    ///
    /// # Errors
    ///
    /// Verification failures and history write failures. The engine itself
    /// never fails.
    pub fn run_input(&self, profile: &str, input: AssessmentInput) -> AfyaResult<AssessmentOutcome> {
        debug!(
            profile = %profile,
            symptoms = %input.symptoms.canonical_key(),
            "running assessment"
        );

        // ── Step 1: Engine ───────────────────────────────────────────────────
        let outcome = self.engine.assess(&input);
        let result = match &outcome {
            AssessmentOutcome::Assessed(result) => result,
            AssessmentOutcome::InsufficientInput { reason } => {
                info!(profile = %profile, reason = %reason, "assessment needs more input");
                return Ok(outcome);
            }
        };

        // ── Step 2: Verification ─────────────────────────────────────────────
        let report = self.verifier.verify(result, &self.schema)?;
        if !report.passed {
            let failure_summary = report
                .failures
                .iter()
                .map(|f| format!("[{}] {}", f.rule_id, f.message))
                .collect::<Vec<_>>()
                .join("; ");

            warn!(
                profile = %profile,
                schema_id = %self.schema.schema_id,
                failures = %failure_summary,
                "assessment result failed verification"
            );
            return Err(AfyaError::VerificationFailed {
                reason: failure_summary,
            });
        }

        // ── Step 3: History ──────────────────────────────────────────────────
        let entry = HistoryEntry::new(profile, input, result.clone());
        self.history.append(&entry)?;

        info!(
            profile = %profile,
            entry_id = %entry.id,
            urgency = %result.urgency,
            confidence = result.confidence,
            "assessment recorded"
        );

        Ok(outcome)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use afya_contracts::{
        error::{AfyaError, AfyaResult},
        input::Severity,
        result::{AssessmentOutcome, AssessmentResult, HistoryEntry},
        rule::UrgencyTier,
        verify::{ResultSchema, VerificationFailure, VerificationReport},
    };

    use crate::{
        engine::AssessmentEngine,
        session::AssessmentSession,
        testing::FixtureRules,
        traits::{HistoryWriter, ResultVerifier},
    };

    use super::AssessmentRunner;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// A history writer that records every append for later inspection.
    struct MockHistory {
        entries: Arc<Mutex<Vec<HistoryEntry>>>,
    }

    impl MockHistory {
        fn new() -> Self {
            Self { entries: Arc::new(Mutex::new(vec![])) }
        }
    }

    impl HistoryWriter for MockHistory {
        fn append(&self, entry: &HistoryEntry) -> AfyaResult<()> {
            self.entries.lock().unwrap().insert(0, entry.clone());
            Ok(())
        }

        fn recent(&self, profile: &str) -> AfyaResult<Vec<HistoryEntry>> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.profile == profile)
                .cloned()
                .collect())
        }
    }

    /// A history writer whose appends always fail.
    struct BrokenHistory;

    impl HistoryWriter for BrokenHistory {
        fn append(&self, _entry: &HistoryEntry) -> AfyaResult<()> {
            Err(AfyaError::HistoryWriteFailed { reason: "store unavailable".to_string() })
        }

        fn recent(&self, _profile: &str) -> AfyaResult<Vec<HistoryEntry>> {
            Ok(vec![])
        }
    }

    /// A verifier that can be configured to pass or fail.
    struct MockVerifier {
        pass: bool,
    }

    impl ResultVerifier for MockVerifier {
        fn verify(&self, _result: &AssessmentResult, _schema: &ResultSchema) -> AfyaResult<VerificationReport> {
            if self.pass {
                Ok(VerificationReport { passed: true, failures: vec![] })
            } else {
                Ok(VerificationReport {
                    passed: false,
                    failures: vec![VerificationFailure {
                        rule_id: "confidence-range".to_string(),
                        message: "confidence 120 outside [30, 95]".to_string(),
                    }],
                })
            }
        }
    }

    fn make_schema() -> ResultSchema {
        ResultSchema {
            schema_id: "test-schema-v1".to_string(),
            json_schema: serde_json::Value::Null,
            rules: vec![],
        }
    }

    fn runner(history: Box<dyn HistoryWriter>, pass: bool) -> AssessmentRunner {
        AssessmentRunner::new(
            AssessmentEngine::new(Box::new(FixtureRules::new())),
            history,
            Box::new(MockVerifier { pass }),
            make_schema(),
        )
    }

    // ── Test cases ────────────────────────────────────────────────────────────

    /// A verified result is returned and recorded exactly once.
    #[test]
    fn test_successful_run_records_history() {
        let history = MockHistory::new();
        let entries = history.entries.clone();
        let runner = runner(Box::new(history), true);

        let mut session = AssessmentSession::new("amara");
        session.toggle_symptom("fever");
        session.toggle_symptom("headache");
        session.toggle_symptom("nausea");

        let outcome = runner.run(&mut session).unwrap();

        match outcome {
            AssessmentOutcome::Assessed(result) => {
                assert_eq!(result.rule.key, "fever,headache,nausea");
                assert_eq!(result.urgency, UrgencyTier::Moderate);
            }
            other => panic!("expected Assessed, got {:?}", other),
        }

        let entries = entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].profile, "amara");
        assert_eq!(session.events().last().unwrap().name, "assessment_completed");
    }

    /// An empty session is reported back, never recorded.
    #[test]
    fn test_insufficient_input_is_not_recorded() {
        let history = MockHistory::new();
        let entries = history.entries.clone();
        let runner = runner(Box::new(history), true);

        let mut session = AssessmentSession::new("amara");
        let outcome = runner.run(&mut session).unwrap();

        assert!(matches!(outcome, AssessmentOutcome::InsufficientInput { .. }));
        assert!(entries.lock().unwrap().is_empty());
        assert_eq!(session.events().last().unwrap().name, "assessment_insufficient");
    }

    /// A failing verification report blocks the history write.
    #[test]
    fn test_verification_failure_blocks_history() {
        let history = MockHistory::new();
        let entries = history.entries.clone();
        let runner = runner(Box::new(history), false);

        let mut session = AssessmentSession::new("amara");
        session.toggle_symptom("fever");

        match runner.run(&mut session) {
            Err(AfyaError::VerificationFailed { reason }) => {
                assert!(reason.contains("confidence-range"), "reason should name the rule: {reason}");
            }
            other => panic!("expected VerificationFailed, got {:?}", other),
        }
        assert!(entries.lock().unwrap().is_empty());
    }

    /// A history write failure surfaces as an error.
    #[test]
    fn test_history_failure_propagates() {
        let runner = runner(Box::new(BrokenHistory), true);
        let mut session = AssessmentSession::new("amara");
        session.toggle_symptom("cough");

        assert!(matches!(
            runner.run(&mut session),
            Err(AfyaError::HistoryWriteFailed { .. })
        ));
    }

    /// run_input works without a session and keeps profiles apart.
    #[test]
    fn test_run_input_keys_history_by_profile() {
        let runner = runner(Box::new(MockHistory::new()), true);

        let mut a = AssessmentSession::new("amara");
        a.toggle_symptom("fever");
        let mut b = AssessmentSession::new("kofi");
        b.toggle_symptom("headache");

        runner.run_input("amara", a.build_input()).unwrap();
        runner.run_input("kofi", b.build_input()).unwrap();
        runner
            .run_input("amara", {
                let mut input = a.build_input();
                input.severity = Severity::new(9);
                input
            })
            .unwrap();

        let amara = runner.history("amara").unwrap();
        assert_eq!(amara.len(), 2);
        assert_eq!(amara[0].input.severity.score(), 9, "most recent entry first");
        assert_eq!(runner.history("kofi").unwrap().len(), 1);
    }
}
