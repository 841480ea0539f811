//! Request-scoped assessment session.
//!
//! An `AssessmentSession` holds what the user has entered so far (selected
//! symptoms, severity, duration, region, photo/location flags) and an
//! in-memory log of interaction events. It is owned by whoever drives the
//! intake flow; nothing about it is global.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::debug;

use afya_contracts::{
    input::{AssessmentInput, DurationBucket, Severity},
    region::RegionCode,
    session::{SessionEvent, SessionId},
    symptom::{Symptom, SymptomSet},
};

/// The user's in-progress answers plus an event log.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    id: SessionId,
    profile: String,
    started_at: DateTime<Utc>,
    symptoms: SymptomSet,
    severity: Option<Severity>,
    duration: Option<DurationBucket>,
    region: Option<RegionCode>,
    photo_present: bool,
    location_present: bool,
    events: Vec<SessionEvent>,
}

impl AssessmentSession {
    /// Start a session for `profile`, the key its history is stored under.
    pub fn new(profile: impl Into<String>) -> Self {
        let mut session = Self {
            id: SessionId::new(),
            profile: profile.into(),
            started_at: Utc::now(),
            symptoms: SymptomSet::new(),
            severity: None,
            duration: None,
            region: None,
            photo_present: false,
            location_present: false,
            events: Vec::new(),
        };
        session.track("assessment_started", Value::Null);
        session
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn symptoms(&self) -> &SymptomSet {
        &self.symptoms
    }

    /// Select or deselect a symptom. Returns true if it is now selected.
    ///
    /// Blank names are ignored and record no event.
    pub fn toggle_symptom(&mut self, symptom: &str) -> bool {
        let symptom = Symptom::new(symptom);
        if symptom.as_str().is_empty() {
            return false;
        }
        let selected = self.symptoms.toggle(symptom.as_str());
        let name = if selected { "symptom_selected" } else { "symptom_deselected" };
        self.track(name, json!({ "symptom": symptom.as_str() }));
        selected
    }

    /// True once at least one symptom is selected.
    pub fn can_continue(&self) -> bool {
        !self.symptoms.is_empty()
    }

    pub fn set_severity(&mut self, severity: Severity) {
        self.severity = Some(severity);
        self.track("severity_set", json!({ "severity": severity.score() }));
    }

    pub fn set_duration(&mut self, duration: DurationBucket) {
        self.duration = Some(duration);
        self.track("duration_set", json!({ "duration": duration.as_str() }));
    }

    pub fn set_region(&mut self, region: RegionCode) {
        self.track("region_set", json!({ "region": region.as_str() }));
        self.region = Some(region);
    }

    pub fn attach_photo(&mut self) {
        self.photo_present = true;
        self.track("photo_attached", Value::Null);
    }

    pub fn share_location(&mut self) {
        self.location_present = true;
        self.track("location_shared", Value::Null);
    }

    /// Clear every answer. The event log and session identity are kept.
    pub fn reset(&mut self) {
        let cleared = self.symptoms.len();
        self.symptoms.clear();
        self.severity = None;
        self.duration = None;
        self.region = None;
        self.photo_present = false;
        self.location_present = false;
        self.track("assessment_reset", json!({ "symptoms_cleared": cleared }));
    }

    /// Snapshot the answers as engine input.
    ///
    /// A skipped severity step defaults to `Severity::default()`.
    pub fn build_input(&self) -> AssessmentInput {
        AssessmentInput {
            symptoms: self.symptoms.clone(),
            severity: self.severity.unwrap_or_default(),
            duration: self.duration,
            region: self.region.clone(),
            photo_present: self.photo_present,
            location_present: self.location_present,
        }
    }

    /// Record an interaction event.
    pub fn track(&mut self, name: &str, data: Value) {
        let now = Utc::now();
        let session_duration_ms = (now - self.started_at).num_milliseconds();
        debug!(session_id = %self.id.0, event = name, %data, "session event");
        self.events.push(SessionEvent {
            name: name.to_string(),
            timestamp: now,
            data,
            session_duration_ms,
        });
    }

    /// All events recorded so far, oldest first.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use afya_contracts::input::{DurationBucket, Severity};
    use afya_contracts::region::RegionCode;

    use super::AssessmentSession;

    fn event_names(session: &AssessmentSession) -> Vec<&str> {
        session.events().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_continue_requires_a_symptom() {
        let mut session = AssessmentSession::new("profile-a");
        assert!(!session.can_continue());

        assert!(session.toggle_symptom("fever"));
        assert!(session.can_continue());

        assert!(!session.toggle_symptom("fever"));
        assert!(!session.can_continue());
    }

    #[test]
    fn test_toggle_records_select_and_deselect_events() {
        let mut session = AssessmentSession::new("profile-a");
        session.toggle_symptom("Cough");
        session.toggle_symptom("cough");

        assert_eq!(
            event_names(&session),
            vec!["assessment_started", "symptom_selected", "symptom_deselected"]
        );
        assert_eq!(session.events()[1].data["symptom"], "cough");
    }

    #[test]
    fn test_blank_symptom_records_nothing() {
        let mut session = AssessmentSession::new("profile-a");
        assert!(!session.toggle_symptom(""));
        assert!(!session.toggle_symptom("   "));

        assert_eq!(event_names(&session), vec!["assessment_started"]);
        assert!(!session.can_continue());
    }

    #[test]
    fn test_build_input_carries_answers() {
        let mut session = AssessmentSession::new("profile-a");
        session.toggle_symptom("fever");
        session.toggle_symptom("headache");
        session.set_severity(Severity::new(7));
        session.set_duration(DurationBucket::Days);
        session.set_region(RegionCode::new("gh"));
        session.attach_photo();
        session.share_location();

        let input = session.build_input();
        assert_eq!(input.symptoms.canonical_key(), "fever,headache");
        assert_eq!(input.severity.score(), 7);
        assert_eq!(input.duration, Some(DurationBucket::Days));
        assert_eq!(input.region, Some(RegionCode::new("gh")));
        assert!(input.photo_present && input.location_present);
    }

    #[test]
    fn test_skipped_severity_defaults_to_five() {
        let mut session = AssessmentSession::new("profile-a");
        session.toggle_symptom("rash");

        assert_eq!(session.build_input().severity.score(), 5);
    }

    #[test]
    fn test_reset_clears_answers_but_keeps_events() {
        let mut session = AssessmentSession::new("profile-a");
        session.toggle_symptom("fever");
        session.attach_photo();
        session.reset();

        let input = session.build_input();
        assert!(input.symptoms.is_empty());
        assert!(!input.photo_present);
        assert_eq!(event_names(&session).last(), Some(&"assessment_reset"));
        assert_eq!(session.events().last().unwrap().data["symptoms_cleared"], 1);
    }

    #[test]
    fn test_event_durations_are_non_negative() {
        let mut session = AssessmentSession::new("profile-a");
        session.toggle_symptom("fever");

        assert!(session.events().iter().all(|e| e.session_duration_ms >= 0));
    }
}
