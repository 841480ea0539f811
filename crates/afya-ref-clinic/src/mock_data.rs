//! Simulated clinic visits for the Afya reference runtime.
//!
//! All people and answers here are fictional. Each visit is what one user
//! would enter in the intake flow.

use afya_contracts::{
    input::{DurationBucket, Severity},
    region::RegionCode,
};
use afya_core::AssessmentSession;

/// One user's answers to the intake questions.
#[derive(Debug, Clone, Copy)]
pub struct MockVisit {
    /// History profile key.
    pub profile: &'static str,
    pub summary: &'static str,
    pub symptoms: &'static [&'static str],
    pub severity: u8,
    pub duration: Option<DurationBucket>,
    pub region: Option<&'static str>,
    pub photo: bool,
    pub location: bool,
}

impl MockVisit {
    /// Replay the visit through a fresh session, as the intake UI would.
    pub fn session(&self) -> AssessmentSession {
        let mut session = AssessmentSession::new(self.profile);
        for symptom in self.symptoms {
            session.toggle_symptom(symptom);
        }
        session.set_severity(Severity::new(self.severity));
        if let Some(duration) = self.duration {
            session.set_duration(duration);
        }
        if let Some(region) = self.region {
            session.set_region(RegionCode::new(region));
        }
        if self.photo {
            session.attach_photo();
        }
        if self.location {
            session.share_location();
        }
        session
    }
}

// ── Visits ───────────────────────────────────────────────────────────────────

pub const AMARA_LAGOS: MockVisit = MockVisit {
    profile: "amara",
    summary: "Fever, headache and nausea since this morning, Lagos",
    symptoms: &["fever", "headache", "nausea"],
    severity: 5,
    duration: Some(DurationBucket::Hours),
    region: Some("ng"),
    photo: false,
    location: false,
};

pub const THANDI_DURBAN: MockVisit = MockVisit {
    profile: "thandi",
    summary: "Same symptoms as Amara, reported from Durban",
    symptoms: &["nausea", "fever", "headache"],
    severity: 5,
    duration: Some(DurationBucket::Hours),
    region: Some("za"),
    photo: false,
    location: false,
};

pub const WANJIRU_NAIROBI: MockVisit = MockVisit {
    profile: "wanjiru",
    summary: "Sudden chest pain and trouble breathing, Nairobi",
    symptoms: &["chest-pain", "breathing"],
    severity: 9,
    duration: Some(DurationBucket::Minutes),
    region: Some("ke"),
    photo: false,
    location: true,
};

pub const KOFI_ACCRA: MockVisit = MockVisit {
    profile: "kofi",
    summary: "Severe headache for several days, Accra",
    symptoms: &["headache"],
    severity: 9,
    duration: Some(DurationBucket::Days),
    region: Some("gh"),
    photo: false,
    location: false,
};

pub const MUSA_KAMPALA: MockVisit = MockVisit {
    profile: "musa",
    summary: "Rash and dizziness, an unlisted combination, Kampala",
    symptoms: &["rash", "dizziness"],
    severity: 4,
    duration: Some(DurationBucket::Days),
    region: Some("ug"),
    photo: false,
    location: false,
};

pub const CHIDI_ABUJA: MockVisit = MockVisit {
    profile: "chidi",
    summary: "Diarrhea and vomiting after a meal, Abuja",
    symptoms: &["diarrhea", "vomiting"],
    severity: 6,
    duration: Some(DurationBucket::Hours),
    region: Some("ng"),
    photo: true,
    location: false,
};

/// Every visit, in walkthrough order.
pub const VISITS: &[MockVisit] = &[
    AMARA_LAGOS,
    THANDI_DURBAN,
    WANJIRU_NAIROBI,
    KOFI_ACCRA,
    MUSA_KAMPALA,
    CHIDI_ABUJA,
];

/// Look up a visit by profile.
pub fn visit(profile: &str) -> Option<&'static MockVisit> {
    VISITS.iter().find(|v| v.profile == profile)
}
