//! Reference clinic scenarios.
//!
//! Each scenario wires the real Afya components (rule book, engine, verifier,
//! history, runner) together with mock visits and prints a walkthrough.

pub mod bounded_history;
pub mod emergency_escalation;
pub mod fallback_and_insufficient;
pub mod routine_assessment;
