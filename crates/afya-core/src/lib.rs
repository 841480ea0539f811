//! # afya-core
//!
//! The deterministic symptom assessment engine and the pipeline around it.
//!
//! This crate provides:
//! - The seam traits (`RuleSource`, `HistoryWriter`, `ResultVerifier`)
//! - The pure engine operations and `AssessmentEngine`
//! - `AssessmentSession`, the request-scoped intake state
//! - `AssessmentRunner`, which verifies and records engine results
//!
//! ## Usage
//!
//! ```rust,ignore
//! use afya_core::{AssessmentEngine, AssessmentSession};
//!
//! let engine = AssessmentEngine::new(Box::new(rule_book));
//! let mut session = AssessmentSession::new("profile-1");
//! session.toggle_symptom("fever");
//! let outcome = engine.assess(&session.build_input());
//! ```

pub mod engine;
pub mod runner;
pub mod session;
pub mod traits;

#[cfg(test)]
mod testing;

pub use engine::AssessmentEngine;
pub use runner::AssessmentRunner;
pub use session::AssessmentSession;
