//! # afya-ref-clinic
//!
//! Reference clinic runtime for the Afya symptom assessment engine.
//!
//! Demonstrates four scenarios using mock visits:
//!
//! 1. **Routine assessment**: the same symptoms from two regions, showing
//!    condition filtering and the regional confidence bonus.
//! 2. **Emergency escalation**: a `high` rule, severity-driven escalation of
//!    a `low` rule, and the local emergency number.
//! 3. **Fallback and insufficient input**: empty sessions and unlisted
//!    symptom combinations.
//! 4. **Bounded history**: capacity enforcement and blob tamper detection.
//!
//! All visits are fictional. No external systems are contacted.

pub mod harness;
pub mod mock_data;
pub mod scenarios;

// ── Tests ─────────────────────────────────────────────────────────────────────
