//! # afya-contracts
//!
//! Shared types, scoring configuration, and errors for the Afya symptom
//! assessment engine.
//!
//! All crates in the workspace import from here. Apart from key
//! canonicalization and value normalization, no assessment logic lives in
//! this crate.

pub mod config;
pub mod error;
pub mod input;
pub mod region;
pub mod result;
pub mod rule;
pub mod session;
pub mod symptom;
pub mod verify;
