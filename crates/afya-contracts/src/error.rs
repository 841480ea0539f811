//! Error types for the Afya assessment workspace.
//!
//! The engine itself never fails: an empty symptom set is reported as
//! `AssessmentOutcome::InsufficientInput`, and unknown combinations resolve to
//! the fallback rule. `AfyaError` covers everything around the engine:
//! loading rule books, parsing boundary input, verifying and recording results.

use thiserror::Error;

/// The unified error type for the Afya crates.
#[derive(Debug, Error)]
pub enum AfyaError {
    /// A rule book or scoring configuration is missing, malformed, or violates
    /// a load-time invariant.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A boundary value (severity, duration, region) could not be parsed.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The verifier rejected a result before it could be recorded or shared.
    #[error("result verification failed: {reason}")]
    VerificationFailed { reason: String },

    /// The history store could not append an entry.
    #[error("history write failed: {reason}")]
    HistoryWriteFailed { reason: String },

    /// A persisted history blob failed its namespace or checksum check.
    #[error("history blob rejected: {reason}")]
    HistoryCorrupt { reason: String },

    /// A JSON Schema check failed outside of the normal verification path.
    #[error("schema validation error: {reason}")]
    SchemaValidation { reason: String },
}

/// Convenience alias used throughout the Afya crates.
pub type AfyaResult<T> = Result<T, AfyaError>;
