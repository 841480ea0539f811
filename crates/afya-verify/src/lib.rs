//! # afya-verify
//!
//! Assessment result verification for the Afya engine.
//!
//! This crate provides [`engine::ResultSchemaVerifier`], which implements the
//! [`afya_core::traits::ResultVerifier`] trait. Results are serialized to
//! JSON and checked in two phases:
//!
//! 1. **Structural**: JSON Schema validation via the `jsonschema` crate.
//! 2. **Semantic**: `RequiredField`, `NonEmpty`, `AllowedValues`,
//!    `ConfidenceWithin`, `ForbiddenPhrase` and `Custom` rules.
//!
//! [`schema::standard_result_schema`] builds the schema the assessment
//! runner uses.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use afya_verify::{standard_result_schema, ResultSchemaVerifier};
//!
//! let verifier = ResultSchemaVerifier::with_standard_rules();
//! let schema = standard_result_schema(book.scoring());
//! let report = verifier.verify(&result, &schema)?;
//! ```

pub mod engine;
pub mod schema;

pub use engine::{CustomVerifierFn, ResultSchemaVerifier, URGENCY_FLOOR_CHECK};
pub use schema::{standard_result_schema, STANDARD_SCHEMA_ID};
