//! # afya-history
//!
//! Bounded, per-profile assessment history for the Afya engine.
//!
//! ## Overview
//!
//! [`InMemoryHistory`] implements the
//! [`HistoryWriter`](afya_core::traits::HistoryWriter) trait. Each profile
//! keeps its most recent [`MAX_HISTORY_ENTRIES`] assessments, newest first.
//! The whole store can be exported as a [`HistoryBlob`] whose SHA-256
//! checksum is verified again on import, so an edited blob is rejected.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use afya_history::{HistoryBlob, InMemoryHistory};
//! use afya_core::traits::HistoryWriter;
//!
//! let history = InMemoryHistory::new();
//! history.append(&entry)?;
//!
//! let bytes = history.export_blob()?.to_bytes()?;
//! let restored = InMemoryHistory::new();
//! restored.import_blob(HistoryBlob::from_bytes(&bytes)?)?;
//! ```

pub mod blob;
pub mod checksum;
pub mod memory;

pub use blob::{HistoryBlob, HISTORY_NAMESPACE, MAX_HISTORY_ENTRIES};
pub use checksum::{blob_checksum, verify_blob};
pub use memory::InMemoryHistory;

// ── Tests ─────────────────────────────────────────────────────────────────────
