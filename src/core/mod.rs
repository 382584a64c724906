//! Core fortune logic - framework-agnostic store, selector and workflow.

/// Read-only dump of all fortunes and submissions
pub mod export;
/// Fortune store operations and the duplicate check
pub mod fortune;
/// Bulk import of preloaded fortunes
pub mod import;
/// Rotation selector and cycle reset
pub mod rotation;
/// Daily delivery timing
pub mod schedule;
/// Key/value bookkeeping: cursor, display-id counters, last delivery
pub mod state;
/// Explicit store object with the single-writer gate
pub mod store;
/// Submission workflow
pub mod submission;

pub use store::FortuneStore;
