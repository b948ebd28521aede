#![deny(missing_docs)]
#![doc = "Runs validation, allocation, statistics and hashing as one audited step."]

/// Append-only audit trail.
pub mod audit;
/// Study project state carried between runs.
pub mod project;
/// Run orchestration.
pub mod service;

pub use audit::{AuditEvent, AuditLog};
pub use project::ProjectModel;
pub use service::{RandomizationArtifacts, RandomizerService};
