//! Lead capture, scoring and pipeline management for marketing-site visitors.

pub mod domain;
pub mod import;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    InteractionEvent, InteractionKind, LeadGrade, LeadId, LeadRecord, LeadSource, LeadStatus,
    LeadSubmission, Timeline,
};
pub use import::{LeadCsvImporter, LeadImportError};
pub use intake::{IntakeViolation, LeadIntake};
pub use repository::{LeadEntry, LeadRepository, LeadStatusView, RepositoryError};
pub use router::lead_router;
pub use scoring::{
    LeadScore, LeadScoringEngine, ScoreBreakdown, ScoreCategory, ScoreComponent, ScoringRules,
};
pub use service::{LeadScoringService, LeadServiceError};
