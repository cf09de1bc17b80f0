use serde::{Deserialize, Serialize};

use super::domain::{LeadGrade, LeadId, LeadRecord, LeadStatus};
use super::scoring::LeadScore;

/// Repository entry pairing the current record version with its latest score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadEntry {
    pub record: LeadRecord,
    pub score: LeadScore,
}

impl LeadEntry {
    pub fn status_view(&self) -> LeadStatusView {
        LeadStatusView {
            lead_id: self.record.id.clone(),
            company: self.record.company.clone(),
            score: self.score.score,
            grade: self.score.grade,
            status: self.score.status,
            interactions: self.record.interactions.len(),
        }
    }
}

/// Storage abstraction so the service can be exercised without a database.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, entry: LeadEntry) -> Result<LeadEntry, RepositoryError>;
    /// Replace the stored entry with `derive(current)` without letting another writer interleave.
    /// Returns the previous and the stored versions.
    fn modify(
        &self,
        id: &LeadId,
        derive: &mut dyn FnMut(&LeadEntry) -> LeadEntry,
    ) -> Result<(LeadEntry, LeadEntry), RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<LeadEntry>, RepositoryError>;
    fn list(&self) -> Result<Vec<LeadEntry>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("lead already exists")]
    Conflict,
    #[error("lead not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sales-facing summary of a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadStatusView {
    pub lead_id: LeadId,
    pub company: String,
    pub score: u8,
    pub grade: LeadGrade,
    pub status: LeadStatus,
    pub interactions: usize,
}
