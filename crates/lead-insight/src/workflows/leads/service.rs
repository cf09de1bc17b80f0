use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{InteractionEvent, LeadId, LeadRecord, LeadStatus, LeadSubmission};
use super::intake::{IntakeViolation, LeadIntake};
use super::repository::{LeadEntry, LeadRepository, RepositoryError};
use super::scoring::{LeadScore, LeadScoringEngine, ScoringRules};
use crate::workflows::analytics::{emit_or_warn, AnalyticsEvent, AnalyticsSink};

/// Service composing intake validation, the scoring engine, storage and analytics.
pub struct LeadScoringService<R, S> {
    intake: LeadIntake,
    repository: Arc<R>,
    analytics: Arc<S>,
    engine: Arc<LeadScoringEngine>,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

impl<R, S> LeadScoringService<R, S>
where
    R: LeadRepository + 'static,
    S: AnalyticsSink + 'static,
{
    pub fn new(repository: Arc<R>, analytics: Arc<S>, rules: ScoringRules) -> Self {
        Self {
            intake: LeadIntake,
            repository,
            analytics,
            engine: Arc::new(LeadScoringEngine::new(rules)),
        }
    }

    /// Validate and store a new lead, scoring it on the way in.
    pub fn submit(&self, submission: LeadSubmission) -> Result<LeadEntry, LeadServiceError> {
        let record = self
            .intake
            .record_from_submission(next_lead_id(), submission, Utc::now())?;
        let score = self.engine.score(&record);

        info!(
            lead_id = %record.id,
            score = score.score,
            status = score.status.label(),
            "lead captured"
        );

        let stored = self.repository.insert(LeadEntry { record, score })?;
        self.track("captured", &stored.score);
        Ok(stored)
    }

    /// Append `event` to the lead's history and store the re-scored version.
    pub fn record_interaction(
        &self,
        lead_id: &LeadId,
        event: InteractionEvent,
    ) -> Result<LeadScore, LeadServiceError> {
        debug!(%lead_id, kind = event.kind.tag(), "recording interaction");
        self.store_rescored(lead_id, |record| record.with_interaction(event.clone()))
    }

    /// Pin (or clear) a manual status on the lead and store the re-scored version.
    pub fn override_status(
        &self,
        lead_id: &LeadId,
        status: Option<LeadStatus>,
    ) -> Result<LeadScore, LeadServiceError> {
        self.store_rescored(lead_id, |record| record.with_status_override(status))
    }

    /// Re-run scoring for a stored lead, e.g. after the rules table changed.
    pub fn rescore(&self, lead_id: &LeadId) -> Result<LeadScore, LeadServiceError> {
        self.store_rescored(lead_id, LeadRecord::clone)
    }

    /// Score a record without storing it.
    pub fn preview(&self, record: &LeadRecord) -> LeadScore {
        self.engine.score(record)
    }

    pub fn get(&self, lead_id: &LeadId) -> Result<LeadEntry, LeadServiceError> {
        let entry = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(entry)
    }

    /// Stored leads ordered by score (highest first), ties broken by capture time.
    pub fn pipeline(&self, limit: usize) -> Result<Vec<LeadEntry>, LeadServiceError> {
        let mut entries = self.repository.list()?;
        entries.sort_by(|left, right| {
            right
                .score
                .score
                .cmp(&left.score.score)
                .then_with(|| left.record.captured_at.cmp(&right.record.captured_at))
                .then_with(|| left.record.id.cmp(&right.record.id))
        });
        entries.truncate(limit);
        Ok(entries)
    }

    /// Derive the next record version from the stored one inside a single repository write.
    fn store_rescored(
        &self,
        lead_id: &LeadId,
        next_version: impl Fn(&LeadRecord) -> LeadRecord,
    ) -> Result<LeadScore, LeadServiceError> {
        let (previous, stored) = self.repository.modify(lead_id, &mut |current: &LeadEntry| {
            let record = next_version(&current.record);
            let score = self.engine.score(&record);
            LeadEntry { record, score }
        })?;

        if previous.score.status != stored.score.status {
            info!(
                lead_id = %lead_id,
                from = previous.score.status.label(),
                to = stored.score.status.label(),
                score = stored.score.score,
                "lead status changed"
            );
        }

        self.track("rescored", &stored.score);
        Ok(stored.score)
    }

    fn track(&self, label: &str, score: &LeadScore) {
        let event = AnalyticsEvent::new("lead_scoring", label)
            .with_field("score", f64::from(score.score))
            .with_field("demographic", f64::from(score.breakdown.demographic))
            .with_field("behavioral", f64::from(score.breakdown.behavioral))
            .with_field("engagement", f64::from(score.breakdown.engagement))
            .with_field("intent", f64::from(score.breakdown.intent));
        emit_or_warn(self.analytics.as_ref(), event);
    }
}

/// Error raised by the lead scoring service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
