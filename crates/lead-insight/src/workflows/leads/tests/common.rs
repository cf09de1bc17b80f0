use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::workflows::analytics::{AnalyticsError, AnalyticsEvent, AnalyticsSink};
use crate::workflows::leads::domain::{
    InteractionEvent, InteractionKind, LeadId, LeadRecord, LeadSource, LeadSubmission, Timeline,
};
use crate::workflows::leads::repository::{LeadEntry, LeadRepository, RepositoryError};
use crate::workflows::leads::{LeadScoringService, ScoringRules};

pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn event(kind: InteractionKind, day: u32) -> InteractionEvent {
    InteractionEvent {
        kind,
        timestamp: at(day, 9),
        detail: String::new(),
    }
}

/// Lead with no firmographic or intent signals, scoring zero.
pub(super) fn blank_lead(id: &str) -> LeadRecord {
    LeadRecord {
        id: LeadId(id.to_string()),
        name: "Jordan Blake".to_string(),
        email: "jordan@example.com".to_string(),
        phone: None,
        company: "Blake Supply".to_string(),
        role: String::new(),
        industry: None,
        company_size: None,
        current_system: None,
        challenges: String::new(),
        timeline: None,
        budget: None,
        source: None,
        interactions: Vec::new(),
        captured_at: at(1, 8),
        status_override: None,
    }
}

/// Executive lead from a target industry; every intent signal is present.
pub(super) fn executive_lead(id: &str) -> LeadRecord {
    LeadRecord {
        role: "CEO".to_string(),
        industry: Some("manufacturing".to_string()),
        company_size: Some("enterprise".to_string()),
        challenges: "Our month-end close takes nine days and every report is rebuilt by hand."
            .to_string(),
        timeline: Some(Timeline::Immediate),
        budget: Some("100k+".to_string()),
        source: Some(LeadSource::Webinar),
        ..blank_lead(id)
    }
}

pub(super) fn submission() -> LeadSubmission {
    LeadSubmission {
        name: "  Priya Natarajan ".to_string(),
        email: "Priya@Northwind.example".to_string(),
        phone: Some("  ".to_string()),
        company: "Northwind Components".to_string(),
        role: "Finance Manager".to_string(),
        industry: Some("Manufacturing".to_string()),
        company_size: Some("51-200".to_string()),
        current_system: Some("QuickBooks".to_string()),
        challenges: "Inventory costing".to_string(),
        timeline: Some(Timeline::ThreeToSixMonths),
        budget: Some("under-10k".to_string()),
        source: Some(LeadSource::Website),
        interactions: vec![
            event(InteractionKind::Download, 3),
            event(InteractionKind::PageView, 2),
        ],
    }
}

pub(super) fn invalid_email_submission() -> LeadSubmission {
    LeadSubmission {
        email: "priya.northwind".to_string(),
        ..submission()
    }
}

pub(super) type TestService = LeadScoringService<MemoryRepository, MemoryAnalytics>;

pub(super) fn build_service() -> (
    Arc<TestService>,
    Arc<MemoryRepository>,
    Arc<MemoryAnalytics>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let analytics = Arc::new(MemoryAnalytics::default());
    let service = Arc::new(LeadScoringService::new(
        repository.clone(),
        analytics.clone(),
        ScoringRules::standard(),
    ));
    (service, repository, analytics)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    entries: Mutex<HashMap<LeadId, LeadEntry>>,
}

impl LeadRepository for MemoryRepository {
    fn insert(&self, entry: LeadEntry) -> Result<LeadEntry, RepositoryError> {
        let mut guard = self.entries.lock().unwrap();
        if guard.contains_key(&entry.record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(entry.record.id.clone(), entry.clone());
        Ok(entry)
    }

    fn modify(
        &self,
        id: &LeadId,
        derive: &mut dyn FnMut(&LeadEntry) -> LeadEntry,
    ) -> Result<(LeadEntry, LeadEntry), RepositoryError> {
        let mut guard = self.entries.lock().unwrap();
        let existing = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let next = derive(existing);
        let previous = std::mem::replace(existing, next.clone());
        Ok((previous, next))
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadEntry>, RepositoryError> {
        Ok(self.entries.lock().unwrap().get(id).cloned())
    }

    fn list(&self) -> Result<Vec<LeadEntry>, RepositoryError> {
        Ok(self.entries.lock().unwrap().values().cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert(&self, _entry: LeadEntry) -> Result<LeadEntry, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn modify(
        &self,
        _id: &LeadId,
        _derive: &mut dyn FnMut(&LeadEntry) -> LeadEntry,
    ) -> Result<(LeadEntry, LeadEntry), RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn list(&self) -> Result<Vec<LeadEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAnalytics {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl MemoryAnalytics {
    pub(super) fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AnalyticsSink for MemoryAnalytics {
    fn emit(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

pub(super) struct OfflineAnalytics;

impl AnalyticsSink for OfflineAnalytics {
    fn emit(&self, _event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        Err(AnalyticsError::Transport("collector offline".to_string()))
    }
}
