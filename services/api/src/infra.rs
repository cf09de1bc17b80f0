use chrono::NaiveDate;
use lead_insight::workflows::leads::{LeadEntry, LeadId, LeadRepository, RepositoryError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    entries: Arc<Mutex<HashMap<LeadId, LeadEntry>>>,
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert(&self, entry: LeadEntry) -> Result<LeadEntry, RepositoryError> {
        let mut guard = self.lock()?;
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
        let mut guard = self.lock()?;
        let current = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let next = derive(current);
        let previous = std::mem::replace(current, next.clone());
        Ok((previous, next))
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadEntry>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<LeadEntry>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.values().cloned().collect())
    }
}

impl InMemoryLeadRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<LeadId, LeadEntry>>, RepositoryError> {
        self.entries
            .lock()
            .map_err(|_| RepositoryError::Unavailable("lead store mutex poisoned".to_string()))
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
