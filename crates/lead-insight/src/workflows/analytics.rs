//! Outbound analytics hooks shared by the lead and ROI workflows.
//!
//! Delivery is fire-and-forget: callers use [`emit_or_warn`] so a failing sink never fails the
//! request that produced the event.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Event payload forwarded to the analytics collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub category: String,
    pub label: String,
    pub fields: BTreeMap<String, f64>,
}

impl AnalyticsEvent {
    pub fn new(category: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            label: label.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), value);
        self
    }
}

/// Trait describing outbound analytics adapters (tag managers, warehouses, log shippers).
pub trait AnalyticsSink: Send + Sync {
    fn emit(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("analytics transport unavailable: {0}")]
    Transport(String),
}

/// Sink that writes events to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalyticsSink;

impl AnalyticsSink for TracingAnalyticsSink {
    fn emit(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        info!(
            category = %event.category,
            label = %event.label,
            fields = ?event.fields,
            "analytics event"
        );
        Ok(())
    }
}

pub fn emit_or_warn<S: AnalyticsSink + ?Sized>(sink: &S, event: AnalyticsEvent) {
    let category = event.category.clone();
    let label = event.label.clone();
    if let Err(err) = sink.emit(event) {
        warn!(%category, %label, error = %err, "dropped analytics event");
    }
}
