use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{RoiError, RoiInputs, RoiResults};
use super::projector::RoiProjector;
use crate::workflows::analytics::{emit_or_warn, AnalyticsEvent, AnalyticsSink};

/// Runs projections for the calculator page and reports them to analytics.
pub struct RoiCalculatorService<S> {
    projector: Arc<RoiProjector>,
    analytics: Arc<S>,
}

impl<S> RoiCalculatorService<S>
where
    S: AnalyticsSink + 'static,
{
    pub fn new(projector: RoiProjector, analytics: Arc<S>) -> Self {
        Self {
            projector: Arc::new(projector),
            analytics,
        }
    }

    pub fn calculate(&self, inputs: &RoiInputs) -> Result<RoiResults, RoiError> {
        let results = match self.projector.project(inputs) {
            Ok(results) => results,
            Err(err) => {
                debug!(error = %err, "rejected roi inputs");
                return Err(err);
            }
        };

        info!(
            industry = results.industry.as_deref().unwrap_or("baseline"),
            total_savings = results.total_savings,
            implementation_cost = results.implementation_cost,
            payback_months = ?results.payback_months,
            "roi projection computed"
        );

        let mut event = AnalyticsEvent::new(
            "roi_calculator",
            results.industry.clone().unwrap_or_else(|| "baseline".to_string()),
        )
        .with_field("employee_count", f64::from(inputs.employee_count))
        .with_field("total_savings", results.total_savings as f64)
        .with_field("implementation_cost", results.implementation_cost as f64)
        .with_field("net_roi", results.net_roi as f64);
        if let Some(months) = results.payback_months {
            event = event.with_field("payback_months", months);
        }
        emit_or_warn(self.analytics.as_ref(), event);

        Ok(results)
    }
}
