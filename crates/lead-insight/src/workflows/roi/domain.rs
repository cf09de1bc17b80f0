use serde::{Deserialize, Serialize};

/// Business profile entered into the ROI calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiInputs {
    #[serde(default)]
    pub industry: Option<String>,
    pub annual_revenue: f64,
    pub employee_count: u32,
    #[serde(default = "default_finance_team_size")]
    pub finance_team_size: u32,
    /// Working days needed to close the books each month.
    pub month_end_days: f64,
    #[serde(default)]
    pub manual_hours_per_week: f64,
    #[serde(default)]
    pub reporting_hours_per_week: f64,
    /// Share of transactions needing correction, in percent.
    #[serde(default)]
    pub error_rate: f64,
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,
    #[serde(default)]
    pub annual_compliance_cost: f64,
    #[serde(default)]
    pub annual_maintenance_cost: f64,
}

fn default_finance_team_size() -> u32 {
    1
}

fn default_hourly_rate() -> f64 {
    50.0
}

impl RoiInputs {
    pub(crate) fn validate(&self) -> Result<(), RoiError> {
        let fields = [
            ("annual_revenue", self.annual_revenue),
            ("month_end_days", self.month_end_days),
            ("manual_hours_per_week", self.manual_hours_per_week),
            ("reporting_hours_per_week", self.reporting_hours_per_week),
            ("error_rate", self.error_rate),
            ("hourly_rate", self.hourly_rate),
            ("annual_compliance_cost", self.annual_compliance_cost),
            ("annual_maintenance_cost", self.annual_maintenance_cost),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(RoiError::InvalidInput { field, value });
            }
        }

        if self.error_rate > 100.0 {
            return Err(RoiError::InvalidInput {
                field: "error_rate",
                value: self.error_rate,
            });
        }

        Ok(())
    }
}

/// Per-component annual savings, rounded to whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavingsBreakdown {
    pub month_end: i64,
    pub manual_process: i64,
    pub reporting: i64,
    pub error_reduction: i64,
    pub compliance: i64,
    pub maintenance: i64,
    pub decision_speed: i64,
}

/// Projection returned to the calculator page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResults {
    /// Normalized industry key the multipliers were resolved from, if any matched.
    pub industry: Option<String>,
    pub multipliers: super::IndustryMultiplier,
    pub savings: SavingsBreakdown,
    pub total_savings: i64,
    pub implementation_cost: i64,
    pub net_roi: i64,
    /// `None` when the implementation cost is not positive.
    pub roi_percentage: Option<i64>,
    /// Months to recover the implementation cost; `None` when savings are not positive.
    pub payback_months: Option<f64>,
    pub year_two_savings: i64,
    pub year_three_savings: i64,
    pub three_year_savings: i64,
    pub three_year_net: i64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoiError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidInput { field: &'static str, value: f64 },
}
