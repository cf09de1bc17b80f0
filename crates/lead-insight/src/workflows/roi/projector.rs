use serde::{Deserialize, Serialize};

use super::domain::{RoiError, RoiInputs, RoiResults, SavingsBreakdown};
use super::multipliers::{IndustryMultiplier, IndustryMultiplierTable};

const HOURS_PER_DAY: f64 = 8.0;
const MONTHS_PER_YEAR: f64 = 12.0;
const WEEKS_PER_YEAR: f64 = 52.0;

/// Coefficients behind each savings component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAssumptions {
    /// Share of month-end close days eliminated.
    pub close_reduction: f64,
    /// Share of manual processing hours automated.
    pub automation_rate: f64,
    /// Share of reporting hours automated.
    pub reporting_automation_rate: f64,
    /// Revenue share lost per percentage point of errors.
    pub error_cost_share: f64,
    /// Share of error cost removed.
    pub error_reduction: f64,
    pub compliance_reduction: f64,
    pub maintenance_reduction: f64,
    /// Revenue share gained from faster decisions.
    pub decision_speed_share: f64,
    pub year_two_growth: f64,
    pub year_three_growth: f64,
    pub cost_bands: Vec<CostBand>,
    /// Base cost once employee count reaches the last band.
    pub enterprise_base_cost: f64,
}

/// Implementation base cost for companies with fewer than `max_employees` staff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBand {
    pub max_employees: u32,
    pub base_cost: f64,
}

impl SavingsAssumptions {
    pub fn standard() -> Self {
        Self {
            close_reduction: 0.5,
            automation_rate: 0.7,
            reporting_automation_rate: 0.8,
            error_cost_share: 0.05,
            error_reduction: 0.8,
            compliance_reduction: 0.3,
            maintenance_reduction: 0.6,
            decision_speed_share: 0.005,
            year_two_growth: 1.1,
            year_three_growth: 1.2,
            cost_bands: vec![
                CostBand {
                    max_employees: 50,
                    base_cost: 25_000.0,
                },
                CostBand {
                    max_employees: 200,
                    base_cost: 45_000.0,
                },
                CostBand {
                    max_employees: 500,
                    base_cost: 75_000.0,
                },
            ],
            enterprise_base_cost: 125_000.0,
        }
    }

    /// Base implementation cost before the integration multiplier.
    pub fn base_cost(&self, employee_count: u32) -> f64 {
        self.cost_bands
            .iter()
            .find(|band| employee_count < band.max_employees)
            .map(|band| band.base_cost)
            .unwrap_or(self.enterprise_base_cost)
    }
}

impl Default for SavingsAssumptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Stateless projector pairing the savings formulas with an industry table.
#[derive(Debug, Clone)]
pub struct RoiProjector {
    multipliers: IndustryMultiplierTable,
    assumptions: SavingsAssumptions,
}

impl RoiProjector {
    pub fn new(multipliers: IndustryMultiplierTable, assumptions: SavingsAssumptions) -> Self {
        Self {
            multipliers,
            assumptions,
        }
    }

    pub fn project(&self, inputs: &RoiInputs) -> Result<RoiResults, RoiError> {
        inputs.validate()?;

        let (industry, multiplier) = self.multipliers.resolve(inputs.industry.as_deref());
        let savings = self.savings(inputs, &multiplier);

        let total_savings = savings.total();
        let implementation_cost =
            self.assumptions.base_cost(inputs.employee_count) * multiplier.integration;
        let net_roi = total_savings - implementation_cost;

        let roi_percentage =
            (implementation_cost > 0.0).then(|| round(net_roi / implementation_cost * 100.0));
        let payback_months = (total_savings > 0.0).then(|| {
            let months = implementation_cost / (total_savings / MONTHS_PER_YEAR);
            (months * 10.0).round() / 10.0
        });

        let year_two = total_savings * self.assumptions.year_two_growth;
        let year_three = total_savings * self.assumptions.year_three_growth;
        let three_year = total_savings + year_two + year_three;

        Ok(RoiResults {
            industry,
            multipliers: multiplier,
            savings: savings.rounded(),
            total_savings: round(total_savings),
            implementation_cost: round(implementation_cost),
            net_roi: round(net_roi),
            roi_percentage,
            payback_months,
            year_two_savings: round(year_two),
            year_three_savings: round(year_three),
            three_year_savings: round(three_year),
            three_year_net: round(three_year - implementation_cost),
        })
    }

    fn savings(&self, inputs: &RoiInputs, multiplier: &IndustryMultiplier) -> RawSavings {
        let a = &self.assumptions;
        let rate = inputs.hourly_rate;

        RawSavings {
            month_end: inputs.month_end_days
                * a.close_reduction
                * f64::from(inputs.finance_team_size)
                * HOURS_PER_DAY
                * rate
                * MONTHS_PER_YEAR
                * multiplier.efficiency,
            manual_process: inputs.manual_hours_per_week
                * a.automation_rate
                * WEEKS_PER_YEAR
                * rate
                * multiplier.efficiency,
            reporting: inputs.reporting_hours_per_week
                * a.reporting_automation_rate
                * WEEKS_PER_YEAR
                * rate
                * multiplier.efficiency,
            error_reduction: inputs.annual_revenue
                * (inputs.error_rate / 100.0)
                * a.error_cost_share
                * a.error_reduction
                * multiplier.efficiency,
            compliance: inputs.annual_compliance_cost
                * a.compliance_reduction
                * multiplier.compliance,
            maintenance: inputs.annual_maintenance_cost * a.maintenance_reduction,
            decision_speed: inputs.annual_revenue
                * a.decision_speed_share
                * multiplier.efficiency,
        }
    }
}

impl Default for RoiProjector {
    fn default() -> Self {
        Self::new(
            IndustryMultiplierTable::standard(),
            SavingsAssumptions::standard(),
        )
    }
}

struct RawSavings {
    month_end: f64,
    manual_process: f64,
    reporting: f64,
    error_reduction: f64,
    compliance: f64,
    maintenance: f64,
    decision_speed: f64,
}

impl RawSavings {
    fn total(&self) -> f64 {
        self.month_end
            + self.manual_process
            + self.reporting
            + self.error_reduction
            + self.compliance
            + self.maintenance
            + self.decision_speed
    }

    fn rounded(&self) -> SavingsBreakdown {
        SavingsBreakdown {
            month_end: round(self.month_end),
            manual_process: round(self.manual_process),
            reporting: round(self.reporting),
            error_reduction: round(self.error_reduction),
            compliance: round(self.compliance),
            maintenance: round(self.maintenance),
            decision_speed: round(self.decision_speed),
        }
    }
}

fn round(value: f64) -> i64 {
    value.round() as i64
}
