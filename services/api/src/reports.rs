use chrono::{Local, NaiveDate};
use clap::Args;
use lead_insight::config::read_json;
use lead_insight::error::AppError;
use lead_insight::workflows::leads::{
    LeadCsvImporter, LeadRecord, LeadScore, LeadScoringEngine, ScoringRules,
};
use lead_insight::workflows::roi::{
    IndustryMultiplierTable, RoiInputs, RoiProjector, RoiResults, SavingsAssumptions,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct LeadReportArgs {
    /// CSV export of captured leads
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Only print the highest scoring N leads
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// JSON scoring rules replacing the standard weights
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Reference date for "days since last touch" (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the per-rule components under each lead
    #[arg(long)]
    pub(crate) explain: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RoiProjectionArgs {
    /// Total employee count, used to pick the implementation cost band
    #[arg(long)]
    pub(crate) employees: u32,
    /// Industry key (e.g. manufacturing, financial services)
    #[arg(long)]
    pub(crate) industry: Option<String>,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) revenue: f64,
    #[arg(long, default_value_t = 1)]
    pub(crate) finance_team: u32,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) month_end_days: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) manual_hours: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) reporting_hours: f64,
    /// Share of transactions needing correction, in percent
    #[arg(long, default_value_t = 0.0)]
    pub(crate) error_rate: f64,
    #[arg(long, default_value_t = 50.0)]
    pub(crate) hourly_rate: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) compliance_cost: f64,
    #[arg(long, default_value_t = 0.0)]
    pub(crate) maintenance_cost: f64,
    /// JSON industry multiplier table replacing the standard one
    #[arg(long)]
    pub(crate) multipliers: Option<PathBuf>,
}

impl RoiProjectionArgs {
    fn inputs(&self) -> RoiInputs {
        RoiInputs {
            industry: self.industry.clone(),
            annual_revenue: self.revenue,
            employee_count: self.employees,
            finance_team_size: self.finance_team,
            month_end_days: self.month_end_days,
            manual_hours_per_week: self.manual_hours,
            reporting_hours_per_week: self.reporting_hours,
            error_rate: self.error_rate,
            hourly_rate: self.hourly_rate,
            annual_compliance_cost: self.compliance_cost,
            annual_maintenance_cost: self.maintenance_cost,
        }
    }
}

pub(crate) fn run_lead_report(args: LeadReportArgs) -> Result<(), AppError> {
    let LeadReportArgs {
        csv,
        top,
        rules,
        today,
        explain,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let rules = match rules {
        Some(path) => read_json::<ScoringRules>(&path)?,
        None => ScoringRules::standard(),
    };
    let engine = LeadScoringEngine::new(rules);
    let records = LeadCsvImporter::from_path(&csv)?;
    let total = records.len();
    let ranked = rank_leads(records, &engine, top);

    println!("Lead pipeline ({} of {} leads, as of {})", ranked.len(), total, today);
    for (position, (record, score)) in ranked.iter().enumerate() {
        let last_touch = record
            .last_interaction_at()
            .map(|at| format!("{}d ago", (today - at.date_naive()).num_days()))
            .unwrap_or_else(|| "no activity".to_string());
        println!(
            "{:>3}. {:<24} {:<28} {:>3} {} {:<9} {}",
            position + 1,
            record.name,
            record.company,
            score.score,
            score.grade.label(),
            score.status.label(),
            last_touch
        );
        if explain {
            for component in &score.components {
                println!(
                    "       +{:<3} {:?}: {}",
                    component.points, component.category, component.notes
                );
            }
        }
    }

    Ok(())
}

pub(crate) fn run_roi_projection(args: RoiProjectionArgs) -> Result<(), AppError> {
    let multipliers = match &args.multipliers {
        Some(path) => read_json::<IndustryMultiplierTable>(path)?,
        None => IndustryMultiplierTable::standard(),
    };
    let projector = RoiProjector::new(multipliers, SavingsAssumptions::standard());
    let results = projector.project(&args.inputs())?;
    render_projection(&results);
    Ok(())
}

/// Score every record and order the pipeline hottest first.
fn rank_leads(
    records: Vec<LeadRecord>,
    engine: &LeadScoringEngine,
    top: Option<usize>,
) -> Vec<(LeadRecord, LeadScore)> {
    let mut ranked: Vec<_> = records
        .into_iter()
        .map(|record| {
            let score = engine.score(&record);
            (record, score)
        })
        .collect();
    ranked.sort_by(|(a, a_score), (b, b_score)| {
        b_score
            .score
            .cmp(&a_score.score)
            .then_with(|| a.captured_at.cmp(&b.captured_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    if let Some(limit) = top {
        ranked.truncate(limit);
    }
    ranked
}

fn render_projection(results: &RoiResults) {
    println!(
        "ROI projection ({})",
        results.industry.as_deref().unwrap_or("baseline multipliers")
    );
    println!(
        "Multipliers: efficiency {:.2}, compliance {:.2}, integration {:.2}",
        results.multipliers.efficiency,
        results.multipliers.compliance,
        results.multipliers.integration
    );

    println!("\nAnnual savings");
    let savings = &results.savings;
    for (label, amount) in [
        ("Month-end close", savings.month_end),
        ("Manual processing", savings.manual_process),
        ("Reporting", savings.reporting),
        ("Error reduction", savings.error_reduction),
        ("Compliance", savings.compliance),
        ("System maintenance", savings.maintenance),
        ("Decision speed", savings.decision_speed),
    ] {
        println!("  {:<20} {:>12}", label, amount);
    }
    println!("  {:<20} {:>12}", "Total", results.total_savings);

    println!("\nImplementation cost: {}", results.implementation_cost);
    println!("Net first-year return: {}", results.net_roi);
    match results.roi_percentage {
        Some(pct) => println!("ROI: {}%", pct),
        None => println!("ROI: n/a"),
    }
    match results.payback_months {
        Some(months) => println!("Payback: {:.1} months", months),
        None => println!("Payback: never at current savings"),
    }
    println!(
        "Three-year savings: {} (net {})",
        results.three_year_savings, results.three_year_net
    );
}
