mod calculator;
mod classify;
mod rules;

pub use rules::{
    DemographicRules, GradeThresholds, IntentRules, InteractionWeights, RoleTier, ScoringRules,
    SizeBand, StatusThresholds, TimelineWeights,
};

pub(crate) use calculator::normalize_key;

use super::domain::{LeadGrade, LeadId, LeadRecord, LeadStatus};
use serde::{Deserialize, Serialize};

/// Stateless scorer that applies a rules table to lead records.
#[derive(Debug, Clone)]
pub struct LeadScoringEngine {
    rules: ScoringRules,
}

impl LeadScoringEngine {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn score(&self, lead: &LeadRecord) -> LeadScore {
        let (components, breakdown) = calculator::score_lead(lead, &self.rules);
        let score = calculator::clamp_total(&breakdown);

        LeadScore {
            lead_id: lead.id.clone(),
            score,
            grade: classify::grade_for(score, &self.rules.grades),
            status: classify::status_for(lead, score, &self.rules.statuses),
            breakdown,
            components,
        }
    }
}

impl Default for LeadScoringEngine {
    fn default() -> Self {
        Self::new(ScoringRules::standard())
    }
}

/// Rule family a component was earned under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Demographic,
    Behavioral,
    Engagement,
    Intent,
}

/// Discrete contribution to a score, kept for sales-facing audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub category: ScoreCategory,
    pub points: u32,
    pub notes: String,
}

/// Unclamped per-category totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub demographic: u32,
    pub behavioral: u32,
    pub engagement: u32,
    pub intent: u32,
}

impl ScoreBreakdown {
    pub fn raw_total(&self) -> u32 {
        self.demographic
            .saturating_add(self.behavioral)
            .saturating_add(self.engagement)
            .saturating_add(self.intent)
    }
}

/// Scoring output: clamped score, classifications and the trail that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScore {
    pub lead_id: LeadId,
    pub score: u8,
    pub grade: LeadGrade,
    pub status: LeadStatus,
    pub breakdown: ScoreBreakdown,
    pub components: Vec<ScoreComponent>,
}
