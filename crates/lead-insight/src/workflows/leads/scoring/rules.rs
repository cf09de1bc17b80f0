use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{InteractionKind, Timeline};

/// Complete weights table consumed by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub demographic: DemographicRules,
    pub behavioral: InteractionWeights,
    pub engagement: InteractionWeights,
    pub intent: IntentRules,
    pub grades: GradeThresholds,
    pub statuses: StatusThresholds,
}

impl ScoringRules {
    /// Table used by the marketing site when no override is configured.
    pub fn standard() -> Self {
        Self {
            demographic: DemographicRules {
                seniority_tiers: vec![
                    RoleTier {
                        label: "senior".to_string(),
                        keywords: strings(&[
                            "ceo",
                            "cfo",
                            "cto",
                            "coo",
                            "chief",
                            "president",
                            "owner",
                            "founder",
                            "vp",
                            "vice president",
                            "director",
                        ]),
                        points: 25,
                    },
                    RoleTier {
                        label: "mid".to_string(),
                        keywords: strings(&["manager", "controller", "head", "lead", "supervisor"]),
                        points: 15,
                    },
                    RoleTier {
                        label: "junior".to_string(),
                        keywords: strings(&[
                            "analyst",
                            "specialist",
                            "coordinator",
                            "associate",
                            "accountant",
                            "assistant",
                        ]),
                        points: 5,
                    },
                ],
                target_industries: strings(&[
                    "manufacturing",
                    "healthcare",
                    "financial_services",
                    "technology",
                    "professional_services",
                ]),
                target_industry_points: 20,
                size_bands: vec![
                    SizeBand {
                        label: "enterprise".to_string(),
                        values: strings(&["enterprise", "500+", "501-1000", "1000+"]),
                        points: 30,
                    },
                    SizeBand {
                        label: "mid-market".to_string(),
                        values: strings(&["mid-market", "medium", "51-200", "201-500"]),
                        points: 20,
                    },
                    SizeBand {
                        label: "small".to_string(),
                        values: strings(&["small", "11-50"]),
                        points: 10,
                    },
                ],
            },
            behavioral: InteractionWeights::from_pairs(&[
                (InteractionKind::VideoWatch, 15),
                (InteractionKind::FormFill, 20),
                (InteractionKind::Download, 10),
                (InteractionKind::PageView, 2),
            ]),
            engagement: InteractionWeights::from_pairs(&[
                (InteractionKind::EmailOpen, 3),
                (InteractionKind::EmailClick, 8),
                (InteractionKind::PhoneCall, 25),
            ]),
            intent: IntentRules {
                timeline: TimelineWeights {
                    immediate: 30,
                    one_to_three_months: 20,
                    three_to_six_months: 10,
                    six_to_twelve_months: 5,
                    exploring: 0,
                },
                budget_points: 25,
                trivial_budgets: strings(&["", "not-sure", "under-10k"]),
                pain_point_min_chars: 50,
                pain_point_points: 20,
            },
            grades: GradeThresholds {
                a: 80,
                b: 60,
                c: 40,
            },
            statuses: StatusThresholds {
                hot: 80,
                qualified: 60,
                nurturing: 40,
                new: 20,
            },
        }
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::standard()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Firmographic weights. Tiers and bands are checked in order; the first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicRules {
    pub seniority_tiers: Vec<RoleTier>,
    pub target_industries: Vec<String>,
    pub target_industry_points: u32,
    pub size_bands: Vec<SizeBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleTier {
    pub label: String,
    pub keywords: Vec<String>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeBand {
    pub label: String,
    pub values: Vec<String>,
    pub points: u32,
}

/// Points per interaction tag; tags absent from the map score zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionWeights(pub BTreeMap<InteractionKind, u32>);

impl InteractionWeights {
    pub fn from_pairs(pairs: &[(InteractionKind, u32)]) -> Self {
        Self(pairs.iter().cloned().collect())
    }

    pub fn weight(&self, kind: &InteractionKind) -> u32 {
        self.0.get(kind).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRules {
    pub timeline: TimelineWeights,
    pub budget_points: u32,
    /// Budget answers that do not signal real spend (compared case-insensitively).
    pub trivial_budgets: Vec<String>,
    pub pain_point_min_chars: usize,
    pub pain_point_points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineWeights {
    pub immediate: u32,
    pub one_to_three_months: u32,
    pub three_to_six_months: u32,
    pub six_to_twelve_months: u32,
    pub exploring: u32,
}

impl TimelineWeights {
    pub fn weight(&self, timeline: Timeline) -> u32 {
        match timeline {
            Timeline::Immediate => self.immediate,
            Timeline::OneToThreeMonths => self.one_to_three_months,
            Timeline::ThreeToSixMonths => self.three_to_six_months,
            Timeline::SixToTwelveMonths => self.six_to_twelve_months,
            Timeline::Exploring => self.exploring,
        }
    }
}

/// Minimum scores for grades A, B and C; anything lower is D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeThresholds {
    pub a: u8,
    pub b: u8,
    pub c: u8,
}

/// Minimum scores for each status; anything below `new` is cold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusThresholds {
    pub hot: u8,
    pub qualified: u8,
    pub nurturing: u8,
    pub new: u8,
}
