use super::super::domain::LeadRecord;
use super::rules::{DemographicRules, IntentRules, InteractionWeights, ScoringRules};
use super::{ScoreBreakdown, ScoreCategory, ScoreComponent};

pub(crate) const MAX_SCORE: u32 = 100;

/// Apply every rule category to `lead`, returning the audit trail and per-category totals.
pub(crate) fn score_lead(
    lead: &LeadRecord,
    rules: &ScoringRules,
) -> (Vec<ScoreComponent>, ScoreBreakdown) {
    let mut components = Vec::new();

    let demographic = demographic_score(lead, &rules.demographic, &mut components);
    let behavioral = interaction_score(
        lead,
        &rules.behavioral,
        ScoreCategory::Behavioral,
        &mut components,
    );
    let engagement = interaction_score(
        lead,
        &rules.engagement,
        ScoreCategory::Engagement,
        &mut components,
    );
    let intent = intent_score(lead, &rules.intent, &mut components);

    let breakdown = ScoreBreakdown {
        demographic,
        behavioral,
        engagement,
        intent,
    };

    (components, breakdown)
}

pub(crate) fn clamp_total(breakdown: &ScoreBreakdown) -> u8 {
    breakdown.raw_total().min(MAX_SCORE) as u8
}

fn demographic_score(
    lead: &LeadRecord,
    rules: &DemographicRules,
    components: &mut Vec<ScoreComponent>,
) -> u32 {
    let mut total: u32 = 0;

    let role = padded_words(&lead.role);
    if !role.trim().is_empty() {
        let matched = rules.seniority_tiers.iter().find_map(|tier| {
            tier.keywords
                .iter()
                .find(|keyword| role.contains(&padded_words(keyword)))
                .map(|keyword| (tier, keyword))
        });
        if let Some((tier, keyword)) = matched {
            total = total.saturating_add(tier.points);
            components.push(ScoreComponent {
                category: ScoreCategory::Demographic,
                points: tier.points,
                notes: format!("{} role matched '{}'", tier.label, keyword),
            });
        }
    }

    if let Some(industry) = lead.industry.as_deref().map(normalize_key) {
        let targeted = rules
            .target_industries
            .iter()
            .any(|target| normalize_key(target) == industry);
        if targeted {
            total = total.saturating_add(rules.target_industry_points);
            components.push(ScoreComponent {
                category: ScoreCategory::Demographic,
                points: rules.target_industry_points,
                notes: format!("target industry {industry}"),
            });
        }
    }

    if let Some(size) = lead.company_size.as_deref() {
        let size = size.trim().to_ascii_lowercase();
        let band = rules.size_bands.iter().find(|band| {
            band.values
                .iter()
                .any(|value| value.trim().eq_ignore_ascii_case(&size))
        });
        if let Some(band) = band {
            total = total.saturating_add(band.points);
            components.push(ScoreComponent {
                category: ScoreCategory::Demographic,
                points: band.points,
                notes: format!("company size {size} in {} band", band.label),
            });
        }
    }

    total
}

fn interaction_score(
    lead: &LeadRecord,
    weights: &InteractionWeights,
    category: ScoreCategory,
    components: &mut Vec<ScoreComponent>,
) -> u32 {
    let mut total: u32 = 0;

    for (kind, points) in weights.0.iter() {
        let count = lead
            .interactions
            .iter()
            .filter(|event| &event.kind == kind)
            .count() as u32;
        if count == 0 || *points == 0 {
            continue;
        }
        let earned = points.saturating_mul(count);
        total = total.saturating_add(earned);
        components.push(ScoreComponent {
            category,
            points: earned,
            notes: format!("{count} x {} at {points} each", kind.tag()),
        });
    }

    total
}

fn intent_score(
    lead: &LeadRecord,
    rules: &IntentRules,
    components: &mut Vec<ScoreComponent>,
) -> u32 {
    let mut total: u32 = 0;

    if let Some(timeline) = lead.timeline {
        let points = rules.timeline.weight(timeline);
        if points > 0 {
            total = total.saturating_add(points);
            components.push(ScoreComponent {
                category: ScoreCategory::Intent,
                points,
                notes: format!("timeline {timeline:?}"),
            });
        }
    }

    if let Some(budget) = lead.budget.as_deref() {
        let budget = budget.trim();
        let trivial = rules
            .trivial_budgets
            .iter()
            .any(|tier| tier.trim().eq_ignore_ascii_case(budget));
        if !trivial {
            total = total.saturating_add(rules.budget_points);
            components.push(ScoreComponent {
                category: ScoreCategory::Intent,
                points: rules.budget_points,
                notes: format!("budget {budget} declared"),
            });
        }
    }

    let described = lead.challenges.trim().chars().count();
    if described > rules.pain_point_min_chars {
        total = total.saturating_add(rules.pain_point_points);
        components.push(ScoreComponent {
            category: ScoreCategory::Intent,
            points: rules.pain_point_points,
            notes: format!("pain points described in {described} characters"),
        });
    }

    total
}

/// Lowercased words separated and surrounded by single spaces, so keywords only match whole words.
fn padded_words(raw: &str) -> String {
    let words: Vec<String> = raw
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .collect();
    format!(" {} ", words.join(" "))
}

pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}
