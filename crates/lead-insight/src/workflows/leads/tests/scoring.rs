use super::common::*;
use crate::workflows::leads::domain::{InteractionKind, LeadGrade, LeadStatus, Timeline};
use crate::workflows::leads::{LeadScoringEngine, ScoreCategory, ScoringRules};

#[test]
fn executive_lead_is_clamped_to_one_hundred() {
    let engine = LeadScoringEngine::default();

    let score = engine.score(&executive_lead("exec"));

    assert_eq!(score.breakdown.demographic, 75);
    assert_eq!(score.breakdown.intent, 75);
    assert_eq!(score.breakdown.behavioral, 0);
    assert_eq!(score.breakdown.engagement, 0);
    assert_eq!(score.breakdown.raw_total(), 150);
    assert_eq!(score.score, 100);
    assert_eq!(score.grade, LeadGrade::A);
    assert_eq!(score.status, LeadStatus::Hot);
}

#[test]
fn blank_lead_scores_zero_without_failing() {
    let engine = LeadScoringEngine::default();

    let score = engine.score(&blank_lead("blank"));

    assert_eq!(score.score, 0);
    assert!(score.components.is_empty());
    assert_eq!(score.grade, LeadGrade::D);
    assert_eq!(score.status, LeadStatus::Cold);
}

#[test]
fn behavioral_and_engagement_use_separate_weight_tables() {
    let engine = LeadScoringEngine::default();
    let mut lead = blank_lead("touches");
    lead.interactions = vec![
        event(InteractionKind::VideoWatch, 2),
        event(InteractionKind::FormFill, 3),
        event(InteractionKind::PageView, 3),
        event(InteractionKind::PageView, 4),
        event(InteractionKind::EmailOpen, 5),
        event(InteractionKind::EmailClick, 5),
    ];

    let score = engine.score(&lead);

    assert_eq!(score.breakdown.behavioral, 15 + 20 + 2 + 2);
    assert_eq!(score.breakdown.engagement, 3 + 8);
    assert_eq!(score.score, 50);
    assert_eq!(score.grade, LeadGrade::C);
    assert_eq!(score.status, LeadStatus::Nurturing);
    assert!(score
        .components
        .iter()
        .any(|component| component.category == ScoreCategory::Behavioral
            && component.points == 4
            && component.notes.contains("page_view")));
}

#[test]
fn unknown_interaction_tags_contribute_nothing() {
    let engine = LeadScoringEngine::default();
    let mut lead = blank_lead("unknown");
    lead.interactions = vec![
        event(InteractionKind::Other("webinar_join".to_string()), 2),
        event(InteractionKind::Other("chat_started".to_string()), 3),
    ];

    let score = engine.score(&lead);

    assert_eq!(score.score, 0);
}

#[test]
fn first_matching_seniority_tier_wins() {
    let engine = LeadScoringEngine::default();
    let cases = [
        ("Chief Financial Officer", 25),
        ("VP, Finance", 25),
        ("Accounting Manager", 15),
        ("Senior Financial Analyst", 5),
        ("Bookkeeper", 0),
    ];

    for (role, expected) in cases {
        let mut lead = blank_lead("role");
        lead.role = role.to_string();
        assert_eq!(
            engine.score(&lead).breakdown.demographic,
            expected,
            "role {role}"
        );
    }
}

#[test]
fn company_size_bands_and_industry_match_case_insensitively() {
    let engine = LeadScoringEngine::default();
    let mut lead = blank_lead("firmographics");
    lead.industry = Some("Financial Services".to_string());
    lead.company_size = Some("Small".to_string());

    assert_eq!(engine.score(&lead).breakdown.demographic, 20 + 10);

    lead.industry = Some("hospitality".to_string());
    lead.company_size = Some("201-500".to_string());
    assert_eq!(engine.score(&lead).breakdown.demographic, 20);
}

#[test]
fn trivial_budgets_and_short_challenges_earn_no_intent() {
    let engine = LeadScoringEngine::default();
    let mut lead = blank_lead("intent");
    lead.timeline = Some(Timeline::Exploring);
    lead.budget = Some("Not-Sure".to_string());
    lead.challenges = "x".repeat(50);

    assert_eq!(engine.score(&lead).breakdown.intent, 0);

    lead.challenges = "x".repeat(51);
    lead.timeline = Some(Timeline::OneToThreeMonths);
    assert_eq!(engine.score(&lead).breakdown.intent, 20 + 20);
}

#[test]
fn more_interactions_never_lower_the_score() {
    let engine = LeadScoringEngine::default();
    let mut lead = blank_lead("monotonic");
    let mut previous = engine.score(&lead).score;

    for (day, kind) in [
        InteractionKind::PageView,
        InteractionKind::EmailOpen,
        InteractionKind::Download,
        InteractionKind::Other("tweet".to_string()),
        InteractionKind::PhoneCall,
        InteractionKind::FormFill,
        InteractionKind::VideoWatch,
        InteractionKind::PhoneCall,
    ]
    .into_iter()
    .enumerate()
    {
        lead = lead.with_interaction(event(kind, day as u32 + 2));
        let next = engine.score(&lead).score;
        assert!(next >= previous, "score dropped from {previous} to {next}");
        assert!(next <= 100);
        previous = next;
    }

    assert_eq!(previous, 100);
}

#[test]
fn scoring_is_deterministic() {
    let engine = LeadScoringEngine::default();
    let lead = executive_lead("repeat").with_interaction(event(InteractionKind::Download, 4));

    assert_eq!(engine.score(&lead), engine.score(&lead));
}

#[test]
fn status_override_wins_but_grade_still_follows_score() {
    let engine = LeadScoringEngine::default();
    let lead = executive_lead("pinned").with_status_override(Some(LeadStatus::Nurturing));

    let score = engine.score(&lead);

    assert_eq!(score.score, 100);
    assert_eq!(score.grade, LeadGrade::A);
    assert_eq!(score.status, LeadStatus::Nurturing);
}

#[test]
fn injected_rules_change_weights_without_code_changes() {
    let mut rules = ScoringRules::standard();
    rules.engagement.0.insert(InteractionKind::PhoneCall, 60);
    rules.statuses.hot = 90;
    let engine = LeadScoringEngine::new(rules);
    let lead = blank_lead("tuned").with_interaction(event(InteractionKind::PhoneCall, 2));

    let score = engine.score(&lead);

    assert_eq!(score.score, 60);
    assert_eq!(score.status, LeadStatus::Qualified);
}

#[test]
fn oversized_point_values_saturate_instead_of_overflowing() {
    let mut rules = ScoringRules::standard();
    rules.demographic.target_industry_points = u32::MAX;
    rules.intent.budget_points = u32::MAX;
    rules.intent.pain_point_points = u32::MAX;
    let engine = LeadScoringEngine::new(rules);

    let score = engine.score(&executive_lead("oversized"));

    assert_eq!(score.breakdown.demographic, u32::MAX);
    assert_eq!(score.breakdown.intent, u32::MAX);
    assert_eq!(score.breakdown.raw_total(), u32::MAX);
    assert_eq!(score.score, 100);
    assert_eq!(score.grade, LeadGrade::A);
    assert_eq!(score.status, LeadStatus::Hot);
}
