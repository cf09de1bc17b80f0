use super::super::domain::{LeadGrade, LeadRecord, LeadStatus};
use super::rules::{GradeThresholds, StatusThresholds};

// Grade and status use separate cut points. They agree above 40 and diverge below it, where
// a D-grade lead may be either `new` or `cold`.

pub(crate) fn grade_for(score: u8, thresholds: &GradeThresholds) -> LeadGrade {
    if score >= thresholds.a {
        LeadGrade::A
    } else if score >= thresholds.b {
        LeadGrade::B
    } else if score >= thresholds.c {
        LeadGrade::C
    } else {
        LeadGrade::D
    }
}

pub(crate) fn status_for_score(score: u8, thresholds: &StatusThresholds) -> LeadStatus {
    if score >= thresholds.hot {
        LeadStatus::Hot
    } else if score >= thresholds.qualified {
        LeadStatus::Qualified
    } else if score >= thresholds.nurturing {
        LeadStatus::Nurturing
    } else if score >= thresholds.new {
        LeadStatus::New
    } else {
        LeadStatus::Cold
    }
}

/// A status pinned on the record wins over the threshold lookup.
pub(crate) fn status_for(
    lead: &LeadRecord,
    score: u8,
    thresholds: &StatusThresholds,
) -> LeadStatus {
    lead.status_override
        .unwrap_or_else(|| status_for_score(score, thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::leads::ScoringRules;

    #[test]
    fn grade_boundaries_are_inclusive() {
        let thresholds = ScoringRules::standard().grades;
        let cases = [
            (100, LeadGrade::A),
            (80, LeadGrade::A),
            (79, LeadGrade::B),
            (60, LeadGrade::B),
            (59, LeadGrade::C),
            (40, LeadGrade::C),
            (39, LeadGrade::D),
            (0, LeadGrade::D),
        ];
        for (score, expected) in cases {
            assert_eq!(grade_for(score, &thresholds), expected, "score {score}");
        }
    }

    #[test]
    fn status_boundaries_are_inclusive() {
        let thresholds = ScoringRules::standard().statuses;
        let cases = [
            (80, LeadStatus::Hot),
            (79, LeadStatus::Qualified),
            (60, LeadStatus::Qualified),
            (59, LeadStatus::Nurturing),
            (40, LeadStatus::Nurturing),
            (39, LeadStatus::New),
            (20, LeadStatus::New),
            (19, LeadStatus::Cold),
            (0, LeadStatus::Cold),
        ];
        for (score, expected) in cases {
            assert_eq!(status_for_score(score, &thresholds), expected, "score {score}");
        }
    }

    #[test]
    fn low_grades_split_across_two_statuses() {
        let rules = ScoringRules::standard();
        assert_eq!(grade_for(25, &rules.grades), LeadGrade::D);
        assert_eq!(grade_for(10, &rules.grades), LeadGrade::D);
        assert_eq!(status_for_score(25, &rules.statuses), LeadStatus::New);
        assert_eq!(status_for_score(10, &rules.statuses), LeadStatus::Cold);
    }
}
