use chrono::{DateTime, Utc};

use super::domain::{LeadId, LeadRecord, LeadSubmission};

/// Validation errors raised while accepting a form submission.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("lead name is required")]
    MissingName,
    #[error("company is required")]
    MissingCompany,
    #[error("email address '{0}' is not deliverable")]
    InvalidEmail(String),
}

/// Guard that turns raw submissions into normalized lead records.
#[derive(Debug, Clone, Default)]
pub struct LeadIntake;

impl LeadIntake {
    /// Validate `submission` and produce the first version of its record.
    pub fn record_from_submission(
        &self,
        id: LeadId,
        submission: LeadSubmission,
        captured_at: DateTime<Utc>,
    ) -> Result<LeadRecord, IntakeViolation> {
        let name = submission.name.trim().to_string();
        if name.is_empty() {
            return Err(IntakeViolation::MissingName);
        }

        let company = submission.company.trim().to_string();
        if company.is_empty() {
            return Err(IntakeViolation::MissingCompany);
        }

        let email = submission.email.trim().to_ascii_lowercase();
        if !is_plausible_email(&email) {
            return Err(IntakeViolation::InvalidEmail(submission.email));
        }

        let mut interactions = submission.interactions;
        interactions.sort_by_key(|event| event.timestamp);

        Ok(LeadRecord {
            id,
            name,
            email,
            phone: non_blank(submission.phone),
            company,
            role: submission.role.trim().to_string(),
            industry: non_blank(submission.industry),
            company_size: non_blank(submission.company_size),
            current_system: non_blank(submission.current_system),
            challenges: submission.challenges.trim().to_string(),
            timeline: submission.timeline,
            budget: non_blank(submission.budget),
            source: submission.source,
            interactions,
            captured_at,
            status_override: None,
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
