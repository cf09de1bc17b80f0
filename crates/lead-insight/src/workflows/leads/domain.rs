use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned to a lead when it enters the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeadId(pub String);

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Interaction tag recorded by the marketing site.
///
/// Unknown tags are preserved as `Other` so history survives a round trip even when no scoring
/// rule recognizes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InteractionKind {
    PageView,
    VideoWatch,
    FormFill,
    Download,
    EmailOpen,
    EmailClick,
    PhoneCall,
    Other(String),
}

impl InteractionKind {
    pub fn tag(&self) -> &str {
        match self {
            InteractionKind::PageView => "page_view",
            InteractionKind::VideoWatch => "video_watch",
            InteractionKind::FormFill => "form_fill",
            InteractionKind::Download => "download",
            InteractionKind::EmailOpen => "email_open",
            InteractionKind::EmailClick => "email_click",
            InteractionKind::PhoneCall => "phone_call",
            InteractionKind::Other(tag) => tag,
        }
    }
}

impl From<String> for InteractionKind {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "page_view" => InteractionKind::PageView,
            "video_watch" => InteractionKind::VideoWatch,
            "form_fill" => InteractionKind::FormFill,
            "download" => InteractionKind::Download,
            "email_open" => InteractionKind::EmailOpen,
            "email_click" => InteractionKind::EmailClick,
            "phone_call" => InteractionKind::PhoneCall,
            _ => InteractionKind::Other(value),
        }
    }
}

impl From<InteractionKind> for String {
    fn from(value: InteractionKind) -> Self {
        value.tag().to_string()
    }
}

/// Single touchpoint in a lead's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub detail: String,
}

/// Purchase timeline stated on the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "immediate")]
    Immediate,
    #[serde(rename = "1-3-months")]
    OneToThreeMonths,
    #[serde(rename = "3-6-months")]
    ThreeToSixMonths,
    #[serde(rename = "6-12-months")]
    SixToTwelveMonths,
    #[serde(rename = "exploring")]
    Exploring,
}

impl Timeline {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "immediate" => Some(Self::Immediate),
            "1-3-months" => Some(Self::OneToThreeMonths),
            "3-6-months" => Some(Self::ThreeToSixMonths),
            "6-12-months" => Some(Self::SixToTwelveMonths),
            "exploring" => Some(Self::Exploring),
            _ => None,
        }
    }
}

/// Channel that produced the lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Website,
    Referral,
    Webinar,
    Event,
    PaidSearch,
    Social,
    #[serde(other)]
    Other,
}

/// Pipeline status derived from the score unless pinned by a sales rep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Hot,
    Qualified,
    Nurturing,
    New,
    Cold,
}

impl LeadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::Hot => "hot",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Nurturing => "nurturing",
            LeadStatus::New => "new",
            LeadStatus::Cold => "cold",
        }
    }
}

/// Letter grade derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadGrade {
    A,
    B,
    C,
    D,
}

impl LeadGrade {
    pub fn label(&self) -> &'static str {
        match self {
            LeadGrade::A => "A",
            LeadGrade::B => "B",
            LeadGrade::C => "C",
            LeadGrade::D => "D",
        }
    }
}

/// Form payload captured by the marketing site before intake validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub current_system: Option<String>,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub timeline: Option<Timeline>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub source: Option<LeadSource>,
    #[serde(default)]
    pub interactions: Vec<InteractionEvent>,
}

/// Lead as stored in the pipeline.
///
/// Records are never edited in place; recording an interaction produces a new version with the
/// previous history intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub current_system: Option<String>,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub timeline: Option<Timeline>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub source: Option<LeadSource>,
    #[serde(default)]
    pub interactions: Vec<InteractionEvent>,
    pub captured_at: DateTime<Utc>,
    #[serde(default)]
    pub status_override: Option<LeadStatus>,
}

impl LeadRecord {
    /// Derive the next version of this record with `event` appended to its history.
    pub fn with_interaction(&self, event: InteractionEvent) -> LeadRecord {
        let mut next = self.clone();
        next.interactions.push(event);
        next
    }

    /// Derive the next version of this record with a pinned (or cleared) status.
    pub fn with_status_override(&self, status: Option<LeadStatus>) -> LeadRecord {
        LeadRecord {
            status_override: status,
            ..self.clone()
        }
    }

    pub fn last_interaction_at(&self) -> Option<DateTime<Utc>> {
        self.interactions.iter().map(|event| event.timestamp).max()
    }
}
