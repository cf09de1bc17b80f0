use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{InteractionEvent, InteractionKind, LeadId, LeadRecord, LeadSource, Timeline};

/// Failure while reading a marketing export.
#[derive(Debug)]
pub enum LeadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: String },
}

impl std::fmt::Display for LeadImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadImportError::Io(err) => write!(f, "failed to read lead export: {}", err),
            LeadImportError::Csv(err) => write!(f, "invalid lead CSV data: {}", err),
            LeadImportError::InvalidRow { line, reason } => {
                write!(f, "lead export line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for LeadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeadImportError::Io(err) => Some(err),
            LeadImportError::Csv(err) => Some(err),
            LeadImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for LeadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LeadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads lead exports with one row per lead.
///
/// Interactions are packed into a single `Interactions` column as `;`-separated
/// `type@timestamp` pairs, e.g. `page_view@2025-03-02T10:00:00Z;download@2025-03-04`.
pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LeadRecord>, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LeadRecord>, LeadImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut leads = Vec::new();

        for (index, row) in csv_reader.deserialize::<LeadRow>().enumerate() {
            let row = row?;
            // header is line 1
            let line = index as u64 + 2;
            leads.push(row.into_record(line)?);
        }

        Ok(leads)
    }
}

#[derive(Debug, Deserialize)]
struct LeadRow {
    #[serde(rename = "Lead ID", default, deserialize_with = "empty_string_as_none")]
    lead_id: Option<String>,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Role", default)]
    role: String,
    #[serde(rename = "Industry", default, deserialize_with = "empty_string_as_none")]
    industry: Option<String>,
    #[serde(
        rename = "Company Size",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    company_size: Option<String>,
    #[serde(
        rename = "Current System",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    current_system: Option<String>,
    #[serde(rename = "Challenges", default)]
    challenges: String,
    #[serde(rename = "Timeline", default, deserialize_with = "empty_string_as_none")]
    timeline: Option<String>,
    #[serde(rename = "Budget", default, deserialize_with = "empty_string_as_none")]
    budget: Option<String>,
    #[serde(rename = "Source", default, deserialize_with = "empty_string_as_none")]
    source: Option<String>,
    #[serde(rename = "Captured At", default, deserialize_with = "empty_string_as_none")]
    captured_at: Option<String>,
    #[serde(rename = "Interactions", default)]
    interactions: String,
}

impl LeadRow {
    fn into_record(self, line: u64) -> Result<LeadRecord, LeadImportError> {
        let invalid = |reason: String| LeadImportError::InvalidRow { line, reason };

        let timeline = match self.timeline.as_deref() {
            Some(raw) => Some(
                Timeline::parse(raw).ok_or_else(|| invalid(format!("unknown timeline '{raw}'")))?,
            ),
            None => None,
        };

        let captured_at = match self.captured_at.as_deref() {
            Some(raw) => {
                parse_timestamp(raw).ok_or_else(|| invalid(format!("bad timestamp '{raw}'")))?
            }
            None => DateTime::<Utc>::UNIX_EPOCH,
        };

        let mut interactions = Vec::new();
        for entry in self
            .interactions
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
        {
            let (tag, raw_time) = entry
                .split_once('@')
                .ok_or_else(|| invalid(format!("interaction '{entry}' missing '@timestamp'")))?;
            let timestamp = parse_timestamp(raw_time)
                .ok_or_else(|| invalid(format!("bad interaction timestamp '{raw_time}'")))?;
            interactions.push(InteractionEvent {
                kind: InteractionKind::from(tag.trim().to_string()),
                timestamp,
                detail: String::new(),
            });
        }
        interactions.sort_by_key(|event| event.timestamp);

        let id = self
            .lead_id
            .map(LeadId)
            .unwrap_or_else(|| LeadId(format!("import-{line:06}")));

        Ok(LeadRecord {
            id,
            name: self.name,
            email: self.email.to_ascii_lowercase(),
            phone: self.phone,
            company: self.company,
            role: self.role,
            industry: self.industry,
            company_size: self.company_size,
            current_system: self.current_system,
            challenges: self.challenges,
            timeline,
            budget: self.budget,
            source: self.source.as_deref().map(parse_source),
            interactions,
            captured_at,
            status_override: None,
        })
    }
}

fn parse_source(raw: &str) -> LeadSource {
    let key = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
    serde_json::from_value(serde_json::Value::String(key)).unwrap_or(LeadSource::Other)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Lead ID,Name,Email,Company,Role,Industry,Company Size,Timeline,Budget,Source,Captured At,Challenges,Interactions\n";

    #[test]
    fn parses_rows_with_packed_interactions() {
        let csv = format!(
            "{HEADER}L-1,Dana Ortiz,Dana@Acme.io,Acme,CFO,manufacturing,enterprise,immediate,100k+,paid search,2025-03-01T09:00:00Z,Month-end close takes us nine days,download@2025-03-04;page_view@2025-03-02T10:00:00Z\n"
        );

        let leads = LeadCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(leads.len(), 1);
        let lead = &leads[0];
        assert_eq!(lead.id, LeadId("L-1".to_string()));
        assert_eq!(lead.email, "dana@acme.io");
        assert_eq!(lead.timeline, Some(Timeline::Immediate));
        assert_eq!(lead.source, Some(LeadSource::PaidSearch));
        assert_eq!(lead.interactions.len(), 2);
        assert_eq!(lead.interactions[0].kind, InteractionKind::PageView);
        assert_eq!(lead.interactions[1].kind, InteractionKind::Download);
    }

    #[test]
    fn blank_optional_columns_become_none() {
        let csv = format!("{HEADER},Sam Lee,sam@example.com,Lee & Co,,,,,,,,,\n");

        let leads = LeadCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        let lead = &leads[0];
        assert_eq!(lead.id, LeadId("import-000002".to_string()));
        assert!(lead.industry.is_none());
        assert!(lead.timeline.is_none());
        assert!(lead.budget.is_none());
        assert!(lead.interactions.is_empty());
        assert_eq!(lead.captured_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn unknown_timeline_reports_line() {
        let csv = format!("{HEADER}L-9,Sam Lee,sam@example.com,Lee & Co,,,,someday,,,,,\n");

        match LeadCsvImporter::from_reader(Cursor::new(csv)) {
            Err(LeadImportError::InvalidRow { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("someday"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn unknown_interaction_tags_are_kept() {
        let csv = format!(
            "{HEADER}L-3,Ana Ruiz,ana@example.com,Ruiz LLC,,,,,,,,,webinar_join@2025-01-05\n"
        );

        let leads = LeadCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(
            leads[0].interactions[0].kind,
            InteractionKind::Other("webinar_join".to_string())
        );
    }
}
