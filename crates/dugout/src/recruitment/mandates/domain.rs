use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::super::domain::{ClubId, CoachId, RecruiterId, RosterCounts};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MandateId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShortlistEntryId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeliverableId(pub String);

/// A club's recruitment engagement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mandate {
    pub id: MandateId,
    pub owner: RecruiterId,
    pub club_id: ClubId,
    pub status: String,
    pub engagement_date: NaiveDate,
    pub target_completion_date: NaiveDate,
    pub priority: String,
    pub ownership_structure: String,
    pub budget_band: String,
    pub strategic_objective: String,
    pub board_risk_appetite: String,
    pub succession_timeline: String,
    pub key_stakeholders: Vec<String>,
    pub confidentiality_level: String,
    pub created_at: DateTime<Utc>,
}

/// Candidate attached to a mandate with the recruiter's placement estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    pub id: ShortlistEntryId,
    pub mandate_id: MandateId,
    pub coach_id: CoachId,
    pub placement_probability: u8,
    pub risk_rating: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deliverable {
    pub id: DeliverableId,
    pub mandate_id: MandateId,
    pub item: String,
    pub due_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Raw mandate form input. Every field arrives as text and is validated on intake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MandateIntake {
    pub club_id: String,
    pub status: String,
    pub engagement_date: String,
    pub target_completion_date: String,
    pub priority: String,
    pub ownership_structure: String,
    pub budget_band: String,
    pub strategic_objective: String,
    pub board_risk_appetite: String,
    pub succession_timeline: String,
    /// Comma separated list of stakeholder roles.
    pub key_stakeholders: String,
    pub confidentiality_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortlistIntake {
    pub coach_id: String,
    #[serde(deserialize_with = "text_or_number")]
    pub placement_probability: String,
    pub risk_rating: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliverableIntake {
    pub item: String,
    pub due_date: String,
    pub status: String,
}

/// Accept `72`, `"72"`, or `null` for numeric form fields.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

/// Row in the mandate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MandateSummary {
    pub id: MandateId,
    pub status: String,
    pub priority: String,
    pub engagement_date: NaiveDate,
    pub target_completion_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub club_name: Option<String>,
}

/// Recruiter landing view: roster availability, vacancy and mandate load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardOverview {
    pub roster: RosterCounts,
    pub total_vacancies: usize,
    pub open_vacancies: usize,
    pub active_mandates: usize,
    pub high_priority_mandates: usize,
    /// High-confidence intelligence on coaches shortlisted for this recruiter.
    pub high_confidence_signals: usize,
    /// Ordered by target completion date, soonest first.
    pub mandates: Vec<MandateSummary>,
}

/// Shortlist entry joined with the coach's public details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortlistView {
    pub id: ShortlistEntryId,
    pub coach_id: CoachId,
    pub placement_probability: u8,
    pub risk_rating: String,
    pub status: String,
    pub coach_name: Option<String>,
    pub coach_current_club: Option<String>,
    pub coach_nationality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MandateDetail {
    #[serde(flatten)]
    pub mandate: Mandate,
    pub club_name: Option<String>,
    pub club_league: Option<String>,
    pub shortlist: Vec<ShortlistView>,
    pub deliverables: Vec<Deliverable>,
}
