use chrono::{DateTime, NaiveDate, Utc};

use super::super::domain::{ClubId, CoachId, RecruiterId};
use super::domain::{
    Deliverable, DeliverableId, DeliverableIntake, Mandate, MandateId, MandateIntake,
    ShortlistEntry, ShortlistEntryId, ShortlistIntake,
};

/// Validation failures for mandate, shortlist, and deliverable input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MandateViolation {
    #[error("Please complete all required fields")]
    IncompleteMandate,
    #[error("Dates must use YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Target completion date must be on or after engagement date")]
    CompletionBeforeEngagement,
    #[error("Please select a valid club")]
    InvalidClub,
    #[error("Please complete all shortlist fields")]
    IncompleteShortlist,
    #[error("Placement probability must be between 0 and 100")]
    ProbabilityOutOfRange,
    #[error("Please complete all deliverable fields")]
    IncompleteDeliverable,
}

/// Trimmed and parsed mandate fields, waiting for the club ownership check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MandateTerms {
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
}

impl MandateTerms {
    pub fn into_mandate(
        self,
        id: MandateId,
        owner: RecruiterId,
        created_at: DateTime<Utc>,
    ) -> Mandate {
        Mandate {
            id,
            owner,
            club_id: self.club_id,
            status: self.status,
            engagement_date: self.engagement_date,
            target_completion_date: self.target_completion_date,
            priority: self.priority,
            ownership_structure: self.ownership_structure,
            budget_band: self.budget_band,
            strategic_objective: self.strategic_objective,
            board_risk_appetite: self.board_risk_appetite,
            succession_timeline: self.succession_timeline,
            key_stakeholders: self.key_stakeholders,
            confidentiality_level: self.confidentiality_level,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShortlistTerms {
    pub coach_id: CoachId,
    pub placement_probability: u8,
    pub risk_rating: String,
    pub status: String,
}

impl ShortlistTerms {
    pub fn into_entry(
        self,
        id: ShortlistEntryId,
        mandate_id: MandateId,
        created_at: DateTime<Utc>,
    ) -> ShortlistEntry {
        ShortlistEntry {
            id,
            mandate_id,
            coach_id: self.coach_id,
            placement_probability: self.placement_probability,
            risk_rating: self.risk_rating,
            status: self.status,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeliverableTerms {
    pub item: String,
    pub due_date: NaiveDate,
    pub status: String,
}

impl DeliverableTerms {
    pub fn into_deliverable(
        self,
        id: DeliverableId,
        mandate_id: MandateId,
        created_at: DateTime<Utc>,
    ) -> Deliverable {
        Deliverable {
            id,
            mandate_id,
            item: self.item,
            due_date: self.due_date,
            status: self.status,
            created_at,
        }
    }
}

pub(crate) fn mandate_terms(intake: MandateIntake) -> Result<MandateTerms, MandateViolation> {
    let club_id = intake.club_id.trim();
    let status = intake.status.trim();
    let engagement = intake.engagement_date.trim();
    let target = intake.target_completion_date.trim();
    let priority = intake.priority.trim();
    let ownership_structure = intake.ownership_structure.trim();
    let budget_band = intake.budget_band.trim();
    let strategic_objective = intake.strategic_objective.trim();
    let board_risk_appetite = intake.board_risk_appetite.trim();
    let succession_timeline = intake.succession_timeline.trim();
    let confidentiality_level = intake.confidentiality_level.trim();

    let required = [
        club_id,
        status,
        engagement,
        target,
        priority,
        ownership_structure,
        budget_band,
        strategic_objective,
        board_risk_appetite,
        succession_timeline,
        confidentiality_level,
    ];
    if required.iter().any(|value| value.is_empty()) {
        return Err(MandateViolation::IncompleteMandate);
    }

    let engagement_date = parse_date(engagement)?;
    let target_completion_date = parse_date(target)?;
    if engagement_date > target_completion_date {
        return Err(MandateViolation::CompletionBeforeEngagement);
    }

    Ok(MandateTerms {
        club_id: ClubId(club_id.to_string()),
        status: status.to_string(),
        engagement_date,
        target_completion_date,
        priority: priority.to_string(),
        ownership_structure: ownership_structure.to_string(),
        budget_band: budget_band.to_string(),
        strategic_objective: strategic_objective.to_string(),
        board_risk_appetite: board_risk_appetite.to_string(),
        succession_timeline: succession_timeline.to_string(),
        key_stakeholders: split_stakeholders(&intake.key_stakeholders),
        confidentiality_level: confidentiality_level.to_string(),
    })
}

pub(crate) fn shortlist_terms(intake: ShortlistIntake) -> Result<ShortlistTerms, MandateViolation> {
    let coach_id = intake.coach_id.trim();
    let probability = intake.placement_probability.trim();
    let risk_rating = intake.risk_rating.trim();
    let status = intake.status.trim();

    if [coach_id, probability, risk_rating, status]
        .iter()
        .any(|value| value.is_empty())
    {
        return Err(MandateViolation::IncompleteShortlist);
    }

    let placement_probability = probability
        .parse::<i64>()
        .ok()
        .filter(|value| (0..=100).contains(value))
        .ok_or(MandateViolation::ProbabilityOutOfRange)? as u8;

    Ok(ShortlistTerms {
        coach_id: CoachId(coach_id.to_string()),
        placement_probability,
        risk_rating: risk_rating.to_string(),
        status: status.to_string(),
    })
}

pub(crate) fn deliverable_terms(
    intake: DeliverableIntake,
) -> Result<DeliverableTerms, MandateViolation> {
    let item = intake.item.trim();
    let due_date = intake.due_date.trim();
    let status = intake.status.trim();

    if [item, due_date, status].iter().any(|value| value.is_empty()) {
        return Err(MandateViolation::IncompleteDeliverable);
    }

    Ok(DeliverableTerms {
        item: item.to_string(),
        due_date: parse_date(due_date)?,
        status: status.to_string(),
    })
}

/// Split a comma separated stakeholder list, dropping blank entries.
pub fn split_stakeholders(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|stakeholder| !stakeholder.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_date(value: &str) -> Result<NaiveDate, MandateViolation> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| MandateViolation::InvalidDate(value.to_string()))
}
