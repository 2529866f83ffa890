use std::collections::BTreeSet;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

use super::super::domain::{ClubId, RecruiterId, RosterCounts, OPEN_VACANCY_STATUS};
use super::super::next_sequence_id;
use super::super::repository::{RecruitmentRepository, RepositoryError};
use super::domain::{
    DashboardOverview, Deliverable, DeliverableId, DeliverableIntake, Mandate, MandateDetail,
    MandateId, MandateIntake, MandateSummary, ShortlistEntry, ShortlistEntryId, ShortlistIntake,
    ShortlistView,
};
use super::intake::{
    deliverable_terms, mandate_terms, shortlist_terms, DeliverableTerms, MandateTerms,
    MandateViolation, ShortlistTerms,
};
use super::repository::MandateRepository;
use crate::config::AppEnvironment;

static MANDATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static SHORTLIST_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static DELIVERABLE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

const DEMO_ENGAGEMENT_DAYS: i64 = 30;
const ACTIVE_STATUSES: [&str; 2] = ["Active", "In Progress"];
const HIGH_PRIORITY: &str = "High";

#[derive(Debug, thiserror::Error)]
pub enum MandateServiceError {
    #[error(transparent)]
    Violation(#[from] MandateViolation),
    #[error("Mandate not found")]
    MandateNotFound,
    #[error("Coach not found")]
    CoachNotFound,
    #[error("Coach is already on this shortlist")]
    DuplicateShortlistEntry,
    #[error("Demo creation is disabled in production")]
    DemoDisabled,
    #[error("Create a club first before creating demo mandate")]
    NoClubForDemo,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Mandate workflow over the club/coach store and the mandate store.
pub struct MandateService<R, M> {
    recruitment: Arc<R>,
    mandates: Arc<M>,
    allow_demo: bool,
}

impl<R, M> MandateService<R, M>
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    pub fn new(recruitment: Arc<R>, mandates: Arc<M>, environment: AppEnvironment) -> Self {
        Self {
            recruitment,
            mandates,
            allow_demo: environment.allows_demo_data(),
        }
    }

    pub fn create(
        &self,
        owner: &RecruiterId,
        intake: MandateIntake,
    ) -> Result<Mandate, MandateServiceError> {
        let terms = mandate_terms(intake)?;
        self.owned_club(owner, &terms.club_id)?;
        self.insert_mandate(owner, terms)
    }

    /// Mandates owned by the recruiter, newest first, with the club name attached.
    pub fn list(&self, owner: &RecruiterId) -> Result<Vec<MandateSummary>, MandateServiceError> {
        let mut mandates = self.mandates.mandates_for(owner)?;
        mandates.sort_by(|left, right| {
            (right.created_at, &right.id).cmp(&(left.created_at, &left.id))
        });

        mandates
            .into_iter()
            .map(|mandate| self.summarize(mandate))
            .collect()
    }

    /// Roster availability, vacancy counts, and the recruiter's mandates by target date.
    pub fn overview(&self, owner: &RecruiterId) -> Result<DashboardOverview, MandateServiceError> {
        let roster = RosterCounts::tally(&self.recruitment.coaches()?);

        let vacancies = self.recruitment.vacancies_for(owner)?;
        let open_vacancies = vacancies
            .iter()
            .filter(|vacancy| vacancy.status == OPEN_VACANCY_STATUS)
            .count();

        let mut mandates = self.mandates.mandates_for(owner)?;
        mandates.sort_by(|left, right| {
            (left.target_completion_date, left.created_at, &left.id).cmp(&(
                right.target_completion_date,
                right.created_at,
                &right.id,
            ))
        });
        let active_mandates = mandates
            .iter()
            .filter(|mandate| ACTIVE_STATUSES.contains(&mandate.status.as_str()))
            .count();
        let high_priority_mandates = mandates
            .iter()
            .filter(|mandate| mandate.priority == HIGH_PRIORITY)
            .count();

        let mut shortlisted = BTreeSet::new();
        for mandate in &mandates {
            for entry in self.mandates.shortlist_for(&mandate.id)? {
                shortlisted.insert(entry.coach_id);
            }
        }
        let mut high_confidence_signals = 0;
        for coach_id in &shortlisted {
            high_confidence_signals += self
                .recruitment
                .coach_updates_for(coach_id)?
                .iter()
                .filter(|update| update.is_high_confidence())
                .count();
        }

        let mandates = mandates
            .into_iter()
            .map(|mandate| self.summarize(mandate))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DashboardOverview {
            roster,
            total_vacancies: vacancies.len(),
            open_vacancies,
            active_mandates,
            high_priority_mandates,
            high_confidence_signals,
            mandates,
        })
    }

    fn summarize(&self, mandate: Mandate) -> Result<MandateSummary, MandateServiceError> {
        let club_name = self
            .recruitment
            .fetch_club(&mandate.club_id)?
            .map(|club| club.name);
        Ok(MandateSummary {
            id: mandate.id,
            status: mandate.status,
            priority: mandate.priority,
            engagement_date: mandate.engagement_date,
            target_completion_date: mandate.target_completion_date,
            created_at: mandate.created_at,
            club_name,
        })
    }

    pub fn detail(
        &self,
        owner: &RecruiterId,
        mandate_id: &MandateId,
    ) -> Result<MandateDetail, MandateServiceError> {
        let mandate = self.owned_mandate(owner, mandate_id)?;
        let club = self.recruitment.fetch_club(&mandate.club_id)?;

        let mut entries = self.mandates.shortlist_for(&mandate.id)?;
        entries.sort_by(|left, right| {
            right
                .placement_probability
                .cmp(&left.placement_probability)
                .then_with(|| left.id.cmp(&right.id))
        });

        let mut shortlist = Vec::with_capacity(entries.len());
        for entry in entries {
            let coach = self.recruitment.fetch_coach(&entry.coach_id)?;
            shortlist.push(ShortlistView {
                id: entry.id,
                coach_id: entry.coach_id,
                placement_probability: entry.placement_probability,
                risk_rating: entry.risk_rating,
                status: entry.status,
                coach_name: coach.as_ref().map(|coach| coach.name.clone()),
                coach_current_club: coach.as_ref().and_then(|coach| coach.current_club.clone()),
                coach_nationality: coach.and_then(|coach| coach.nationality),
            });
        }

        let mut deliverables = self.mandates.deliverables_for(&mandate.id)?;
        deliverables.sort_by(|left, right| {
            (left.due_date, &left.id).cmp(&(right.due_date, &right.id))
        });

        Ok(MandateDetail {
            club_name: club.as_ref().map(|club| club.name.clone()),
            club_league: club.map(|club| club.league),
            mandate,
            shortlist,
            deliverables,
        })
    }

    pub fn add_to_shortlist(
        &self,
        owner: &RecruiterId,
        mandate_id: &MandateId,
        intake: ShortlistIntake,
    ) -> Result<ShortlistEntry, MandateServiceError> {
        let terms = shortlist_terms(intake)?;
        let mandate = self.owned_mandate(owner, mandate_id)?;
        if self.recruitment.fetch_coach(&terms.coach_id)?.is_none() {
            return Err(MandateServiceError::CoachNotFound);
        }
        self.insert_shortlist_entry(&mandate.id, terms)
    }

    pub fn add_deliverable(
        &self,
        owner: &RecruiterId,
        mandate_id: &MandateId,
        intake: DeliverableIntake,
    ) -> Result<Deliverable, MandateServiceError> {
        let terms = deliverable_terms(intake)?;
        let mandate = self.owned_mandate(owner, mandate_id)?;
        self.insert_deliverable(&mandate.id, terms)
    }

    /// Seed a sample mandate against the recruiter's oldest club.
    pub fn create_demo(
        &self,
        owner: &RecruiterId,
        today: NaiveDate,
    ) -> Result<Mandate, MandateServiceError> {
        if !self.allow_demo {
            return Err(MandateServiceError::DemoDisabled);
        }

        let club = self
            .recruitment
            .clubs_for(owner)?
            .into_iter()
            .min_by(|left, right| (left.created_at, &left.id).cmp(&(right.created_at, &right.id)))
            .ok_or(MandateServiceError::NoClubForDemo)?;

        let mandate = self.insert_mandate(
            owner,
            MandateTerms {
                club_id: club.id,
                status: "Active".to_string(),
                engagement_date: today,
                target_completion_date: today + Duration::days(DEMO_ENGAGEMENT_DAYS),
                priority: "High".to_string(),
                ownership_structure: "Confidential ownership group".to_string(),
                budget_band: "£2M to £4M annual package".to_string(),
                strategic_objective:
                    "Secure a head coach appointment for short term stability and long term growth"
                        .to_string(),
                board_risk_appetite: "Moderate".to_string(),
                succession_timeline: "Appointment required within 30 days".to_string(),
                key_stakeholders: vec![
                    "Chair".to_string(),
                    "Chief Executive".to_string(),
                    "Sporting Director".to_string(),
                ],
                confidentiality_level: "High".to_string(),
            },
        )?;

        self.insert_deliverable(
            &mandate.id,
            DeliverableTerms {
                item: "Initial candidate briefing".to_string(),
                due_date: today,
                status: "In Progress".to_string(),
            },
        )?;

        let first_coach = self
            .recruitment
            .coaches()?
            .into_iter()
            .min_by(|left, right| (&left.name, &left.id).cmp(&(&right.name, &right.id)));
        if let Some(coach) = first_coach {
            self.insert_shortlist_entry(
                &mandate.id,
                ShortlistTerms {
                    coach_id: coach.id,
                    placement_probability: 72,
                    risk_rating: "Medium".to_string(),
                    status: "Under Review".to_string(),
                },
            )?;
        }

        Ok(mandate)
    }

    fn owned_club(&self, owner: &RecruiterId, club_id: &ClubId) -> Result<(), MandateServiceError> {
        match self.recruitment.fetch_club(club_id)? {
            Some(club) if &club.owner == owner => Ok(()),
            _ => Err(MandateViolation::InvalidClub.into()),
        }
    }

    fn owned_mandate(
        &self,
        owner: &RecruiterId,
        mandate_id: &MandateId,
    ) -> Result<Mandate, MandateServiceError> {
        self.mandates
            .fetch_mandate(mandate_id)?
            .filter(|mandate| &mandate.owner == owner)
            .ok_or(MandateServiceError::MandateNotFound)
    }

    fn insert_mandate(
        &self,
        owner: &RecruiterId,
        terms: MandateTerms,
    ) -> Result<Mandate, MandateServiceError> {
        let id = MandateId(next_sequence_id("mnd", &MANDATE_SEQUENCE));
        let mandate = self
            .mandates
            .insert_mandate(terms.into_mandate(id, owner.clone(), Utc::now()))?;
        info!(
            mandate_id = %mandate.id.0,
            club_id = %mandate.club_id.0,
            priority = %mandate.priority,
            "mandate created"
        );
        Ok(mandate)
    }

    fn insert_shortlist_entry(
        &self,
        mandate_id: &MandateId,
        terms: ShortlistTerms,
    ) -> Result<ShortlistEntry, MandateServiceError> {
        let id = ShortlistEntryId(next_sequence_id("msl", &SHORTLIST_SEQUENCE));
        match self
            .mandates
            .insert_shortlist_entry(terms.into_entry(id, mandate_id.clone(), Utc::now()))
        {
            Ok(entry) => Ok(entry),
            Err(RepositoryError::Conflict) => Err(MandateServiceError::DuplicateShortlistEntry),
            Err(other) => Err(other.into()),
        }
    }

    fn insert_deliverable(
        &self,
        mandate_id: &MandateId,
        terms: DeliverableTerms,
    ) -> Result<Deliverable, MandateServiceError> {
        let id = DeliverableId(next_sequence_id("dlv", &DELIVERABLE_SEQUENCE));
        Ok(self
            .mandates
            .insert_deliverable(terms.into_deliverable(id, mandate_id.clone(), Utc::now()))?)
    }
}
