use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{
    Club, ClubDraft, ClubId, Coach, CoachDossier, CoachDraft, CoachId, CoachPatch, CoachProfile,
    CoachQuery, CoachUpdate, CoachUpdateId, CoachUpdateIntake, MatchId, MatchRecord, RecruiterId,
    Vacancy, VacancyDraft, VacancyId, VacancyRequirements, DEFAULT_OWNERSHIP_MODEL,
    DEFAULT_ROLE_TYPE, DEFAULT_UPDATE_TYPE, OPEN_VACANCY_STATUS,
};
use super::matching::{rank_by_overall, MatchBreakdown, MatchScorer, MatchScores, ScoreBand};
use super::next_sequence_id;
use super::repository::{RecruitmentRepository, RepositoryError};

static CLUB_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static COACH_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static VACANCY_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static MATCH_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static COACH_UPDATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Validation failures for club, coach, and vacancy input.
#[derive(Debug, thiserror::Error)]
pub enum VacancyViolation {
    #[error("Please complete all required fields ({})", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Coach name is required")]
    MissingCoachName,
    #[error("Please select a valid club")]
    UnknownClub,
    #[error("Update note is required.")]
    MissingUpdateNote,
    #[error("Dates must use YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RecruitmentServiceError {
    #[error(transparent)]
    Violation(#[from] VacancyViolation),
    #[error("Vacancy not found")]
    VacancyNotFound,
    #[error("Coach not found")]
    CoachNotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// One scored coach in a vacancy shortlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedMatch {
    pub match_id: MatchId,
    pub coach_id: CoachId,
    pub coach_name: String,
    pub current_club: Option<String>,
    #[serde(flatten)]
    pub scores: MatchScores,
    pub band: ScoreBand,
}

/// Vacancy plus every roster coach ranked by overall score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacancyShortlist {
    pub vacancy: Vacancy,
    pub matches: Vec<RankedMatch>,
}

/// Clubs, the coach roster, and vacancy scoring over a [`RecruitmentRepository`].
pub struct RecruitmentService<R> {
    repository: Arc<R>,
    scorer: MatchScorer,
}

impl<R> RecruitmentService<R>
where
    R: RecruitmentRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            scorer: MatchScorer::new(),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn register_club(
        &self,
        owner: &RecruiterId,
        draft: ClubDraft,
    ) -> Result<Club, RecruitmentServiceError> {
        let mut missing = Vec::new();
        for (field, value) in [
            ("name", &draft.name),
            ("league", &draft.league),
            ("country", &draft.country),
        ] {
            if value.trim().is_empty() {
                missing.push(field);
            }
        }
        if !missing.is_empty() {
            return Err(VacancyViolation::MissingFields(missing).into());
        }

        let ownership_model = draft
            .ownership_model
            .map(|model| model.trim().to_string())
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| DEFAULT_OWNERSHIP_MODEL.to_string());

        let club = Club {
            id: ClubId(next_sequence_id("clb", &CLUB_SEQUENCE)),
            owner: owner.clone(),
            name: draft.name.trim().to_string(),
            league: draft.league.trim().to_string(),
            country: draft.country.trim().to_string(),
            ownership_model,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert_club(club)?;
        debug!(club_id = %stored.id.0, "club registered");
        Ok(stored)
    }

    /// Clubs owned by the recruiter, oldest first.
    pub fn clubs(&self, owner: &RecruiterId) -> Result<Vec<Club>, RecruitmentServiceError> {
        let mut clubs = self.repository.clubs_for(owner)?;
        clubs.sort_by(|left, right| {
            (left.created_at, &left.id).cmp(&(right.created_at, &right.id))
        });
        Ok(clubs)
    }

    pub fn add_coach(&self, draft: CoachDraft) -> Result<Coach, RecruitmentServiceError> {
        if draft.name.trim().is_empty() {
            return Err(VacancyViolation::MissingCoachName.into());
        }

        let coach = draft.into_coach(
            CoachId(next_sequence_id("cch", &COACH_SEQUENCE)),
            Utc::now(),
        );
        Ok(self.repository.insert_coach(coach)?)
    }

    /// Add every draft to the roster, stopping at the first invalid entry.
    pub fn import_roster(
        &self,
        drafts: Vec<CoachDraft>,
    ) -> Result<Vec<Coach>, RecruitmentServiceError> {
        let coaches = drafts
            .into_iter()
            .map(|draft| self.add_coach(draft))
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = coaches.len(), "coach roster imported");
        Ok(coaches)
    }

    /// The roster ordered by coach name.
    pub fn coaches(&self) -> Result<Vec<Coach>, RecruitmentServiceError> {
        let mut coaches = self.repository.coaches()?;
        coaches.sort_by(|left, right| (&left.name, &left.id).cmp(&(&right.name, &right.id)));
        Ok(coaches)
    }

    /// The roster in name order, narrowed by free-text search and availability status.
    pub fn search_coaches(&self, query: &CoachQuery) -> Result<Vec<Coach>, RecruitmentServiceError> {
        let mut coaches = self.coaches()?;
        coaches.retain(|coach| query.matches(coach));
        Ok(coaches)
    }

    pub fn coach(&self, coach_id: &CoachId) -> Result<Coach, RecruitmentServiceError> {
        self.repository
            .fetch_coach(coach_id)?
            .ok_or(RecruitmentServiceError::CoachNotFound)
    }

    /// Profile plus intelligence log.
    pub fn dossier(&self, coach_id: &CoachId) -> Result<CoachDossier, RecruitmentServiceError> {
        let coach = self.coach(coach_id)?;
        let updates = self.coach_updates(&coach.id)?;
        Ok(CoachDossier { coach, updates })
    }

    /// Apply a partial edit and stamp `last_updated`.
    pub fn edit_coach(
        &self,
        coach_id: &CoachId,
        patch: CoachPatch,
    ) -> Result<Coach, RecruitmentServiceError> {
        let current = self.coach(coach_id)?;
        let updated = self
            .repository
            .update_coach(patch.apply(current, Utc::now()))?;
        debug!(coach_id = %updated.id.0, "coach profile edited");
        Ok(updated)
    }

    pub fn log_coach_update(
        &self,
        coach_id: &CoachId,
        intake: CoachUpdateIntake,
    ) -> Result<CoachUpdate, RecruitmentServiceError> {
        let note = intake.update_note.trim();
        if note.is_empty() {
            return Err(VacancyViolation::MissingUpdateNote.into());
        }
        let occurred_at = occurred_at(&intake.occurred_at)?;
        let coach = self.coach(coach_id)?;

        let update = CoachUpdate {
            id: CoachUpdateId(next_sequence_id("cup", &COACH_UPDATE_SEQUENCE)),
            coach_id: coach.id,
            update_type: non_blank(&intake.update_type)
                .unwrap_or_else(|| DEFAULT_UPDATE_TYPE.to_string()),
            update_note: note.to_string(),
            confidence: non_blank(&intake.confidence),
            source_tier: non_blank(&intake.source_tier),
            source_note: non_blank(&intake.source_note),
            occurred_at,
        };
        let stored = self.repository.insert_coach_update(update)?;
        info!(
            coach_id = %stored.coach_id.0,
            update_type = %stored.update_type,
            "coach intelligence logged"
        );
        Ok(stored)
    }

    /// Intelligence log for one coach, most recent first.
    pub fn coach_updates(
        &self,
        coach_id: &CoachId,
    ) -> Result<Vec<CoachUpdate>, RecruitmentServiceError> {
        let mut updates = self.repository.coach_updates_for(coach_id)?;
        updates.sort_by(|left, right| right.occurred_at.cmp(&left.occurred_at));
        Ok(updates)
    }

    /// Create a vacancy, score it against the whole roster, and persist one match per coach.
    pub fn create_vacancy(
        &self,
        owner: &RecruiterId,
        draft: VacancyDraft,
    ) -> Result<VacancyShortlist, RecruitmentServiceError> {
        let requirements = normalize_requirements(draft.requirements)?;

        let club = self
            .repository
            .fetch_club(&draft.club_id)?
            .filter(|club| &club.owner == owner)
            .ok_or(VacancyViolation::UnknownClub)?;

        // Roster is read before any write.
        let coaches = self.coaches()?;

        let created_at = Utc::now();
        let vacancy = Vacancy {
            id: VacancyId(next_sequence_id("vac", &VACANCY_SEQUENCE)),
            club_id: club.id,
            owner: owner.clone(),
            requirements,
            status: OPEN_VACANCY_STATUS.to_string(),
            created_at,
        };

        let mut ranked = Vec::with_capacity(coaches.len());
        let mut records = Vec::with_capacity(coaches.len());
        for coach in &coaches {
            let scores = self.scorer.score(&vacancy.requirements, &coach.profile);
            let match_id = MatchId(next_sequence_id("mat", &MATCH_SEQUENCE));
            records.push(MatchRecord {
                id: match_id.clone(),
                vacancy_id: vacancy.id.clone(),
                coach_id: coach.id.clone(),
                scores,
                created_at,
            });
            ranked.push(ranked_match(match_id, coach, scores));
        }

        let vacancy = self.repository.insert_vacancy(vacancy)?;
        self.repository.insert_matches(records)?;

        rank_by_overall(&mut ranked, |entry| entry.scores.overall);

        info!(
            vacancy_id = %vacancy.id.0,
            coaches = ranked.len(),
            top_overall = ranked.first().map(|entry| entry.scores.overall),
            "vacancy scored against roster"
        );

        Ok(VacancyShortlist {
            vacancy,
            matches: ranked,
        })
    }

    /// Vacancies owned by the recruiter, newest first.
    pub fn vacancies(&self, owner: &RecruiterId) -> Result<Vec<Vacancy>, RecruitmentServiceError> {
        let mut vacancies = self.repository.vacancies_for(owner)?;
        vacancies.sort_by(|left, right| {
            (right.created_at, &right.id).cmp(&(left.created_at, &left.id))
        });
        Ok(vacancies)
    }

    /// Stored matches for a vacancy the recruiter owns, best overall first.
    pub fn shortlist(
        &self,
        owner: &RecruiterId,
        vacancy_id: &VacancyId,
    ) -> Result<VacancyShortlist, RecruitmentServiceError> {
        let vacancy = self
            .repository
            .fetch_vacancy(vacancy_id)?
            .filter(|vacancy| &vacancy.owner == owner)
            .ok_or(RecruitmentServiceError::VacancyNotFound)?;

        let coaches: HashMap<CoachId, Coach> = self
            .repository
            .coaches()?
            .into_iter()
            .map(|coach| (coach.id.clone(), coach))
            .collect();

        // Insertion order is roster name order, which breaks ties in the ranking.
        let records = self.repository.matches_for(&vacancy.id)?;

        let mut ranked: Vec<RankedMatch> = records
            .into_iter()
            .filter_map(|record| {
                coaches
                    .get(&record.coach_id)
                    .map(|coach| ranked_match(record.id, coach, record.scores))
            })
            .collect();
        rank_by_overall(&mut ranked, |entry| entry.scores.overall);

        Ok(VacancyShortlist {
            vacancy,
            matches: ranked,
        })
    }

    /// Score a single pair without persisting anything.
    pub fn preview(&self, vacancy: &VacancyRequirements, coach: &CoachProfile) -> MatchBreakdown {
        self.scorer.explain(vacancy, coach)
    }
}

fn ranked_match(match_id: MatchId, coach: &Coach, scores: MatchScores) -> RankedMatch {
    RankedMatch {
        match_id,
        coach_id: coach.id.clone(),
        coach_name: coach.name.clone(),
        current_club: coach.current_club.clone(),
        scores,
        band: scores.band(),
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// `YYYY-MM-DD` pins the note to midday UTC; blank means now.
fn occurred_at(raw: &str) -> Result<DateTime<Utc>, VacancyViolation> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Utc::now());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .map(|noon| Utc.from_utc_datetime(&noon))
        .ok_or_else(|| VacancyViolation::InvalidDate(raw.to_string()))
}

fn normalize_requirements(
    mut requirements: VacancyRequirements,
) -> Result<VacancyRequirements, VacancyViolation> {
    let mut missing = Vec::new();
    for (field, value) in [
        ("objective", &mut requirements.objective),
        ("style_of_play", &mut requirements.style_of_play),
        ("pressing_level", &mut requirements.pressing_level),
        ("build_style", &mut requirements.build_style),
        ("budget_range", &mut requirements.budget_range),
        ("staff_budget", &mut requirements.staff_budget),
        ("timeline", &mut requirements.timeline),
    ] {
        *value = value.trim().to_string();
        if value.is_empty() {
            missing.push(field);
        }
    }
    if !missing.is_empty() {
        return Err(VacancyViolation::MissingFields(missing));
    }

    let role_type = requirements.role_type.trim();
    requirements.role_type = if role_type.is_empty() {
        DEFAULT_ROLE_TYPE.to_string()
    } else {
        role_type.to_string()
    };

    Ok(requirements)
}
