use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use serde_json::Value;

use crate::config::AppEnvironment;
use crate::recruitment::domain::{
    Club, ClubDraft, ClubId, Coach, CoachDraft, CoachId, CoachProfile, CoachUpdate, MatchRecord,
    RecruiterId, Vacancy, VacancyDraft, VacancyId, VacancyRequirements,
};
use crate::recruitment::mandates::{
    Deliverable, Mandate, MandateId, MandateIntake, MandateRepository, MandateService,
    ShortlistEntry,
};
use crate::recruitment::repository::{RecruitmentRepository, RepositoryError};
use crate::recruitment::{
    recruitment_router, InMemoryStore, RecruitmentService, RecruitmentState, RECRUITER_HEADER,
};

pub(super) fn owner() -> RecruiterId {
    RecruiterId("recruiter-alpha".to_string())
}

pub(super) fn rival() -> RecruiterId {
    RecruiterId("recruiter-beta".to_string())
}

pub(super) fn club_draft(name: &str) -> ClubDraft {
    ClubDraft {
        name: name.to_string(),
        league: "Premier League".to_string(),
        country: "England".to_string(),
        ownership_model: None,
    }
}

pub(super) fn requirements() -> VacancyRequirements {
    VacancyRequirements {
        role_type: "Head Coach".to_string(),
        objective: "Win trophies".to_string(),
        style_of_play: "Possession-based".to_string(),
        pressing_level: "High".to_string(),
        build_style: "Short passing".to_string(),
        budget_range: "£5m - £15m".to_string(),
        staff_budget: "£1m - £2m".to_string(),
        timeline: "End of season".to_string(),
        league_experience_required: true,
    }
}

pub(super) fn vacancy_draft(club_id: &ClubId) -> VacancyDraft {
    VacancyDraft {
        club_id: club_id.clone(),
        requirements: requirements(),
    }
}

/// Scores 94 overall against [`requirements`].
pub(super) fn elite_profile() -> CoachProfile {
    CoachProfile {
        preferred_style: "Possession-based".to_string(),
        pressing_intensity: "High".to_string(),
        build_preference: "Short passing".to_string(),
        wage_expectation: "£1m - £2m/yr".to_string(),
        staff_cost_estimate: "£1m - £2m".to_string(),
        leadership_style: "Demanding".to_string(),
        reputation_tier: "Elite".to_string(),
        league_experience: vec!["Premier League".to_string()],
        available_status: "Available".to_string(),
    }
}

/// Scores 68 overall against [`requirements`].
pub(super) fn tiki_taka_profile() -> CoachProfile {
    CoachProfile {
        preferred_style: "Tiki-taka".to_string(),
        pressing_intensity: "Medium".to_string(),
        build_preference: "Possession play".to_string(),
        wage_expectation: "£4m - £7m/yr".to_string(),
        staff_cost_estimate: "£5m - £10m".to_string(),
        leadership_style: "Motivator".to_string(),
        reputation_tier: "World-class".to_string(),
        league_experience: vec!["Serie A".to_string()],
        available_status: "Open to offers".to_string(),
    }
}

/// Scores 44 overall against [`requirements`].
pub(super) fn unknown_profile() -> CoachProfile {
    CoachProfile {
        preferred_style: "Tiki-taka-reverse".to_string(),
        pressing_intensity: "Extreme".to_string(),
        build_preference: "Route one".to_string(),
        wage_expectation: "Negotiable".to_string(),
        staff_cost_estimate: "Depends".to_string(),
        leadership_style: "Mysterious".to_string(),
        reputation_tier: "Legendary".to_string(),
        league_experience: Vec::new(),
        available_status: "On sabbatical".to_string(),
    }
}

pub(super) fn coach_draft(name: &str, profile: CoachProfile) -> CoachDraft {
    CoachDraft {
        name: name.to_string(),
        age: Some(48),
        nationality: Some("Italian".to_string()),
        current_role: "Head Coach".to_string(),
        current_club: Some(format!("{name} FC")),
        profile,
    }
}

pub(super) fn mandate_intake(club_id: &ClubId) -> MandateIntake {
    MandateIntake {
        club_id: club_id.0.clone(),
        status: "Active".to_string(),
        engagement_date: "2025-03-01".to_string(),
        target_completion_date: "2025-04-30".to_string(),
        priority: "High".to_string(),
        ownership_structure: "Family owned".to_string(),
        budget_band: "£2M to £4M annual package".to_string(),
        strategic_objective: "Promotion within two seasons".to_string(),
        board_risk_appetite: "Moderate".to_string(),
        succession_timeline: "Before pre-season".to_string(),
        key_stakeholders: "Chair, Sporting Director".to_string(),
        confidentiality_level: "High".to_string(),
    }
}

pub(super) type MemoryServices = (
    Arc<RecruitmentService<InMemoryStore>>,
    Arc<MandateService<InMemoryStore, InMemoryStore>>,
);

pub(super) fn build_services(environment: AppEnvironment) -> MemoryServices {
    let store = Arc::new(InMemoryStore::new());
    (
        Arc::new(RecruitmentService::new(store.clone())),
        Arc::new(MandateService::new(store.clone(), store, environment)),
    )
}

pub(super) fn build_router(environment: AppEnvironment) -> (Router, MemoryServices) {
    let (recruitment, mandates) = build_services(environment);
    let router = recruitment_router(RecruitmentState {
        recruitment: recruitment.clone(),
        mandates: mandates.clone(),
    });
    (router, (recruitment, mandates))
}

/// Store whose every operation fails as if the backend were down.
pub(super) struct UnavailableStore;

fn unavailable<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("store offline".to_string()))
}

impl RecruitmentRepository for UnavailableStore {
    fn insert_club(&self, _club: Club) -> Result<Club, RepositoryError> {
        unavailable()
    }

    fn fetch_club(&self, _id: &ClubId) -> Result<Option<Club>, RepositoryError> {
        unavailable()
    }

    fn clubs_for(&self, _owner: &RecruiterId) -> Result<Vec<Club>, RepositoryError> {
        unavailable()
    }

    fn insert_coach(&self, _coach: Coach) -> Result<Coach, RepositoryError> {
        unavailable()
    }

    fn fetch_coach(&self, _id: &CoachId) -> Result<Option<Coach>, RepositoryError> {
        unavailable()
    }

    fn coaches(&self) -> Result<Vec<Coach>, RepositoryError> {
        unavailable()
    }

    fn update_coach(&self, _coach: Coach) -> Result<Coach, RepositoryError> {
        unavailable()
    }

    fn insert_coach_update(&self, _update: CoachUpdate) -> Result<CoachUpdate, RepositoryError> {
        unavailable()
    }

    fn coach_updates_for(&self, _coach: &CoachId) -> Result<Vec<CoachUpdate>, RepositoryError> {
        unavailable()
    }

    fn insert_vacancy(&self, _vacancy: Vacancy) -> Result<Vacancy, RepositoryError> {
        unavailable()
    }

    fn fetch_vacancy(&self, _id: &VacancyId) -> Result<Option<Vacancy>, RepositoryError> {
        unavailable()
    }

    fn vacancies_for(&self, _owner: &RecruiterId) -> Result<Vec<Vacancy>, RepositoryError> {
        unavailable()
    }

    fn insert_matches(&self, _matches: Vec<MatchRecord>) -> Result<(), RepositoryError> {
        unavailable()
    }

    fn matches_for(&self, _vacancy: &VacancyId) -> Result<Vec<MatchRecord>, RepositoryError> {
        unavailable()
    }
}

/// In-memory store whose roster reads fail while every other operation works.
#[derive(Default)]
pub(super) struct RosterOutageStore {
    pub(super) inner: InMemoryStore,
}

impl RecruitmentRepository for RosterOutageStore {
    fn insert_club(&self, club: Club) -> Result<Club, RepositoryError> {
        self.inner.insert_club(club)
    }

    fn fetch_club(&self, id: &ClubId) -> Result<Option<Club>, RepositoryError> {
        self.inner.fetch_club(id)
    }

    fn clubs_for(&self, owner: &RecruiterId) -> Result<Vec<Club>, RepositoryError> {
        self.inner.clubs_for(owner)
    }

    fn insert_coach(&self, coach: Coach) -> Result<Coach, RepositoryError> {
        self.inner.insert_coach(coach)
    }

    fn fetch_coach(&self, id: &CoachId) -> Result<Option<Coach>, RepositoryError> {
        self.inner.fetch_coach(id)
    }

    fn coaches(&self) -> Result<Vec<Coach>, RepositoryError> {
        unavailable()
    }

    fn update_coach(&self, coach: Coach) -> Result<Coach, RepositoryError> {
        self.inner.update_coach(coach)
    }

    fn insert_coach_update(&self, update: CoachUpdate) -> Result<CoachUpdate, RepositoryError> {
        self.inner.insert_coach_update(update)
    }

    fn coach_updates_for(&self, coach: &CoachId) -> Result<Vec<CoachUpdate>, RepositoryError> {
        self.inner.coach_updates_for(coach)
    }

    fn insert_vacancy(&self, vacancy: Vacancy) -> Result<Vacancy, RepositoryError> {
        self.inner.insert_vacancy(vacancy)
    }

    fn fetch_vacancy(&self, id: &VacancyId) -> Result<Option<Vacancy>, RepositoryError> {
        self.inner.fetch_vacancy(id)
    }

    fn vacancies_for(&self, owner: &RecruiterId) -> Result<Vec<Vacancy>, RepositoryError> {
        self.inner.vacancies_for(owner)
    }

    fn insert_matches(&self, matches: Vec<MatchRecord>) -> Result<(), RepositoryError> {
        self.inner.insert_matches(matches)
    }

    fn matches_for(&self, vacancy: &VacancyId) -> Result<Vec<MatchRecord>, RepositoryError> {
        self.inner.matches_for(vacancy)
    }
}

impl MandateRepository for UnavailableStore {
    fn insert_mandate(&self, _mandate: Mandate) -> Result<Mandate, RepositoryError> {
        unavailable()
    }

    fn fetch_mandate(&self, _id: &MandateId) -> Result<Option<Mandate>, RepositoryError> {
        unavailable()
    }

    fn mandates_for(&self, _owner: &RecruiterId) -> Result<Vec<Mandate>, RepositoryError> {
        unavailable()
    }

    fn insert_shortlist_entry(
        &self,
        _entry: ShortlistEntry,
    ) -> Result<ShortlistEntry, RepositoryError> {
        unavailable()
    }

    fn shortlist_for(&self, _mandate: &MandateId) -> Result<Vec<ShortlistEntry>, RepositoryError> {
        unavailable()
    }

    fn insert_deliverable(&self, _deliverable: Deliverable) -> Result<Deliverable, RepositoryError> {
        unavailable()
    }

    fn deliverables_for(&self, _mandate: &MandateId) -> Result<Vec<Deliverable>, RepositoryError> {
        unavailable()
    }
}

pub(super) fn json_request(
    method: &str,
    uri: &str,
    recruiter: Option<&RecruiterId>,
    body: &Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(recruiter) = recruiter {
        builder = builder.header(RECRUITER_HEADER, recruiter.0.as_str());
    }
    builder
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("request builds")
}

pub(super) fn get_request(uri: &str, recruiter: Option<&RecruiterId>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(recruiter) = recruiter {
        builder = builder.header(RECRUITER_HEADER, recruiter.0.as_str());
    }
    builder.body(Body::empty()).expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
