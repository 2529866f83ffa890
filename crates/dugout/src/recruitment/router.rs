use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::{
    ClubDraft, CoachDraft, CoachId, CoachPatch, CoachProfile, CoachQuery, CoachUpdateIntake,
    RecruiterId, VacancyDraft, VacancyId, VacancyRequirements,
};
use super::mandates::{
    DeliverableIntake, MandateId, MandateIntake, MandateRepository, MandateService,
    MandateServiceError, ShortlistIntake,
};
use super::matching::{MatchBreakdown, ScoreBand};
use super::repository::{RecruitmentRepository, RepositoryError};
use super::service::{RecruitmentService, RecruitmentServiceError};

/// Header carrying the caller's recruiter identity.
pub const RECRUITER_HEADER: &str = "x-recruiter-id";

/// Shared handler state: both services over the same stores.
pub struct RecruitmentState<R, M> {
    pub recruitment: Arc<RecruitmentService<R>>,
    pub mandates: Arc<MandateService<R, M>>,
}

impl<R, M> Clone for RecruitmentState<R, M> {
    fn clone(&self) -> Self {
        Self {
            recruitment: Arc::clone(&self.recruitment),
            mandates: Arc::clone(&self.mandates),
        }
    }
}

/// Router exposing match scoring, clubs, the roster, vacancies, mandates, and the dashboard.
pub fn recruitment_router<R, M>(state: RecruitmentState<R, M>) -> Router
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    Router::new()
        .route("/api/v1/matches/score", post(score_handler::<R, M>))
        .route(
            "/api/v1/clubs",
            post(create_club_handler::<R, M>).get(list_clubs_handler::<R, M>),
        )
        .route(
            "/api/v1/coaches",
            post(create_coach_handler::<R, M>).get(list_coaches_handler::<R, M>),
        )
        .route(
            "/api/v1/coaches/:coach_id",
            get(coach_dossier_handler::<R, M>).patch(edit_coach_handler::<R, M>),
        )
        .route(
            "/api/v1/coaches/:coach_id/updates",
            post(log_coach_update_handler::<R, M>).get(list_coach_updates_handler::<R, M>),
        )
        .route("/api/v1/dashboard", get(dashboard_handler::<R, M>))
        .route(
            "/api/v1/vacancies",
            post(create_vacancy_handler::<R, M>).get(list_vacancies_handler::<R, M>),
        )
        .route(
            "/api/v1/vacancies/:vacancy_id/matches",
            get(vacancy_matches_handler::<R, M>),
        )
        .route(
            "/api/v1/mandates",
            post(create_mandate_handler::<R, M>).get(list_mandates_handler::<R, M>),
        )
        .route("/api/v1/mandates/demo", post(demo_mandate_handler::<R, M>))
        .route(
            "/api/v1/mandates/:mandate_id",
            get(mandate_detail_handler::<R, M>),
        )
        .route(
            "/api/v1/mandates/:mandate_id/shortlist",
            post(add_shortlist_handler::<R, M>),
        )
        .route(
            "/api/v1/mandates/:mandate_id/deliverables",
            post(add_deliverable_handler::<R, M>),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub vacancy: VacancyRequirements,
    pub coach: CoachProfile,
}

#[derive(Debug, Serialize)]
struct ScorePreview {
    #[serde(flatten)]
    breakdown: MatchBreakdown,
    band: ScoreBand,
}

pub(crate) async fn score_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    Json(request): Json<ScoreRequest>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let breakdown = state.recruitment.preview(&request.vacancy, &request.coach);
    let preview = ScorePreview {
        band: breakdown.scores.band(),
        breakdown,
    };
    (StatusCode::OK, Json(preview)).into_response()
}

pub(crate) async fn create_club_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    headers: HeaderMap,
    Json(draft): Json<ClubDraft>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let owner = match recruiter_from(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };
    match state.recruitment.register_club(&owner, draft) {
        Ok(club) => (StatusCode::CREATED, Json(club)).into_response(),
        Err(error) => recruitment_error_response(error),
    }
}

pub(crate) async fn list_clubs_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    headers: HeaderMap,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let owner = match recruiter_from(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };
    match state.recruitment.clubs(&owner) {
        Ok(clubs) => (StatusCode::OK, Json(clubs)).into_response(),
        Err(error) => recruitment_error_response(error),
    }
}

pub(crate) async fn create_coach_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    Json(draft): Json<CoachDraft>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    match state.recruitment.add_coach(draft) {
        Ok(coach) => (StatusCode::CREATED, Json(coach)).into_response(),
        Err(error) => recruitment_error_response(error),
    }
}

pub(crate) async fn list_coaches_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    Query(query): Query<CoachQuery>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    match state.recruitment.search_coaches(&query) {
        Ok(coaches) => (StatusCode::OK, Json(coaches)).into_response(),
        Err(error) => recruitment_error_response(error),
    }
}

pub(crate) async fn coach_dossier_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    Path(coach_id): Path<String>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    match state.recruitment.dossier(&CoachId(coach_id)) {
        Ok(dossier) => (StatusCode::OK, Json(dossier)).into_response(),
        Err(error) => recruitment_error_response(error),
    }
}

pub(crate) async fn edit_coach_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    Path(coach_id): Path<String>,
    Json(patch): Json<CoachPatch>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    match state.recruitment.edit_coach(&CoachId(coach_id), patch) {
        Ok(coach) => (StatusCode::OK, Json(coach)).into_response(),
        Err(error) => recruitment_error_response(error),
    }
}

pub(crate) async fn log_coach_update_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    Path(coach_id): Path<String>,
    Json(intake): Json<CoachUpdateIntake>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    match state.recruitment.log_coach_update(&CoachId(coach_id), intake) {
        Ok(update) => (StatusCode::CREATED, Json(update)).into_response(),
        Err(error) => recruitment_error_response(error),
    }
}

pub(crate) async fn list_coach_updates_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    Path(coach_id): Path<String>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let coach_id = CoachId(coach_id);
    let updates = state
        .recruitment
        .coach(&coach_id)
        .and_then(|coach| state.recruitment.coach_updates(&coach.id));
    match updates {
        Ok(updates) => (StatusCode::OK, Json(updates)).into_response(),
        Err(error) => recruitment_error_response(error),
    }
}

pub(crate) async fn dashboard_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    headers: HeaderMap,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let owner = match recruiter_from(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };
    match state.mandates.overview(&owner) {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(error) => mandate_error_response(error),
    }
}

pub(crate) async fn create_vacancy_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    headers: HeaderMap,
    Json(draft): Json<VacancyDraft>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let owner = match recruiter_from(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };
    match state.recruitment.create_vacancy(&owner, draft) {
        Ok(shortlist) => (StatusCode::CREATED, Json(shortlist)).into_response(),
        Err(error) => recruitment_error_response(error),
    }
}

pub(crate) async fn list_vacancies_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    headers: HeaderMap,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let owner = match recruiter_from(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };
    match state.recruitment.vacancies(&owner) {
        Ok(vacancies) => (StatusCode::OK, Json(vacancies)).into_response(),
        Err(error) => recruitment_error_response(error),
    }
}

pub(crate) async fn vacancy_matches_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    headers: HeaderMap,
    Path(vacancy_id): Path<String>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let owner = match recruiter_from(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };
    match state.recruitment.shortlist(&owner, &VacancyId(vacancy_id)) {
        Ok(shortlist) => (StatusCode::OK, Json(shortlist)).into_response(),
        Err(error) => recruitment_error_response(error),
    }
}

pub(crate) async fn create_mandate_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    headers: HeaderMap,
    Json(intake): Json<MandateIntake>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let owner = match recruiter_from(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };
    match state.mandates.create(&owner, intake) {
        Ok(mandate) => (StatusCode::CREATED, Json(mandate)).into_response(),
        Err(error) => mandate_error_response(error),
    }
}

pub(crate) async fn list_mandates_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    headers: HeaderMap,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let owner = match recruiter_from(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };
    match state.mandates.list(&owner) {
        Ok(mandates) => (StatusCode::OK, Json(mandates)).into_response(),
        Err(error) => mandate_error_response(error),
    }
}

pub(crate) async fn mandate_detail_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    headers: HeaderMap,
    Path(mandate_id): Path<String>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let owner = match recruiter_from(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };
    match state.mandates.detail(&owner, &MandateId(mandate_id)) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(error) => mandate_error_response(error),
    }
}

pub(crate) async fn add_shortlist_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    headers: HeaderMap,
    Path(mandate_id): Path<String>,
    Json(intake): Json<ShortlistIntake>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let owner = match recruiter_from(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };
    match state
        .mandates
        .add_to_shortlist(&owner, &MandateId(mandate_id), intake)
    {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(error) => mandate_error_response(error),
    }
}

pub(crate) async fn add_deliverable_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    headers: HeaderMap,
    Path(mandate_id): Path<String>,
    Json(intake): Json<DeliverableIntake>,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let owner = match recruiter_from(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };
    match state
        .mandates
        .add_deliverable(&owner, &MandateId(mandate_id), intake)
    {
        Ok(deliverable) => (StatusCode::CREATED, Json(deliverable)).into_response(),
        Err(error) => mandate_error_response(error),
    }
}

pub(crate) async fn demo_mandate_handler<R, M>(
    State(state): State<RecruitmentState<R, M>>,
    headers: HeaderMap,
) -> Response
where
    R: RecruitmentRepository + 'static,
    M: MandateRepository + 'static,
{
    let owner = match recruiter_from(&headers) {
        Ok(owner) => owner,
        Err(response) => return response,
    };
    let created = state
        .mandates
        .create_demo(&owner, Utc::now().date_naive())
        .and_then(|mandate| state.mandates.detail(&owner, &mandate.id));
    match created {
        Ok(detail) => (StatusCode::CREATED, Json(detail)).into_response(),
        Err(error) => mandate_error_response(error),
    }
}

fn recruiter_from(headers: &HeaderMap) -> Result<RecruiterId, Response> {
    headers
        .get(RECRUITER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| RecruiterId(value.to_string()))
        .ok_or_else(|| {
            error_response(
                StatusCode::UNAUTHORIZED,
                format!("missing {RECRUITER_HEADER} header"),
            )
        })
}

fn recruitment_error_response(error: RecruitmentServiceError) -> Response {
    let status = match &error {
        RecruitmentServiceError::Violation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecruitmentServiceError::VacancyNotFound | RecruitmentServiceError::CoachNotFound => {
            StatusCode::NOT_FOUND
        }
        RecruitmentServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        RecruitmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RecruitmentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            warn!(error = %error, "recruitment storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, error.to_string())
}

fn mandate_error_response(error: MandateServiceError) -> Response {
    let status = match &error {
        MandateServiceError::Violation(_) | MandateServiceError::NoClubForDemo => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        MandateServiceError::MandateNotFound | MandateServiceError::CoachNotFound => {
            StatusCode::NOT_FOUND
        }
        MandateServiceError::DuplicateShortlistEntry => StatusCode::CONFLICT,
        MandateServiceError::DemoDisabled => StatusCode::FORBIDDEN,
        MandateServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        MandateServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        MandateServiceError::Repository(RepositoryError::Unavailable(_)) => {
            warn!(error = %error, "mandate storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, error.to_string())
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
