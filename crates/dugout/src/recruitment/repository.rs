use super::domain::{
    Club, ClubId, Coach, CoachId, CoachUpdate, MatchRecord, RecruiterId, Vacancy, VacancyId,
};

/// Storage abstraction for clubs, the coach roster, vacancies, and computed matches.
///
/// Implementations may return records in any order; services apply the
/// presentation ordering. The exceptions are `matches_for` and
/// `coach_updates_for`, which must preserve insertion order.
pub trait RecruitmentRepository: Send + Sync {
    fn insert_club(&self, club: Club) -> Result<Club, RepositoryError>;
    fn fetch_club(&self, id: &ClubId) -> Result<Option<Club>, RepositoryError>;
    fn clubs_for(&self, owner: &RecruiterId) -> Result<Vec<Club>, RepositoryError>;

    fn insert_coach(&self, coach: Coach) -> Result<Coach, RepositoryError>;
    fn fetch_coach(&self, id: &CoachId) -> Result<Option<Coach>, RepositoryError>;
    fn coaches(&self) -> Result<Vec<Coach>, RepositoryError>;
    /// Replace a stored coach; `NotFound` when the id is unknown.
    fn update_coach(&self, coach: Coach) -> Result<Coach, RepositoryError>;

    fn insert_coach_update(&self, update: CoachUpdate) -> Result<CoachUpdate, RepositoryError>;
    fn coach_updates_for(&self, coach: &CoachId) -> Result<Vec<CoachUpdate>, RepositoryError>;

    fn insert_vacancy(&self, vacancy: Vacancy) -> Result<Vacancy, RepositoryError>;
    fn fetch_vacancy(&self, id: &VacancyId) -> Result<Option<Vacancy>, RepositoryError>;
    fn vacancies_for(&self, owner: &RecruiterId) -> Result<Vec<Vacancy>, RepositoryError>;

    fn insert_matches(&self, matches: Vec<MatchRecord>) -> Result<(), RepositoryError>;
    fn matches_for(&self, vacancy: &VacancyId) -> Result<Vec<MatchRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
