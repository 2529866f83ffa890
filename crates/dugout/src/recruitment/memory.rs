use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::domain::{
    Club, ClubId, Coach, CoachId, CoachUpdate, MatchRecord, RecruiterId, Vacancy, VacancyId,
};
use super::mandates::domain::{
    Deliverable, Mandate, MandateId, ShortlistEntry,
};
use super::mandates::MandateRepository;
use super::repository::{RecruitmentRepository, RepositoryError};

#[derive(Default)]
struct StoreState {
    clubs: HashMap<ClubId, Club>,
    coaches: HashMap<CoachId, Coach>,
    coach_updates: Vec<CoachUpdate>,
    vacancies: HashMap<VacancyId, Vacancy>,
    matches: Vec<MatchRecord>,
    mandates: HashMap<MandateId, Mandate>,
    shortlist: Vec<ShortlistEntry>,
    deliverables: Vec<Deliverable>,
}

/// Process-local store backing both the recruitment and mandate repositories.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl RecruitmentRepository for InMemoryStore {
    fn insert_club(&self, club: Club) -> Result<Club, RepositoryError> {
        let mut state = self.state()?;
        if state.clubs.contains_key(&club.id) {
            return Err(RepositoryError::Conflict);
        }
        state.clubs.insert(club.id.clone(), club.clone());
        Ok(club)
    }

    fn fetch_club(&self, id: &ClubId) -> Result<Option<Club>, RepositoryError> {
        Ok(self.state()?.clubs.get(id).cloned())
    }

    fn clubs_for(&self, owner: &RecruiterId) -> Result<Vec<Club>, RepositoryError> {
        Ok(self
            .state()?
            .clubs
            .values()
            .filter(|club| &club.owner == owner)
            .cloned()
            .collect())
    }

    fn insert_coach(&self, coach: Coach) -> Result<Coach, RepositoryError> {
        let mut state = self.state()?;
        if state.coaches.contains_key(&coach.id) {
            return Err(RepositoryError::Conflict);
        }
        state.coaches.insert(coach.id.clone(), coach.clone());
        Ok(coach)
    }

    fn fetch_coach(&self, id: &CoachId) -> Result<Option<Coach>, RepositoryError> {
        Ok(self.state()?.coaches.get(id).cloned())
    }

    fn coaches(&self) -> Result<Vec<Coach>, RepositoryError> {
        Ok(self.state()?.coaches.values().cloned().collect())
    }

    fn update_coach(&self, coach: Coach) -> Result<Coach, RepositoryError> {
        let mut state = self.state()?;
        let slot = state
            .coaches
            .get_mut(&coach.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = coach.clone();
        Ok(coach)
    }

    fn insert_coach_update(&self, update: CoachUpdate) -> Result<CoachUpdate, RepositoryError> {
        self.state()?.coach_updates.push(update.clone());
        Ok(update)
    }

    fn coach_updates_for(&self, coach: &CoachId) -> Result<Vec<CoachUpdate>, RepositoryError> {
        Ok(self
            .state()?
            .coach_updates
            .iter()
            .filter(|update| &update.coach_id == coach)
            .cloned()
            .collect())
    }

    fn insert_vacancy(&self, vacancy: Vacancy) -> Result<Vacancy, RepositoryError> {
        let mut state = self.state()?;
        if state.vacancies.contains_key(&vacancy.id) {
            return Err(RepositoryError::Conflict);
        }
        state.vacancies.insert(vacancy.id.clone(), vacancy.clone());
        Ok(vacancy)
    }

    fn fetch_vacancy(&self, id: &VacancyId) -> Result<Option<Vacancy>, RepositoryError> {
        Ok(self.state()?.vacancies.get(id).cloned())
    }

    fn vacancies_for(&self, owner: &RecruiterId) -> Result<Vec<Vacancy>, RepositoryError> {
        Ok(self
            .state()?
            .vacancies
            .values()
            .filter(|vacancy| &vacancy.owner == owner)
            .cloned()
            .collect())
    }

    fn insert_matches(&self, matches: Vec<MatchRecord>) -> Result<(), RepositoryError> {
        self.state()?.matches.extend(matches);
        Ok(())
    }

    fn matches_for(&self, vacancy: &VacancyId) -> Result<Vec<MatchRecord>, RepositoryError> {
        Ok(self
            .state()?
            .matches
            .iter()
            .filter(|record| &record.vacancy_id == vacancy)
            .cloned()
            .collect())
    }
}

impl MandateRepository for InMemoryStore {
    fn insert_mandate(&self, mandate: Mandate) -> Result<Mandate, RepositoryError> {
        let mut state = self.state()?;
        if state.mandates.contains_key(&mandate.id) {
            return Err(RepositoryError::Conflict);
        }
        state.mandates.insert(mandate.id.clone(), mandate.clone());
        Ok(mandate)
    }

    fn fetch_mandate(&self, id: &MandateId) -> Result<Option<Mandate>, RepositoryError> {
        Ok(self.state()?.mandates.get(id).cloned())
    }

    fn mandates_for(&self, owner: &RecruiterId) -> Result<Vec<Mandate>, RepositoryError> {
        Ok(self
            .state()?
            .mandates
            .values()
            .filter(|mandate| &mandate.owner == owner)
            .cloned()
            .collect())
    }

    fn insert_shortlist_entry(
        &self,
        entry: ShortlistEntry,
    ) -> Result<ShortlistEntry, RepositoryError> {
        let mut state = self.state()?;
        let duplicate = state.shortlist.iter().any(|existing| {
            existing.mandate_id == entry.mandate_id && existing.coach_id == entry.coach_id
        });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        state.shortlist.push(entry.clone());
        Ok(entry)
    }

    fn shortlist_for(&self, mandate: &MandateId) -> Result<Vec<ShortlistEntry>, RepositoryError> {
        Ok(self
            .state()?
            .shortlist
            .iter()
            .filter(|entry| &entry.mandate_id == mandate)
            .cloned()
            .collect())
    }

    fn insert_deliverable(&self, deliverable: Deliverable) -> Result<Deliverable, RepositoryError> {
        self.state()?.deliverables.push(deliverable.clone());
        Ok(deliverable)
    }

    fn deliverables_for(&self, mandate: &MandateId) -> Result<Vec<Deliverable>, RepositoryError> {
        Ok(self
            .state()?
            .deliverables
            .iter()
            .filter(|deliverable| &deliverable.mandate_id == mandate)
            .cloned()
            .collect())
    }
}
