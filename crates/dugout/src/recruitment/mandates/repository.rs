use super::super::domain::RecruiterId;
use super::super::repository::RepositoryError;
use super::domain::{Deliverable, Mandate, MandateId, ShortlistEntry};

/// Storage for mandates and their shortlist and deliverable children.
pub trait MandateRepository: Send + Sync {
    fn insert_mandate(&self, mandate: Mandate) -> Result<Mandate, RepositoryError>;
    fn fetch_mandate(&self, id: &MandateId) -> Result<Option<Mandate>, RepositoryError>;
    fn mandates_for(&self, owner: &RecruiterId) -> Result<Vec<Mandate>, RepositoryError>;

    /// Fails with [`RepositoryError::Conflict`] when the coach is already on the mandate.
    fn insert_shortlist_entry(
        &self,
        entry: ShortlistEntry,
    ) -> Result<ShortlistEntry, RepositoryError>;
    fn shortlist_for(&self, mandate: &MandateId) -> Result<Vec<ShortlistEntry>, RepositoryError>;

    fn insert_deliverable(&self, deliverable: Deliverable) -> Result<Deliverable, RepositoryError>;
    fn deliverables_for(&self, mandate: &MandateId) -> Result<Vec<Deliverable>, RepositoryError>;
}
