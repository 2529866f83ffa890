//! Club, coach roster, vacancy matching, and mandate tracking.

pub mod domain;
pub mod mandates;
pub mod matching;
pub mod memory;
pub mod repository;
pub mod roster;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

use std::sync::atomic::{AtomicU64, Ordering};

pub use domain::{
    AvailabilityStatus, Club, ClubDraft, ClubId, Coach, CoachDossier, CoachDraft, CoachId,
    CoachPatch, CoachProfile, CoachQuery, CoachUpdate, CoachUpdateId, CoachUpdateIntake, MatchId,
    MatchRecord, RecruiterId, ReputationTier, RosterCounts, Vacancy, VacancyDraft, VacancyId,
    VacancyRequirements,
};
pub use mandates::{
    DashboardOverview, MandateRepository, MandateService, MandateServiceError, MandateViolation,
};
pub use matching::{
    calculate_match_scores, rank_by_overall, MatchBreakdown, MatchScorer, MatchScores, ScoreBand,
};
pub use memory::InMemoryStore;
pub use repository::{RecruitmentRepository, RepositoryError};
pub use roster::{CoachRosterImporter, RosterImportError};
pub use router::{recruitment_router, RecruitmentState, RECRUITER_HEADER};
pub use service::{
    RankedMatch, RecruitmentService, RecruitmentServiceError, VacancyShortlist, VacancyViolation,
};

/// Allocate the next `{prefix}-{nnnnnn}` identifier from a process-wide counter.
pub(crate) fn next_sequence_id(prefix: &str, sequence: &AtomicU64) -> String {
    let id = sequence.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}
