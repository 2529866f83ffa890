//! Mandates: a club's engagement with a shortlist of coaches and dated deliverables.

pub mod domain;
mod intake;
pub mod repository;
pub mod service;

pub use domain::{
    DashboardOverview, Deliverable, DeliverableId, DeliverableIntake, Mandate, MandateDetail, MandateId,
    MandateIntake, MandateSummary, ShortlistEntry, ShortlistEntryId, ShortlistIntake,
    ShortlistView,
};
pub use intake::{split_stakeholders, MandateViolation};
pub use repository::MandateRepository;
pub use service::{MandateService, MandateServiceError};
