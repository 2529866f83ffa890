use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::matching::MatchScores;

/// Opaque identity of the recruiter issuing a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecruiterId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClubId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoachId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VacancyId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoachUpdateId(pub String);

pub(crate) const DEFAULT_ROLE_TYPE: &str = "Head Coach";
pub(crate) const DEFAULT_OWNERSHIP_MODEL: &str = "Private";
pub(crate) const OPEN_VACANCY_STATUS: &str = "open";
pub(crate) const DEFAULT_UPDATE_TYPE: &str = "general";

fn default_role_type() -> String {
    DEFAULT_ROLE_TYPE.to_string()
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?))
}

/// What the recruiter asks for in an open role.
///
/// Categorical fields stay as free text: values outside the scorer's tables
/// are legal and simply receive neutral scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyRequirements {
    #[serde(default = "default_role_type")]
    pub role_type: String,
    pub objective: String,
    pub style_of_play: String,
    pub pressing_level: String,
    pub build_style: String,
    pub budget_range: String,
    pub staff_budget: String,
    pub timeline: String,
    #[serde(default)]
    pub league_experience_required: bool,
}

/// Tactical, financial, and availability attributes of a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachProfile {
    pub preferred_style: String,
    pub pressing_intensity: String,
    pub build_preference: String,
    pub wage_expectation: String,
    pub staff_cost_estimate: String,
    pub leadership_style: String,
    #[serde(default)]
    pub reputation_tier: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub league_experience: Vec<String>,
    #[serde(default)]
    pub available_status: String,
}

/// Ordered reputation scale; the position feeds squad and cultural fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReputationTier {
    Unknown,
    Emerging,
    Established,
    Elite,
    #[serde(rename = "World-class")]
    WorldClass,
}

impl ReputationTier {
    pub const ALL: [ReputationTier; 5] = [
        ReputationTier::Unknown,
        ReputationTier::Emerging,
        ReputationTier::Established,
        ReputationTier::Elite,
        ReputationTier::WorldClass,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReputationTier::Unknown => "Unknown",
            ReputationTier::Emerging => "Emerging",
            ReputationTier::Established => "Established",
            ReputationTier::Elite => "Elite",
            ReputationTier::WorldClass => "World-class",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.label() == value)
    }

    pub fn rank(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    Available,
    #[serde(rename = "Open to offers")]
    OpenToOffers,
    #[serde(rename = "Under contract - interested")]
    UnderContractInterested,
    #[serde(rename = "Under contract")]
    UnderContract,
    #[serde(rename = "Not available")]
    NotAvailable,
}

impl AvailabilityStatus {
    pub const ALL: [AvailabilityStatus; 5] = [
        AvailabilityStatus::Available,
        AvailabilityStatus::OpenToOffers,
        AvailabilityStatus::UnderContractInterested,
        AvailabilityStatus::UnderContract,
        AvailabilityStatus::NotAvailable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "Available",
            AvailabilityStatus::OpenToOffers => "Open to offers",
            AvailabilityStatus::UnderContractInterested => "Under contract - interested",
            AvailabilityStatus::UnderContract => "Under contract",
            AvailabilityStatus::NotAvailable => "Not available",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == value)
    }
}

/// A club managed by a recruiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub owner: RecruiterId,
    pub name: String,
    pub league: String,
    pub country: String,
    pub ownership_model: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubDraft {
    pub name: String,
    pub league: String,
    pub country: String,
    #[serde(default)]
    pub ownership_model: Option<String>,
}

/// Candidate on the shared roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coach {
    pub id: CoachId,
    pub name: String,
    pub age: Option<u8>,
    pub nationality: Option<String>,
    pub current_role: String,
    pub current_club: Option<String>,
    #[serde(flatten)]
    pub profile: CoachProfile,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachDraft {
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default = "default_role_type")]
    pub current_role: String,
    #[serde(default)]
    pub current_club: Option<String>,
    #[serde(flatten)]
    pub profile: CoachProfile,
}

impl CoachDraft {
    pub fn into_coach(self, id: CoachId, now: DateTime<Utc>) -> Coach {
        Coach {
            id,
            name: self.name.trim().to_string(),
            age: self.age,
            nationality: self.nationality,
            current_role: self.current_role,
            current_club: self.current_club,
            profile: self.profile,
            last_updated: now,
        }
    }
}

/// Partial edit of a coach profile. Omitted fields keep their current value;
/// only `age` and `nationality` can be cleared with an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoachPatch {
    pub name: Option<String>,
    #[serde(deserialize_with = "present")]
    pub age: Option<Option<u8>>,
    #[serde(deserialize_with = "present")]
    pub nationality: Option<Option<String>>,
    pub current_role: Option<String>,
    pub current_club: Option<String>,
    pub preferred_style: Option<String>,
    pub pressing_intensity: Option<String>,
    pub build_preference: Option<String>,
    pub leadership_style: Option<String>,
    pub wage_expectation: Option<String>,
    pub staff_cost_estimate: Option<String>,
    pub available_status: Option<String>,
    pub reputation_tier: Option<String>,
    pub league_experience: Option<Vec<String>>,
}

impl CoachPatch {
    pub fn apply(self, mut coach: Coach, now: DateTime<Utc>) -> Coach {
        if let Some(name) = self.name {
            let name = name.trim();
            if !name.is_empty() {
                coach.name = name.to_string();
            }
        }
        if let Some(age) = self.age {
            coach.age = age;
        }
        if let Some(nationality) = self.nationality {
            coach.nationality = nationality;
        }
        if let Some(role) = self.current_role {
            coach.current_role = role;
        }
        if let Some(club) = self.current_club {
            coach.current_club = Some(club);
        }

        let profile = &mut coach.profile;
        for (slot, value) in [
            (&mut profile.preferred_style, self.preferred_style),
            (&mut profile.pressing_intensity, self.pressing_intensity),
            (&mut profile.build_preference, self.build_preference),
            (&mut profile.leadership_style, self.leadership_style),
            (&mut profile.wage_expectation, self.wage_expectation),
            (&mut profile.staff_cost_estimate, self.staff_cost_estimate),
            (&mut profile.available_status, self.available_status),
            (&mut profile.reputation_tier, self.reputation_tier),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(leagues) = self.league_experience {
            profile.league_experience = leagues;
        }

        coach.last_updated = now;
        coach
    }
}

/// Roster listing filter. `status` of `all` or blank disables status filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoachQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl CoachQuery {
    pub fn matches(&self, coach: &Coach) -> bool {
        let status_ok = match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => true,
            Some(status) => coach.profile.available_status == status,
        };
        if !status_ok {
            return false;
        }

        let needle = match self.search.as_deref().map(str::trim) {
            None | Some("") => return true,
            Some(needle) => needle.to_lowercase(),
        };
        [
            Some(coach.name.as_str()),
            coach.current_club.as_deref(),
            Some(coach.profile.preferred_style.as_str()),
            coach.nationality.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Availability head-counts across the roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterCounts {
    pub total: usize,
    pub available: usize,
    pub open_to_offers: usize,
    /// Open to offers, or under contract but interested.
    pub interested: usize,
    /// Under contract, interested or not.
    pub under_contract: usize,
}

impl RosterCounts {
    pub fn tally(coaches: &[Coach]) -> Self {
        let mut counts = RosterCounts {
            total: coaches.len(),
            ..RosterCounts::default()
        };
        for coach in coaches {
            match AvailabilityStatus::from_label(&coach.profile.available_status) {
                Some(AvailabilityStatus::Available) => counts.available += 1,
                Some(AvailabilityStatus::OpenToOffers) => {
                    counts.open_to_offers += 1;
                    counts.interested += 1;
                }
                Some(AvailabilityStatus::UnderContractInterested) => {
                    counts.interested += 1;
                    counts.under_contract += 1;
                }
                Some(AvailabilityStatus::UnderContract) => counts.under_contract += 1,
                Some(AvailabilityStatus::NotAvailable) | None => {}
            }
        }
        counts
    }
}

/// Dated intelligence note logged against a coach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachUpdate {
    pub id: CoachUpdateId,
    pub coach_id: CoachId,
    pub update_type: String,
    pub update_note: String,
    pub confidence: Option<String>,
    pub source_tier: Option<String>,
    pub source_note: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl CoachUpdate {
    pub fn is_high_confidence(&self) -> bool {
        self.confidence
            .as_deref()
            .is_some_and(|confidence| confidence.eq_ignore_ascii_case("high"))
    }
}

/// Form payload for a new intelligence note. `occurred_at` is `YYYY-MM-DD`
/// or blank for "now".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachUpdateIntake {
    pub update_type: String,
    pub update_note: String,
    pub confidence: String,
    pub source_tier: String,
    pub source_note: String,
    pub occurred_at: String,
}

/// Coach profile with its intelligence log, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachDossier {
    #[serde(flatten)]
    pub coach: Coach,
    pub updates: Vec<CoachUpdate>,
}

/// Open role at a club, carrying the requirements coaches are scored against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: VacancyId,
    pub club_id: ClubId,
    pub owner: RecruiterId,
    #[serde(flatten)]
    pub requirements: VacancyRequirements,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyDraft {
    pub club_id: ClubId,
    #[serde(flatten)]
    pub requirements: VacancyRequirements,
}

/// Persisted score of one coach against one vacancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub vacancy_id: VacancyId,
    pub coach_id: CoachId,
    #[serde(flatten)]
    pub scores: MatchScores,
    pub created_at: DateTime<Utc>,
}
