use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::info;

use super::domain::{CoachDraft, CoachProfile, DEFAULT_ROLE_TYPE};

const LEAGUE_SEPARATOR: char = '|';

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to open roster file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed roster csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster line {line} has no coach name")]
    MissingName { line: usize },
    #[error("roster line {line} has an invalid age '{value}'")]
    InvalidAge { line: usize, value: String },
}

/// Reads coach roster CSV exports into [`CoachDraft`] values.
pub struct CoachRosterImporter;

impl CoachRosterImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<CoachDraft>, RosterImportError> {
        let path = path.as_ref();
        let drafts = Self::from_reader(File::open(path)?)?;
        info!(path = %path.display(), coaches = drafts.len(), "roster csv loaded");
        Ok(drafts)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CoachDraft>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut drafts = Vec::new();
        for (index, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
            // header occupies line 1
            drafts.push(row?.into_draft(index + 2)?);
        }
        Ok(drafts)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    nationality: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    current_role: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    current_club: Option<String>,
    #[serde(default)]
    preferred_style: String,
    #[serde(default)]
    pressing_intensity: String,
    #[serde(default)]
    build_preference: String,
    #[serde(default)]
    leadership_style: String,
    #[serde(default)]
    wage_expectation: String,
    #[serde(default)]
    staff_cost_estimate: String,
    #[serde(default)]
    available_status: String,
    #[serde(default)]
    reputation_tier: String,
    #[serde(default)]
    league_experience: String,
}

impl RosterRow {
    fn into_draft(self, line: usize) -> Result<CoachDraft, RosterImportError> {
        let name = self.name.ok_or(RosterImportError::MissingName { line })?;
        let age = match self.age {
            Some(value) => Some(
                value
                    .parse::<u8>()
                    .map_err(|_| RosterImportError::InvalidAge { line, value })?,
            ),
            None => None,
        };

        Ok(CoachDraft {
            name,
            age,
            nationality: self.nationality,
            current_role: self
                .current_role
                .unwrap_or_else(|| DEFAULT_ROLE_TYPE.to_string()),
            current_club: self.current_club,
            profile: CoachProfile {
                preferred_style: self.preferred_style,
                pressing_intensity: self.pressing_intensity,
                build_preference: self.build_preference,
                wage_expectation: self.wage_expectation,
                staff_cost_estimate: self.staff_cost_estimate,
                leadership_style: self.leadership_style,
                reputation_tier: self.reputation_tier,
                league_experience: self
                    .league_experience
                    .split(LEAGUE_SEPARATOR)
                    .map(str::trim)
                    .filter(|league| !league.is_empty())
                    .map(str::to_string)
                    .collect(),
                available_status: self.available_status,
            },
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
