//! Coach-to-vacancy match scoring.
//!
//! Scoring is a pure function over two records and the constant tables in
//! [`tables`]. Unknown category strings never fail: each lookup falls back to
//! a fixed neutral score so new styles or bands can be scored immediately.

mod rules;
mod tables;


use serde::{Deserialize, Serialize};

use super::domain::{CoachProfile, VacancyRequirements};

/// Weights applied to the five sub-scores when computing the overall score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub tactical: f64,
    pub squad: f64,
    pub financial: f64,
    pub cultural: f64,
    pub availability: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.tactical + self.squad + self.financial + self.cultural + self.availability
    }
}

pub const OVERALL_WEIGHTS: ScoreWeights = ScoreWeights {
    tactical: 0.30,
    squad: 0.20,
    financial: 0.20,
    cultural: 0.20,
    availability: 0.10,
};

/// Sub-scores and the weighted overall score, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScores {
    pub tactical_fit: u8,
    pub squad_fit: u8,
    pub financial_fit: u8,
    pub cultural_fit: u8,
    pub availability: u8,
    pub overall: u8,
}

impl MatchScores {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.overall)
    }
}

/// Intermediate component values behind a [`MatchScores`] result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchBreakdown {
    pub scores: MatchScores,
    pub style: u8,
    pub pressing: u8,
    pub build: u8,
    pub wage_fit: f64,
    pub staff_fit: f64,
    pub leadership: u8,
    pub reputation: u8,
}

/// Coarse presentation band for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Good,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Strong,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Moderate,
            _ => ScoreBand::Weak,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Strong => "strong",
            ScoreBand::Good => "good",
            ScoreBand::Moderate => "moderate",
            ScoreBand::Weak => "weak",
        }
    }
}

/// Stateless scorer shared by the vacancy service and the HTTP preview endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchScorer;

impl MatchScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, vacancy: &VacancyRequirements, coach: &CoachProfile) -> MatchScores {
        rules::score_pair(vacancy, coach).scores
    }

    pub fn explain(&self, vacancy: &VacancyRequirements, coach: &CoachProfile) -> MatchBreakdown {
        rules::score_pair(vacancy, coach)
    }
}

pub fn calculate_match_scores(
    vacancy: &VacancyRequirements,
    coach: &CoachProfile,
) -> MatchScores {
    MatchScorer.score(vacancy, coach)
}

/// Sort best overall score first; equal scores keep their input order.
pub fn rank_by_overall<T, F>(items: &mut [T], overall: F)
where
    F: Fn(&T) -> u8,
{
    items.sort_by(|left, right| overall(right).cmp(&overall(left)));
}
