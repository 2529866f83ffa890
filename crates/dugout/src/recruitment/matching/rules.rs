use super::super::domain::{AvailabilityStatus, CoachProfile, ReputationTier, VacancyRequirements};
use super::tables::{
    band_index, compatible_with, position, BUDGET_RANGES, BUILD_COMPATIBILITY,
    LEADERSHIP_COMPATIBILITY, PRESSING_LEVELS, STAFF_BUDGET_RANGES, STYLE_COMPATIBILITY,
    WAGE_RANGES,
};
use super::{MatchBreakdown, MatchScores, OVERALL_WEIGHTS};

/// Round to the nearest integer with ties going up (`2.5 -> 3`).
pub(crate) fn round_half_up(value: f64) -> u8 {
    (value + 0.5).floor().clamp(0.0, 100.0) as u8
}

pub(crate) fn style_score(vacancy_style: &str, coach_style: &str) -> u8 {
    if vacancy_style == coach_style {
        return 100;
    }

    match position(
        compatible_with(STYLE_COMPATIBILITY, vacancy_style),
        coach_style,
    ) {
        Some(index) => 90_i32.saturating_sub(index as i32 * 20).max(40) as u8,
        None => 25,
    }
}

pub(crate) fn pressing_score(vacancy_level: &str, coach_intensity: &str) -> u8 {
    match (
        position(PRESSING_LEVELS, vacancy_level),
        position(PRESSING_LEVELS, coach_intensity),
    ) {
        (Some(vacancy), Some(coach)) => {
            let diff = vacancy.abs_diff(coach) as i32;
            (100 - diff * 25).max(10) as u8
        }
        _ => 50,
    }
}

pub(crate) fn build_score(vacancy_build: &str, coach_build: &str) -> u8 {
    if vacancy_build == coach_build {
        return 100;
    }

    match position(
        compatible_with(BUILD_COMPATIBILITY, vacancy_build),
        coach_build,
    ) {
        Some(index) => 85_i32.saturating_sub(index as i32 * 15).max(40) as u8,
        None => 20,
    }
}

/// Squad fit: experience base plus six points per reputation tier.
///
/// An unrecognised tier counts as position -1 and costs six points.
pub(crate) fn squad_fit(vacancy: &VacancyRequirements, coach: &CoachProfile) -> u8 {
    let base: i32 = if !vacancy.league_experience_required {
        70
    } else if !coach.league_experience.is_empty() {
        75
    } else {
        50
    };

    let tier_position = ReputationTier::from_label(&coach.reputation_tier)
        .map(|tier| tier.rank() as i32)
        .unwrap_or(-1);

    (base + tier_position * 6).clamp(0, 100) as u8
}

pub(crate) struct FinancialSignals {
    pub wage_fit: f64,
    pub staff_fit: f64,
    pub score: u8,
}

pub(crate) fn financial_fit(
    vacancy: &VacancyRequirements,
    coach: &CoachProfile,
) -> FinancialSignals {
    let budget = band_index(&vacancy.budget_range, BUDGET_RANGES);
    let wage = band_index(&coach.wage_expectation, WAGE_RANGES);

    let normalized_budget = budget as f64 / (BUDGET_RANGES.len() - 1) as f64;
    let normalized_wage = wage as f64 / (WAGE_RANGES.len() - 1) as f64;

    let wage_fit = if normalized_wage <= normalized_budget {
        100.0
    } else {
        (100.0 - (normalized_wage - normalized_budget) * 200.0).max(0.0)
    };

    let staff_budget = band_index(&vacancy.staff_budget, STAFF_BUDGET_RANGES);
    let staff_cost = band_index(&coach.staff_cost_estimate, STAFF_BUDGET_RANGES);

    let staff_fit = if staff_cost <= staff_budget {
        100.0
    } else {
        (100.0 - (staff_cost - staff_budget) as f64 * 30.0).max(0.0)
    };

    FinancialSignals {
        wage_fit,
        staff_fit,
        score: round_half_up(wage_fit * 0.6 + staff_fit * 0.4),
    }
}

pub(crate) fn leadership_score(objective: &str, leadership_style: &str) -> u8 {
    match position(
        compatible_with(LEADERSHIP_COMPATIBILITY, objective),
        leadership_style,
    ) {
        Some(index) => (100 - index as i32 * 15).max(50) as u8,
        None => 40,
    }
}

pub(crate) fn reputation_score(reputation_tier: &str) -> u8 {
    ReputationTier::from_label(reputation_tier)
        .map(|tier| 20 + tier.rank() * 20)
        .unwrap_or(50)
}

pub(crate) fn availability_score(status: &str) -> u8 {
    match AvailabilityStatus::from_label(status) {
        Some(AvailabilityStatus::Available) => 100,
        Some(AvailabilityStatus::OpenToOffers) => 80,
        Some(AvailabilityStatus::UnderContractInterested) => 55,
        Some(AvailabilityStatus::UnderContract) => 30,
        Some(AvailabilityStatus::NotAvailable) => 5,
        None => 50,
    }
}

pub(crate) fn score_pair(vacancy: &VacancyRequirements, coach: &CoachProfile) -> MatchBreakdown {
    let style = style_score(&vacancy.style_of_play, &coach.preferred_style);
    let pressing = pressing_score(&vacancy.pressing_level, &coach.pressing_intensity);
    let build = build_score(&vacancy.build_style, &coach.build_preference);
    let tactical_fit = round_half_up(
        style as f64 * 0.45 + pressing as f64 * 0.30 + build as f64 * 0.25,
    );

    let squad_fit = squad_fit(vacancy, coach);
    let financial = financial_fit(vacancy, coach);

    let leadership = leadership_score(&vacancy.objective, &coach.leadership_style);
    let reputation = reputation_score(&coach.reputation_tier);
    let cultural_fit = round_half_up(leadership as f64 * 0.7 + reputation as f64 * 0.3);

    let availability = availability_score(&coach.available_status);

    let weights = OVERALL_WEIGHTS;
    let overall = round_half_up(
        tactical_fit as f64 * weights.tactical
            + squad_fit as f64 * weights.squad
            + financial.score as f64 * weights.financial
            + cultural_fit as f64 * weights.cultural
            + availability as f64 * weights.availability,
    );

    MatchBreakdown {
        scores: MatchScores {
            tactical_fit,
            squad_fit,
            financial_fit: financial.score,
            cultural_fit,
            availability,
            overall,
        },
        style,
        pressing,
        build,
        wage_fit: financial.wage_fit,
        staff_fit: financial.staff_fit,
        leadership,
        reputation,
    }
}
