use crate::infra::{demo_requirements, demo_roster, in_memory_state};
use chrono::{Local, NaiveDate};
use clap::Args;
use dugout::config::AppEnvironment;
use dugout::error::AppError;
use dugout::recruitment::{
    calculate_match_scores, rank_by_overall, ClubDraft, CoachDraft, CoachRosterImporter,
    MatchScores, RankedMatch, RecruiterId, VacancyDraft, VacancyRequirements,
};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ShortlistArgs {
    /// Vacancy requirements as a JSON object
    #[arg(long)]
    pub(crate) requirements: PathBuf,
    /// Coach roster CSV export
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Only print the top N coaches
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for the demo mandate (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_shortlist(args: ShortlistArgs) -> Result<(), AppError> {
    let ShortlistArgs {
        requirements,
        roster,
        limit,
    } = args;

    let requirements: VacancyRequirements =
        serde_json::from_reader(BufReader::new(File::open(&requirements)?))?;
    let drafts = CoachRosterImporter::from_path(&roster)?;

    let ranked = score_roster(&requirements, drafts);
    println!(
        "Shortlist for {} ({}, {} pressing)",
        requirements.role_type, requirements.style_of_play, requirements.pressing_level
    );
    println!("Roster: {}", roster.display());
    for (position, (draft, scores)) in ranked
        .iter()
        .take(limit.unwrap_or(ranked.len()))
        .enumerate()
    {
        println!(
            "{:>2}. {} - overall {} ({})",
            position + 1,
            draft.name,
            scores.overall,
            scores.band().label()
        );
        print_components(scores);
    }

    Ok(())
}

fn score_roster(
    requirements: &VacancyRequirements,
    drafts: Vec<CoachDraft>,
) -> Vec<(CoachDraft, MatchScores)> {
    let mut ranked: Vec<_> = drafts
        .into_iter()
        .map(|draft| {
            let scores = calculate_match_scores(requirements, &draft.profile);
            (draft, scores)
        })
        .collect();
    rank_by_overall(&mut ranked, |(_, scores)| scores.overall);
    ranked
}

fn print_components(scores: &MatchScores) {
    println!(
        "    tactical {} | squad {} | financial {} | cultural {} | availability {}",
        scores.tactical_fit,
        scores.squad_fit,
        scores.financial_fit,
        scores.cultural_fit,
        scores.availability
    );
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let recruiter = RecruiterId("demo-recruiter".to_string());
    let state = in_memory_state(AppEnvironment::Development);

    println!("Coach recruitment demo");
    let coaches = state.recruitment.import_roster(demo_roster()?)?;
    println!("- Imported {} coaches into the roster", coaches.len());

    let club = state.recruitment.register_club(
        &recruiter,
        ClubDraft {
            name: "Northbridge Athletic".to_string(),
            league: "Premier League".to_string(),
            country: "England".to_string(),
            ownership_model: None,
        },
    )?;
    println!(
        "- Registered {} ({}, {} ownership)",
        club.name, club.league, club.ownership_model
    );

    let shortlist = state.recruitment.create_vacancy(
        &recruiter,
        VacancyDraft {
            club_id: club.id.clone(),
            requirements: demo_requirements(),
        },
    )?;
    let vacancy = &shortlist.vacancy.requirements;
    println!(
        "\nVacancy {}: {} | {} | objective: {}",
        shortlist.vacancy.id.0, vacancy.role_type, vacancy.style_of_play, vacancy.objective
    );
    render_ranked(&shortlist.matches);

    let mandate = state.mandates.create_demo(&recruiter, today)?;
    let detail = state.mandates.detail(&recruiter, &mandate.id)?;
    println!("\nDemo mandate {} created", mandate.id.0);
    println!("{}", serde_json::to_string_pretty(&detail)?);

    Ok(())
}

fn render_ranked(matches: &[RankedMatch]) {
    println!("Ranked shortlist");
    for (position, entry) in matches.iter().enumerate() {
        let club = entry.current_club.as_deref().unwrap_or("free agent");
        println!(
            "{:>2}. {} ({}) - overall {} ({})",
            position + 1,
            entry.coach_name,
            club,
            entry.scores.overall,
            entry.band.label()
        );
        print_components(&entry.scores);
    }
}
