use std::sync::Arc;

use chrono::{TimeZone, Utc};

use super::common::*;
use crate::config::AppEnvironment;
use crate::recruitment::domain::{
    ClubDraft, ClubId, CoachPatch, CoachQuery, CoachUpdateIntake, MatchId, MatchRecord, Vacancy,
    VacancyId,
};
use crate::recruitment::repository::{RecruitmentRepository, RepositoryError};
use crate::recruitment::{
    calculate_match_scores, CoachId, RecruitmentService, RecruitmentServiceError, ScoreBand,
    VacancyViolation,
};

#[test]
fn register_club_trims_fields_and_defaults_ownership() {
    let (service, _) = build_services(AppEnvironment::Test);

    let club = service
        .register_club(
            &owner(),
            ClubDraft {
                name: "  Harbour City  ".to_string(),
                league: "Championship".to_string(),
                country: "England".to_string(),
                ownership_model: Some("   ".to_string()),
            },
        )
        .expect("club registered");

    assert_eq!(club.name, "Harbour City");
    assert_eq!(club.ownership_model, "Private");
    assert_eq!(club.owner, owner());
    assert!(club.id.0.starts_with("clb-"));
}

#[test]
fn register_club_lists_missing_fields() {
    let (service, _) = build_services(AppEnvironment::Test);

    let error = service
        .register_club(
            &owner(),
            ClubDraft {
                name: String::new(),
                league: "Serie A".to_string(),
                country: " ".to_string(),
                ownership_model: None,
            },
        )
        .expect_err("incomplete club rejected");

    match error {
        RecruitmentServiceError::Violation(VacancyViolation::MissingFields(fields)) => {
            assert_eq!(fields, vec!["name", "country"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn clubs_are_scoped_to_their_owner() {
    let (service, _) = build_services(AppEnvironment::Test);
    service
        .register_club(&owner(), club_draft("Northbank"))
        .expect("first club");
    service
        .register_club(&owner(), club_draft("Southbank"))
        .expect("second club");
    service
        .register_club(&rival(), club_draft("Rival Town"))
        .expect("rival club");

    let names: Vec<String> = service
        .clubs(&owner())
        .expect("clubs listed")
        .into_iter()
        .map(|club| club.name)
        .collect();
    assert_eq!(names, vec!["Northbank", "Southbank"]);
}

#[test]
fn coaches_are_listed_by_name() {
    let (service, _) = build_services(AppEnvironment::Test);
    for name in ["Zoltan Varga", "Ana Ruiz", "Marco Benedetti"] {
        service
            .add_coach(coach_draft(name, elite_profile()))
            .expect("coach added");
    }

    let names: Vec<String> = service
        .coaches()
        .expect("roster listed")
        .into_iter()
        .map(|coach| coach.name)
        .collect();
    assert_eq!(names, vec!["Ana Ruiz", "Marco Benedetti", "Zoltan Varga"]);
}

#[test]
fn add_coach_requires_a_name() {
    let (service, _) = build_services(AppEnvironment::Test);

    let error = service
        .add_coach(coach_draft("   ", elite_profile()))
        .expect_err("nameless coach rejected");
    assert!(matches!(
        error,
        RecruitmentServiceError::Violation(VacancyViolation::MissingCoachName)
    ));
}

#[test]
fn create_vacancy_scores_every_coach_and_ranks_them() {
    let (service, _) = build_services(AppEnvironment::Test);
    let club = service
        .register_club(&owner(), club_draft("Harbour City"))
        .expect("club registered");
    service
        .import_roster(vec![
            coach_draft("Unknown Prospect", unknown_profile()),
            coach_draft("Luis Ortega", tiki_taka_profile()),
            coach_draft("Marco Benedetti", elite_profile()),
        ])
        .expect("roster imported");

    let shortlist = service
        .create_vacancy(&owner(), vacancy_draft(&club.id))
        .expect("vacancy created");

    assert_eq!(shortlist.vacancy.status, "open");
    assert_eq!(shortlist.vacancy.club_id, club.id);

    let ranked: Vec<(&str, u8, ScoreBand)> = shortlist
        .matches
        .iter()
        .map(|entry| (entry.coach_name.as_str(), entry.scores.overall, entry.band))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("Marco Benedetti", 94, ScoreBand::Strong),
            ("Luis Ortega", 68, ScoreBand::Good),
            ("Unknown Prospect", 44, ScoreBand::Moderate),
        ]
    );

    let stored = service
        .repository()
        .matches_for(&shortlist.vacancy.id)
        .expect("matches stored");
    assert_eq!(stored.len(), 3);
}

#[test]
fn stored_shortlist_matches_creation_response() {
    let (service, _) = build_services(AppEnvironment::Test);
    let club = service
        .register_club(&owner(), club_draft("Harbour City"))
        .expect("club registered");
    service
        .add_coach(coach_draft("Luis Ortega", tiki_taka_profile()))
        .expect("coach added");
    service
        .add_coach(coach_draft("Marco Benedetti", elite_profile()))
        .expect("coach added");

    let created = service
        .create_vacancy(&owner(), vacancy_draft(&club.id))
        .expect("vacancy created");
    let fetched = service
        .shortlist(&owner(), &created.vacancy.id)
        .expect("shortlist fetched");

    assert_eq!(fetched, created);
}

#[test]
fn vacancy_with_empty_roster_has_no_matches() {
    let (service, _) = build_services(AppEnvironment::Test);
    let club = service
        .register_club(&owner(), club_draft("Harbour City"))
        .expect("club registered");

    let shortlist = service
        .create_vacancy(&owner(), vacancy_draft(&club.id))
        .expect("vacancy created");
    assert!(shortlist.matches.is_empty());
}

#[test]
fn create_vacancy_rejects_foreign_or_unknown_clubs() {
    let (service, _) = build_services(AppEnvironment::Test);
    let rival_club = service
        .register_club(&rival(), club_draft("Rival Town"))
        .expect("rival club");

    for club_id in [rival_club.id, ClubId("clb-missing".to_string())] {
        let error = service
            .create_vacancy(&owner(), vacancy_draft(&club_id))
            .expect_err("club rejected");
        assert!(matches!(
            error,
            RecruitmentServiceError::Violation(VacancyViolation::UnknownClub)
        ));
    }
}

#[test]
fn create_vacancy_requires_core_requirements() {
    let (service, _) = build_services(AppEnvironment::Test);
    let club = service
        .register_club(&owner(), club_draft("Harbour City"))
        .expect("club registered");

    let mut draft = vacancy_draft(&club.id);
    draft.requirements.objective = "  ".to_string();
    draft.requirements.timeline = String::new();

    let error = service
        .create_vacancy(&owner(), draft)
        .expect_err("incomplete vacancy rejected");
    assert_eq!(
        error.to_string(),
        "Please complete all required fields (objective, timeline)"
    );
}

#[test]
fn blank_role_type_defaults_to_head_coach() {
    let (service, _) = build_services(AppEnvironment::Test);
    let club = service
        .register_club(&owner(), club_draft("Harbour City"))
        .expect("club registered");

    let mut draft = vacancy_draft(&club.id);
    draft.requirements.role_type = " ".to_string();

    let shortlist = service
        .create_vacancy(&owner(), draft)
        .expect("vacancy created");
    assert_eq!(shortlist.vacancy.requirements.role_type, "Head Coach");
}

#[test]
fn vacancies_are_listed_newest_first_and_hidden_from_rivals() {
    let (service, _) = build_services(AppEnvironment::Test);
    let club = service
        .register_club(&owner(), club_draft("Harbour City"))
        .expect("club registered");

    let first = service
        .create_vacancy(&owner(), vacancy_draft(&club.id))
        .expect("first vacancy");
    let second = service
        .create_vacancy(&owner(), vacancy_draft(&club.id))
        .expect("second vacancy");

    let ids: Vec<VacancyId> = service
        .vacancies(&owner())
        .expect("vacancies listed")
        .into_iter()
        .map(|vacancy| vacancy.id)
        .collect();
    assert_eq!(ids, vec![second.vacancy.id.clone(), first.vacancy.id.clone()]);

    assert!(service.vacancies(&rival()).expect("rival list").is_empty());
    assert!(matches!(
        service.shortlist(&rival(), &first.vacancy.id),
        Err(RecruitmentServiceError::VacancyNotFound)
    ));
}

#[test]
fn preview_exposes_component_scores() {
    let (service, _) = build_services(AppEnvironment::Test);

    let breakdown = service.preview(&requirements(), &elite_profile());
    assert_eq!(breakdown.scores.overall, 94);
    assert_eq!(breakdown.leadership, 85);
    assert_eq!(breakdown.reputation, 80);
}

#[test]
fn storage_failures_surface_as_repository_errors() {
    let service = RecruitmentService::new(Arc::new(UnavailableStore));

    assert!(matches!(
        service.register_club(&owner(), club_draft("Harbour City")),
        Err(RecruitmentServiceError::Repository(
            RepositoryError::Unavailable(_)
        ))
    ));
    assert!(matches!(
        service.coaches(),
        Err(RecruitmentServiceError::Repository(
            RepositoryError::Unavailable(_)
        ))
    ));
}

#[test]
fn tied_coaches_rank_in_name_order() {
    let names = ["Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot"];
    let scrambled = ["Delta", "Foxtrot", "Alpha", "Echo", "Charlie", "Bravo"];

    // HashMap iteration differs between stores, so repeat on fresh ones.
    for _ in 0..10 {
        let (service, _) = build_services(AppEnvironment::Test);
        let club = service
            .register_club(&owner(), club_draft("Harbour City"))
            .expect("club registered");
        service
            .import_roster(
                scrambled
                    .iter()
                    .map(|name| coach_draft(name, elite_profile()))
                    .collect(),
            )
            .expect("roster imported");

        let created = service
            .create_vacancy(&owner(), vacancy_draft(&club.id))
            .expect("vacancy created");
        let created_order: Vec<&str> = created
            .matches
            .iter()
            .map(|entry| entry.coach_name.as_str())
            .collect();
        assert_eq!(created_order, names);

        let fetched = service
            .shortlist(&owner(), &created.vacancy.id)
            .expect("shortlist fetched");
        assert_eq!(fetched, created);
    }
}

#[test]
fn shortlist_keeps_stored_order_for_ties_past_six_digit_ids() {
    let (service, _) = build_services(AppEnvironment::Test);
    let club = service
        .register_club(&owner(), club_draft("Harbour City"))
        .expect("club registered");
    let alpha = service
        .add_coach(coach_draft("Alpha", elite_profile()))
        .expect("coach added");
    let bravo = service
        .add_coach(coach_draft("Bravo", elite_profile()))
        .expect("coach added");

    let repository = service.repository();
    let vacancy = repository
        .insert_vacancy(Vacancy {
            id: VacancyId("vac-rollover".to_string()),
            club_id: club.id,
            owner: owner(),
            requirements: requirements(),
            status: "open".to_string(),
            created_at: Utc::now(),
        })
        .expect("vacancy stored");
    let scores = calculate_match_scores(&requirements(), &elite_profile());
    repository
        .insert_matches(vec![
            MatchRecord {
                id: MatchId("mat-1000000".to_string()),
                vacancy_id: vacancy.id.clone(),
                coach_id: alpha.id,
                scores,
                created_at: vacancy.created_at,
            },
            MatchRecord {
                id: MatchId("mat-999999".to_string()),
                vacancy_id: vacancy.id.clone(),
                coach_id: bravo.id,
                scores,
                created_at: vacancy.created_at,
            },
        ])
        .expect("matches stored");

    let shortlist = service
        .shortlist(&owner(), &vacancy.id)
        .expect("shortlist fetched");
    let order: Vec<&str> = shortlist
        .matches
        .iter()
        .map(|entry| entry.coach_name.as_str())
        .collect();
    assert_eq!(order, vec!["Alpha", "Bravo"]);
}

#[test]
fn failed_roster_read_leaves_no_vacancy_behind() {
    let service = RecruitmentService::new(Arc::new(RosterOutageStore::default()));
    let club = service
        .register_club(&owner(), club_draft("Harbour City"))
        .expect("club registered");

    let error = service
        .create_vacancy(&owner(), vacancy_draft(&club.id))
        .expect_err("roster read fails");
    assert!(matches!(
        error,
        RecruitmentServiceError::Repository(RepositoryError::Unavailable(_))
    ));
    assert!(service
        .vacancies(&owner())
        .expect("vacancies listed")
        .is_empty());
}

#[test]
fn search_coaches_matches_text_fields_and_status() {
    let (service, _) = build_services(AppEnvironment::Test);
    let mut ortega = coach_draft("Luis Ortega", tiki_taka_profile());
    ortega.nationality = Some("Spanish".to_string());
    ortega.current_club = None;
    service
        .import_roster(vec![
            coach_draft("Marco Benedetti", elite_profile()),
            ortega,
            coach_draft("Unknown Prospect", unknown_profile()),
        ])
        .expect("roster imported");

    let names = |query: CoachQuery| -> Vec<String> {
        service
            .search_coaches(&query)
            .expect("search runs")
            .into_iter()
            .map(|coach| coach.name)
            .collect()
    };

    assert_eq!(names(CoachQuery::default()).len(), 3);
    assert_eq!(
        names(CoachQuery {
            search: Some("SPAN".to_string()),
            status: None,
        }),
        vec!["Luis Ortega"]
    );
    assert_eq!(
        names(CoachQuery {
            search: Some("benedetti fc".to_string()),
            status: Some("all".to_string()),
        }),
        vec!["Marco Benedetti"]
    );
    assert_eq!(
        names(CoachQuery {
            search: Some("tiki".to_string()),
            status: None,
        }),
        vec!["Luis Ortega", "Unknown Prospect"]
    );
    assert_eq!(
        names(CoachQuery {
            search: Some("tiki".to_string()),
            status: Some("Open to offers".to_string()),
        }),
        vec!["Luis Ortega"]
    );
    assert!(names(CoachQuery {
        search: None,
        status: Some("Not available".to_string()),
    })
    .is_empty());
}

#[test]
fn edit_coach_keeps_omitted_fields() {
    let (service, _) = build_services(AppEnvironment::Test);
    let coach = service
        .add_coach(coach_draft("Marco Benedetti", elite_profile()))
        .expect("coach added");

    let patch: CoachPatch = serde_json::from_value(serde_json::json!({
        "name": "   ",
        "age": null,
        "pressing_intensity": "Very High",
        "league_experience": ["Serie A", "La Liga"]
    }))
    .expect("patch parses");
    assert_eq!(patch.age, Some(None));
    assert_eq!(patch.nationality, None);

    let edited = service.edit_coach(&coach.id, patch).expect("coach edited");
    assert_eq!(edited.name, "Marco Benedetti");
    assert_eq!(edited.age, None);
    assert_eq!(edited.nationality.as_deref(), Some("Italian"));
    assert_eq!(edited.current_club.as_deref(), Some("Marco Benedetti FC"));
    assert_eq!(edited.profile.pressing_intensity, "Very High");
    assert_eq!(edited.profile.preferred_style, "Possession-based");
    assert_eq!(
        edited.profile.league_experience,
        vec!["Serie A".to_string(), "La Liga".to_string()]
    );
    assert!(edited.last_updated >= coach.last_updated);
    assert_eq!(service.coach(&coach.id).expect("coach fetched"), edited);

    let missing = service
        .edit_coach(&CoachId("cch-missing".to_string()), CoachPatch::default())
        .expect_err("unknown coach");
    assert!(matches!(missing, RecruitmentServiceError::CoachNotFound));
}

#[test]
fn coach_updates_are_validated_and_listed_newest_first() {
    let (service, _) = build_services(AppEnvironment::Test);
    let coach = service
        .add_coach(coach_draft("Marco Benedetti", elite_profile()))
        .expect("coach added");

    let blank = service
        .log_coach_update(
            &coach.id,
            CoachUpdateIntake {
                update_note: "   ".to_string(),
                ..CoachUpdateIntake::default()
            },
        )
        .expect_err("note required");
    assert_eq!(blank.to_string(), "Update note is required.");

    let bad_date = service
        .log_coach_update(
            &coach.id,
            CoachUpdateIntake {
                update_note: "Watched training".to_string(),
                occurred_at: "03/02/2025".to_string(),
                ..CoachUpdateIntake::default()
            },
        )
        .expect_err("date rejected");
    assert!(matches!(
        bad_date,
        RecruitmentServiceError::Violation(VacancyViolation::InvalidDate(_))
    ));

    let older = service
        .log_coach_update(
            &coach.id,
            CoachUpdateIntake {
                update_note: " Watched training ".to_string(),
                occurred_at: "2025-02-03".to_string(),
                ..CoachUpdateIntake::default()
            },
        )
        .expect("update logged");
    assert_eq!(older.update_type, "general");
    assert_eq!(older.update_note, "Watched training");
    assert_eq!(older.confidence, None);
    assert_eq!(
        older.occurred_at,
        Utc.with_ymd_and_hms(2025, 2, 3, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    );

    let newer = service
        .log_coach_update(
            &coach.id,
            CoachUpdateIntake {
                update_type: "contract".to_string(),
                update_note: "Release clause confirmed".to_string(),
                confidence: "High".to_string(),
                source_tier: "Tier 1".to_string(),
                source_note: "Agent call".to_string(),
                occurred_at: "2025-03-10".to_string(),
            },
        )
        .expect("update logged");
    assert!(newer.is_high_confidence());

    let dossier = service.dossier(&coach.id).expect("dossier");
    let notes: Vec<&str> = dossier
        .updates
        .iter()
        .map(|update| update.update_note.as_str())
        .collect();
    assert_eq!(notes, vec!["Release clause confirmed", "Watched training"]);
    assert_eq!(dossier.coach.id, coach.id);

    let orphan = service
        .log_coach_update(
            &CoachId("cch-missing".to_string()),
            CoachUpdateIntake {
                update_note: "Rumour".to_string(),
                ..CoachUpdateIntake::default()
            },
        )
        .expect_err("unknown coach");
    assert!(matches!(orphan, RecruitmentServiceError::CoachNotFound));
}
