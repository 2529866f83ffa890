use chrono::NaiveDate;
use dugout::config::AppEnvironment;
use dugout::recruitment::{
    CoachDraft, CoachRosterImporter, InMemoryStore, MandateService, RecruitmentService,
    RecruitmentState, RosterImportError, VacancyRequirements,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type MemoryRecruitment = RecruitmentService<InMemoryStore>;
pub(crate) type MemoryState = RecruitmentState<InMemoryStore, InMemoryStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) recruitment: Arc<MemoryRecruitment>,
}

/// Wire both services over a single in-memory store.
pub(crate) fn in_memory_state(environment: AppEnvironment) -> MemoryState {
    let store = Arc::new(InMemoryStore::new());
    RecruitmentState {
        recruitment: Arc::new(RecruitmentService::new(store.clone())),
        mandates: Arc::new(MandateService::new(store.clone(), store, environment)),
    }
}

const DEMO_ROSTER_CSV: &str = "\
name,age,nationality,current_role,current_club,preferred_style,pressing_intensity,build_preference,leadership_style,wage_expectation,staff_cost_estimate,available_status,reputation_tier,league_experience
Marco Benedetti,52,Italian,Head Coach,,Possession-based,High,Short passing,Demanding,£4m - £7m/yr,£1m - £2m,Available,Elite,Serie A|La Liga|Ligue 1
Thomas Kleinhans,47,German,Head Coach,FC Augsburg,Gegenpressing,Very High,Build from back,Demanding,£2m - £4m/yr,£1m - £2m,Under contract - interested,Established,Bundesliga
Sarah Vandenberg,41,Dutch,Head Coach,Ajax Women,Tiki-taka,High,Short passing,Developer,£1m - £2m/yr,£500k - £1m,Under contract - interested,Emerging,Eredivisie
Carlos Dominguez,49,Spanish,Head Coach,,Counter-attacking,Medium,Direct play,Pragmatic,£2m - £4m/yr,£1m - £2m,Available,Established,La Liga|Segunda Division
Patrick McAllister,55,Scottish,Head Coach,Rangers,Balanced,High,Mixed,Motivator,£1m - £2m/yr,£500k - £1m,Under contract,Established,Scottish Premiership|Premier League
";

/// Sample roster used by the demo command.
pub(crate) fn demo_roster() -> Result<Vec<CoachDraft>, RosterImportError> {
    CoachRosterImporter::from_reader(DEMO_ROSTER_CSV.as_bytes())
}

pub(crate) fn demo_requirements() -> VacancyRequirements {
    VacancyRequirements {
        role_type: "Head Coach".to_string(),
        objective: "Qualify for Europe".to_string(),
        style_of_play: "Possession-based".to_string(),
        pressing_level: "High".to_string(),
        build_style: "Short passing".to_string(),
        budget_range: "£15m - £30m".to_string(),
        staff_budget: "£1m - £2m".to_string(),
        timeline: "Before pre-season".to_string(),
        league_experience_required: true,
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
