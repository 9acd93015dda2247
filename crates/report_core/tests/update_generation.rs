use report_core::{
    update, AppState, Effect, GeneratedReport, GeneratedSection, GenerationOutcome, Msg,
    ReportTypeId, Stage, CONNECTION_FAILURE_MESSAGE, GENERATION_PHASES, GENERIC_FAILURE_MESSAGE,
    MAX_PERCENT_BEFORE_DONE,
};

fn generating() -> AppState {
    let (state, _) = update(AppState::new(), Msg::ReportTypeSelected(ReportTypeId::SectorOverview));
    let (state, _) = update(state, Msg::SectorChanged("earth-observation".to_string()));
    let (state, _) = update(state, Msg::GenerateClicked);
    assert_eq!(state.stage(), Stage::Generating);
    state
}

fn tiny_report() -> GeneratedReport {
    GeneratedReport {
        title: "Earth Observation".to_string(),
        subtitle: String::new(),
        generated_at: chrono::Utc::now(),
        executive_summary: String::new(),
        methodology: String::new(),
        sections: vec![GeneratedSection {
            id: "market-overview".to_string(),
            title: "Market Overview".to_string(),
            content: "## Overview".to_string(),
        }],
    }
}

fn finish(state: AppState, outcome: GenerationOutcome) -> (AppState, Vec<Effect>) {
    let session = state.session();
    update(state, Msg::GenerationFinished { session, outcome })
}

#[test]
fn phase_index_only_moves_forward_within_a_session() {
    let state = generating();
    let session = state.session();
    assert_eq!(state.view().progress.unwrap().index, 0);

    let (state, _) = update(state, Msg::PhaseAdvanced { session, index: 2 });
    assert_eq!(state.view().progress.unwrap().index, 2);

    let (state, _) = update(state, Msg::PhaseAdvanced { session, index: 1 });
    assert_eq!(state.view().progress.unwrap().index, 2);

    let (state, _) = update(
        state,
        Msg::PhaseAdvanced {
            session,
            index: GENERATION_PHASES.len(),
        },
    );
    assert_eq!(state.view().progress.unwrap().index, 2);

    let (state, _) = update(state, Msg::PhaseAdvanced { session: session + 7, index: 4 });
    assert_eq!(state.view().progress.unwrap().index, 2);
}

#[test]
fn percent_stays_below_completion_on_last_phase() {
    let state = generating();
    let session = state.session();
    let last = GENERATION_PHASES.len() - 1;
    let (state, _) = update(state, Msg::PhaseAdvanced { session, index: last });
    let progress = state.view().progress.unwrap();
    assert_eq!(progress.message, GENERATION_PHASES[last].message);
    assert_eq!(progress.percent, MAX_PERCENT_BEFORE_DONE);
}

#[test]
fn phase_resets_for_each_new_session() {
    let state = generating();
    let first = state.session();
    let (state, _) = update(state, Msg::PhaseAdvanced { session: first, index: 3 });
    let (state, _) = finish(state, GenerationOutcome::Unreachable);

    let (state, effects) = update(state, Msg::GenerateClicked);
    let second = state.session();
    assert!(second > first);
    assert_eq!(effects[0], Effect::StartPhaseTicker { session: second });
    assert_eq!(state.view().progress.unwrap().index, 0);

    // A tick from the finished session does not leak into the new one.
    let (state, _) = update(state, Msg::PhaseAdvanced { session: first, index: 4 });
    assert_eq!(state.view().progress.unwrap().index, 0);
}

#[test]
fn phases_do_not_advance_after_completion_or_failure() {
    let state = generating();
    let session = state.session();
    let (state, _) = finish(
        state,
        GenerationOutcome::Completed {
            report: tiny_report(),
            usage: None,
        },
    );
    let before = state.clone();
    let (state, effects) = update(state, Msg::PhaseAdvanced { session, index: 1 });
    assert!(effects.is_empty());
    assert_eq!(state, before);

    let state = generating();
    let session = state.session();
    let (state, _) = finish(state, GenerationOutcome::Rejected { message: None });
    let (state, _) = update(state, Msg::PhaseAdvanced { session, index: 1 });
    assert!(state.view().progress.is_none());
}

#[test]
fn service_message_is_surfaced_verbatim() {
    let (mut state, effects) = finish(
        generating(),
        GenerationOutcome::Rejected {
            message: Some("Monthly report limit reached".to_string()),
        },
    );
    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::StopPhaseTicker { .. }));
    assert_eq!(state.stage(), Stage::Configure);
    assert_eq!(
        state.view().form.error.as_deref(),
        Some("Monthly report limit reached")
    );
    assert_eq!(state.take_notices()[0].text, "Monthly report limit reached");
}

#[test]
fn missing_or_blank_service_message_uses_fallback() {
    let (state, _) = finish(generating(), GenerationOutcome::Rejected { message: None });
    assert_eq!(state.view().form.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));

    let (state, _) = finish(
        generating(),
        GenerationOutcome::Rejected {
            message: Some("   ".to_string()),
        },
    );
    assert_eq!(state.view().form.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
}

#[test]
fn transport_failure_has_its_own_message() {
    let (state, effects) = finish(generating(), GenerationOutcome::Unreachable);
    assert_eq!(effects.len(), 1);
    assert_eq!(state.stage(), Stage::Configure);
    assert_eq!(state.view().form.error.as_deref(), Some(CONNECTION_FAILURE_MESSAGE));
}

#[test]
fn stale_session_results_are_ignored() {
    let state = generating();
    let session = state.session();
    let before = state.clone();
    let (state, effects) = update(
        state,
        Msg::GenerationFinished {
            session: session - 1,
            outcome: GenerationOutcome::Unreachable,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn leaving_mid_generation_stops_ticker_and_drops_late_result() {
    let state = generating();
    let session = state.session();
    let (state, effects) = update(state, Msg::BackToCatalogClicked);
    assert_eq!(effects, vec![Effect::StopPhaseTicker { session }]);
    assert_eq!(state.stage(), Stage::Catalog);

    let (state, effects) = update(
        state,
        Msg::GenerationFinished {
            session,
            outcome: GenerationOutcome::Completed {
                report: tiny_report(),
                usage: None,
            },
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.stage(), Stage::Catalog);
    assert!(state.report().is_none());

    // The counter survives the reset, so the next session is new.
    let (state, _) = update(state, Msg::ReportTypeSelected(ReportTypeId::SectorOverview));
    let (state, _) = update(state, Msg::SectorChanged("launch-services".to_string()));
    let (state, _) = update(state, Msg::GenerateClicked);
    assert_eq!(state.session(), session + 1);
}

#[test]
fn generate_is_ignored_while_generating() {
    let state = generating();
    let session = state.session();
    let (state, effects) = update(state, Msg::GenerateClicked);
    assert!(effects.is_empty());
    assert_eq!(state.session(), session);
}

#[test]
fn new_generation_replaces_previous_report() {
    let (state, _) = finish(
        generating(),
        GenerationOutcome::Completed {
            report: tiny_report(),
            usage: None,
        },
    );
    let (state, _) = update(state, Msg::StartNewReportClicked);
    let (state, _) = update(state, Msg::SectorChanged("ground-segment".to_string()));
    let (state, _) = update(state, Msg::GenerateClicked);
    assert!(state.report().is_none());

    let mut replacement = tiny_report();
    replacement.title = "Ground Segment".to_string();
    let (state, _) = finish(
        state,
        GenerationOutcome::Completed {
            report: replacement.clone(),
            usage: None,
        },
    );
    assert_eq!(state.report(), Some(&replacement));
}
