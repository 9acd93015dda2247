use crate::catalog::MAX_COMPARED_COMPANIES;
use crate::search::SearchRequest;
use crate::selection::AddOutcome;
use crate::toc::toc;
use crate::validate::build_request;
use crate::{
    AppState, Effect, GenerationOutcome, Msg, Notice, SearchSlot, Stage, UsageInfo,
};

pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate report. Please try again.";
pub const CONNECTION_FAILURE_MESSAGE: &str =
    "Could not reach the report service. Check your connection and try again.";
pub const UNEXPECTED_RESPONSE_MESSAGE: &str =
    "Unexpected response from the report service. Please try again.";
pub const SUCCESS_MESSAGE: &str = "Report generated successfully";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ReportTypeSelected(id) => {
            if state.stage() == Stage::Generating {
                return (state, Vec::new());
            }
            let effects = cancel_pending_searches(&state);
            state.select_report_type(id);
            effects
        }
        Msg::SectorChanged(sector) => {
            if state.stage() != Stage::Configure {
                return (state, Vec::new());
            }
            state.form.sector = sector;
            state.set_form_error(None);
            Vec::new()
        }
        Msg::TopicChanged(topic) => {
            if state.stage() != Stage::Configure {
                return (state, Vec::new());
            }
            state.form.topic = topic;
            state.set_form_error(None);
            Vec::new()
        }
        Msg::SearchInputChanged { slot, query } => {
            if state.stage() != Stage::Configure {
                return (state, Vec::new());
            }
            state.mark_dirty();
            match state.search_mut(slot).input(query) {
                SearchRequest::Schedule { query_id, query } => vec![Effect::ScheduleSearch {
                    slot,
                    query_id,
                    query,
                }],
                SearchRequest::Clear => vec![Effect::CancelSearch { slot }],
            }
        }
        Msg::SearchCompleted {
            slot,
            query_id,
            entities,
        } => {
            if state.search_mut(slot).apply(query_id, entities) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::EntityPicked { slot, entity } => {
            if state.stage() != Stage::Configure {
                return (state, Vec::new());
            }
            let picked = match slot {
                SearchSlot::Single => {
                    state.form.company.set(entity);
                    true
                }
                SearchSlot::Multi => match state.form.companies.add(entity.clone()) {
                    AddOutcome::Added => true,
                    AddOutcome::Duplicate => {
                        state.push_notice(Notice::warning(format!(
                            "{} is already selected",
                            entity.name
                        )));
                        false
                    }
                    AddOutcome::Full => {
                        state.push_notice(Notice::warning(format!(
                            "You can compare at most {MAX_COMPARED_COMPANIES} companies"
                        )));
                        false
                    }
                },
            };
            if !picked {
                return (state, Vec::new());
            }
            let was_pending = state.search(slot).is_pending();
            state.search_mut(slot).reset();
            state.set_form_error(None);
            if was_pending {
                vec![Effect::CancelSearch { slot }]
            } else {
                Vec::new()
            }
        }
        Msg::EntityRemoved { slug } => {
            if state.stage() == Stage::Configure && state.form.companies.remove(&slug) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::EntityCleared => {
            if state.stage() == Stage::Configure && state.form.company.get().is_some() {
                state.form.company.clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::GenerateClicked => {
            if state.stage() != Stage::Configure {
                return (state, Vec::new());
            }
            let Some(report_type) = state.selected_report_type() else {
                return (state, Vec::new());
            };
            match build_request(report_type, &state.form) {
                Err(err) => {
                    // Stays on the configuration screen; nothing reaches the network.
                    state.set_form_error(Some(err.to_string()));
                    Vec::new()
                }
                Ok(request) => {
                    let mut effects = cancel_pending_searches(&state);
                    let session = state.begin_generation();
                    effects.push(Effect::StartPhaseTicker { session });
                    effects.push(Effect::StartGeneration { session, request });
                    effects
                }
            }
        }
        Msg::PhaseAdvanced { session, index } => {
            if state.stage() == Stage::Generating
                && session == state.session()
                && state.phase.advance_to(index)
            {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::GenerationFinished { session, outcome } => {
            if state.stage() != Stage::Generating || session != state.session() {
                // Result of an abandoned or superseded attempt.
                return (state, Vec::new());
            }
            match outcome {
                GenerationOutcome::Completed { report, usage } => {
                    let usage_notice = usage.as_ref().map(|usage| Notice::info(usage_message(usage)));
                    state.complete_generation(report, usage);
                    state.push_notice(Notice::success(SUCCESS_MESSAGE));
                    if let Some(notice) = usage_notice {
                        state.push_notice(notice);
                    }
                }
                GenerationOutcome::Rejected { message } => {
                    let message = message
                        .map(|m| m.trim().to_string())
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
                    state.fail_generation(message);
                }
                GenerationOutcome::Unreachable => {
                    state.fail_generation(CONNECTION_FAILURE_MESSAGE.to_string());
                }
                GenerationOutcome::Unexpected => {
                    state.fail_generation(UNEXPECTED_RESPONSE_MESSAGE.to_string());
                }
            }
            vec![Effect::StopPhaseTicker { session }]
        }
        Msg::TocEntryClicked { section_id } => {
            if state.stage() != Stage::Done {
                return (state, Vec::new());
            }
            let known = state
                .report()
                .map(|report| toc(report).iter().any(|entry| entry.id == section_id))
                .unwrap_or(false);
            if !known {
                return (state, Vec::new());
            }
            state.set_active_section(section_id.clone());
            vec![Effect::ScrollToSection { section_id }]
        }
        Msg::PrintClicked => match (state.stage(), state.report()) {
            (Stage::Done, Some(report)) => vec![Effect::PrintDocument {
                report: Box::new(report.clone()),
            }],
            _ => Vec::new(),
        },
        Msg::ShareClicked => {
            if state.stage() == Stage::Done {
                vec![Effect::CopyShareLink]
            } else {
                Vec::new()
            }
        }
        Msg::StartNewReportClicked => match state.stage() {
            Stage::Done | Stage::Configure => {
                let effects = cancel_pending_searches(&state);
                state.start_new_report();
                effects
            }
            Stage::Catalog | Stage::Generating => Vec::new(),
        },
        Msg::BackToCatalogClicked => {
            let mut effects = Vec::new();
            if state.stage() == Stage::Generating {
                effects.push(Effect::StopPhaseTicker {
                    session: state.session(),
                });
            }
            effects.extend(cancel_pending_searches(&state));
            state.back_to_catalog();
            effects
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn cancel_pending_searches(state: &AppState) -> Vec<Effect> {
    [SearchSlot::Single, SearchSlot::Multi]
        .into_iter()
        .filter(|slot| state.search(*slot).is_pending())
        .map(|slot| Effect::CancelSearch { slot })
        .collect()
}

fn usage_message(usage: &UsageInfo) -> String {
    if usage.tier.is_empty() {
        format!("{} of {} reports used this period", usage.used, usage.limit)
    } else {
        format!(
            "{} of {} reports used this period ({} plan)",
            usage.used, usage.limit, usage.tier
        )
    }
}
