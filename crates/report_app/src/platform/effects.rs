use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use report_core::{Effect, GenerationOutcome, Msg, Notice};
use report_engine::{
    export_report, ChannelEventSink, EngineError, EngineEvent, EngineHandle, FailureKind,
    GenerationError, GenerationResponse,
};
use report_logging::{report_debug, report_error, report_info};

use super::app::HostEvent;
use super::settings::AppSettings;

/// Work the terminal itself has to do in response to an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    Notice(Notice),
    ShowSection(String),
}

pub struct EffectRunner {
    engine: EngineHandle,
    output_dir: PathBuf,
    share_url: String,
}

impl EffectRunner {
    pub fn new(settings: &AppSettings, host_tx: mpsc::Sender<HostEvent>) -> Result<Self, EngineError> {
        let (event_tx, event_rx) = mpsc::channel();
        let sink = Arc::new(ChannelEventSink::new(event_tx));
        let engine = EngineHandle::new(&settings.service(), settings.search(), sink)?;
        spawn_event_forwarder(event_rx, host_tx);
        Ok(Self {
            engine,
            output_dir: settings.output_dir.clone(),
            share_url: settings.share_url.clone(),
        })
    }

    pub fn run(&self, effects: Vec<Effect>) -> Vec<HostAction> {
        let mut actions = Vec::new();
        for effect in effects {
            match effect {
                Effect::ScheduleSearch {
                    slot,
                    query_id,
                    query,
                } => {
                    report_debug!("ScheduleSearch slot={:?} query_id={} query={}", slot, query_id, query);
                    self.engine.search(slot, query_id, query);
                }
                Effect::CancelSearch { slot } => self.engine.cancel_search(slot),
                Effect::StartGeneration { session, request } => {
                    report_info!("StartGeneration session={} type={}", session, request.report_type);
                    self.engine.generate(session, request);
                }
                Effect::StartPhaseTicker { session } => self.engine.start_ticker(session),
                Effect::StopPhaseTicker { session } => self.engine.stop_ticker(session),
                Effect::ScrollToSection { section_id } => {
                    actions.push(HostAction::ShowSection(section_id));
                }
                Effect::PrintDocument { report } => {
                    let notice = match export_report(&report, &self.output_dir) {
                        Ok(path) => Notice::success(format!(
                            "Printable report saved to {}",
                            path.display()
                        )),
                        Err(err) => {
                            report_error!("Export of '{}' failed: {}", report.title, err);
                            Notice::error(format!("Could not export the report: {err}"))
                        }
                    };
                    actions.push(HostAction::Notice(notice));
                }
                Effect::CopyShareLink => {
                    actions.push(HostAction::Notice(Notice::info(format!(
                        "Share link: {}",
                        self.share_url
                    ))));
                }
            }
        }
        actions
    }
}

fn spawn_event_forwarder(event_rx: mpsc::Receiver<EngineEvent>, host_tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        for event in event_rx {
            if host_tx.send(HostEvent::Msg(engine_event_to_msg(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PhaseAdvanced { session, index } => Msg::PhaseAdvanced { session, index },
        EngineEvent::SearchCompleted {
            slot,
            query_id,
            entities,
        } => Msg::SearchCompleted {
            slot,
            query_id,
            entities,
        },
        EngineEvent::GenerationCompleted { session, result } => Msg::GenerationFinished {
            session,
            outcome: outcome(result),
        },
    }
}

fn outcome(result: Result<GenerationResponse, GenerationError>) -> GenerationOutcome {
    match result {
        Ok(GenerationResponse { report, usage }) => GenerationOutcome::Completed { report, usage },
        Err(err) => match err.kind {
            FailureKind::Service { message, .. } => GenerationOutcome::Rejected { message },
            FailureKind::InvalidRequest => GenerationOutcome::Rejected { message: None },
            FailureKind::Timeout | FailureKind::Transport | FailureKind::InvalidUrl => {
                GenerationOutcome::Unreachable
            }
            FailureKind::TooLarge { .. } | FailureKind::UnexpectedPayload => {
                GenerationOutcome::Unexpected
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn failed(kind: FailureKind) -> Msg {
        engine_event_to_msg(EngineEvent::GenerationCompleted {
            session: 3,
            result: Err(GenerationError {
                kind,
                message: "x".to_string(),
            }),
        })
    }

    fn outcome_of(msg: Msg) -> GenerationOutcome {
        match msg {
            Msg::GenerationFinished { session, outcome } => {
                assert_eq!(session, 3);
                outcome
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn service_failures_keep_their_message() {
        let outcome = outcome_of(failed(FailureKind::Service {
            status: 429,
            message: Some("Monthly report limit reached".to_string()),
        }));
        assert_eq!(
            outcome,
            GenerationOutcome::Rejected {
                message: Some("Monthly report limit reached".to_string())
            }
        );
    }

    #[test]
    fn transport_failures_are_unreachable() {
        for kind in [FailureKind::Timeout, FailureKind::Transport, FailureKind::InvalidUrl] {
            assert_eq!(outcome_of(failed(kind)), GenerationOutcome::Unreachable);
        }
    }

    #[test]
    fn malformed_success_is_unexpected() {
        assert_eq!(
            outcome_of(failed(FailureKind::UnexpectedPayload)),
            GenerationOutcome::Unexpected
        );
        assert_eq!(
            outcome_of(failed(FailureKind::TooLarge {
                max_bytes: 1,
                actual: None
            })),
            GenerationOutcome::Unexpected
        );
    }

    #[test]
    fn ticks_map_one_to_one() {
        assert_eq!(
            engine_event_to_msg(EngineEvent::PhaseAdvanced {
                session: 2,
                index: 4
            }),
            Msg::PhaseAdvanced {
                session: 2,
                index: 4
            }
        );
    }
}
