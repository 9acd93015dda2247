use std::sync::{mpsc, Arc};
use std::thread;

use tokio::runtime::Handle;

use report_core::{
    GenerationRequest, QueryId, SearchSlot, SessionId, GENERATION_PHASES,
};
use report_logging::{report_debug, report_error, report_info, report_warn};

use crate::generate::{GenerationClient, ReqwestGenerationClient};
use crate::search::{EntityDirectory, ReqwestEntityDirectory, SearchDebouncer};
use crate::settings::{SearchSettings, ServiceSettings};
use crate::ticker::PhaseTicker;
use crate::{DirectoryError, EngineEvent, EventSink, GenerationError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("generation client: {0}")]
    Generation(GenerationError),
    #[error("entity directory: {0}")]
    Directory(#[from] DirectoryError),
}

enum EngineCommand {
    Generate {
        session: SessionId,
        request: GenerationRequest,
    },
    StartTicker {
        session: SessionId,
    },
    StopTicker {
        session: SessionId,
    },
    Search {
        slot: SearchSlot,
        query_id: QueryId,
        query: String,
    },
    CancelSearch {
        slot: SearchSlot,
    },
}

/// Front door to the IO thread. Dropping the last handle shuts the thread
/// down, cancelling tickers and pending lookups with it.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        service: &ServiceSettings,
        search: SearchSettings,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let generator =
            Arc::new(ReqwestGenerationClient::new(service).map_err(EngineError::Generation)?);
        let directory = Arc::new(ReqwestEntityDirectory::new(service, &search)?);
        Ok(Self::with_services(generator, directory, search, sink))
    }

    pub fn with_services(
        generator: Arc<dyn GenerationClient>,
        directory: Arc<dyn EntityDirectory>,
        search: SearchSettings,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    report_error!("Failed to start engine runtime: {err}");
                    return;
                }
            };
            let mut worker = Worker {
                runtime: runtime.handle().clone(),
                generator,
                single: SearchDebouncer::new(SearchSlot::Single, directory.clone(), search.clone()),
                multi: SearchDebouncer::new(SearchSlot::Multi, directory, search),
                ticker: PhaseTicker::new(),
                sink,
            };
            while let Ok(command) = cmd_rx.recv() {
                worker.handle(command);
            }
            report_info!("Engine shutting down");
            drop(worker);
            runtime.shutdown_background();
        });

        Self { cmd_tx }
    }

    pub fn generate(&self, session: SessionId, request: GenerationRequest) {
        self.send(EngineCommand::Generate { session, request });
    }

    pub fn start_ticker(&self, session: SessionId) {
        self.send(EngineCommand::StartTicker { session });
    }

    pub fn stop_ticker(&self, session: SessionId) {
        self.send(EngineCommand::StopTicker { session });
    }

    pub fn search(&self, slot: SearchSlot, query_id: QueryId, query: impl Into<String>) {
        self.send(EngineCommand::Search {
            slot,
            query_id,
            query: query.into(),
        });
    }

    pub fn cancel_search(&self, slot: SearchSlot) {
        self.send(EngineCommand::CancelSearch { slot });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            report_warn!("Engine thread is gone; command dropped");
        }
    }
}

struct Worker {
    runtime: Handle,
    generator: Arc<dyn GenerationClient>,
    single: SearchDebouncer,
    multi: SearchDebouncer,
    ticker: PhaseTicker,
    sink: Arc<dyn EventSink>,
}

impl Worker {
    fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Generate { session, request } => {
                report_debug!("Generate command for session {session}");
                let generator = self.generator.clone();
                let sink = self.sink.clone();
                self.runtime.spawn(async move {
                    let result = generator.generate(&request).await;
                    match &result {
                        Ok(response) => report_info!(
                            "Session {session} produced '{}' with {} sections",
                            response.report.title,
                            response.report.sections.len()
                        ),
                        Err(err) => report_warn!("Session {session} failed: {err}"),
                    }
                    sink.emit(EngineEvent::GenerationCompleted { session, result });
                });
            }
            EngineCommand::StartTicker { session } => {
                self.ticker
                    .start(&self.runtime, session, GENERATION_PHASES, self.sink.clone());
            }
            EngineCommand::StopTicker { session } => self.ticker.stop(session),
            EngineCommand::Search {
                slot,
                query_id,
                query,
            } => {
                let sink = self.sink.clone();
                let runtime = self.runtime.clone();
                self.debouncer(slot).schedule(&runtime, query_id, query, sink);
            }
            EngineCommand::CancelSearch { slot } => self.debouncer(slot).cancel(),
        }
    }

    fn debouncer(&mut self, slot: SearchSlot) -> &mut SearchDebouncer {
        match slot {
            SearchSlot::Single => &mut self.single,
            SearchSlot::Multi => &mut self.multi,
        }
    }
}
