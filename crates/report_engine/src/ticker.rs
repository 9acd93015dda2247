use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use report_core::{GenerationPhase, SessionId};
use report_logging::report_debug;

use crate::{EngineEvent, EventSink};

/// Cosmetic progress timer. It walks the phase list once and stops at the
/// last phase; it never signals completion.
#[derive(Default)]
pub struct PhaseTicker {
    running: Option<(SessionId, CancellationToken)>,
}

impl PhaseTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<SessionId> {
        self.running.as_ref().map(|(session, _)| *session)
    }

    pub fn start(
        &mut self,
        runtime: &Handle,
        session: SessionId,
        phases: &'static [GenerationPhase],
        sink: Arc<dyn EventSink>,
    ) {
        self.stop_all();
        let token = CancellationToken::new();
        self.running = Some((session, token.clone()));
        report_debug!("Phase ticker started for session {session}");

        runtime.spawn(async move {
            let last = phases.len().saturating_sub(1);
            for (index, phase) in phases.iter().enumerate().take(last) {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep(Duration::from_millis(phase.duration_ms)) => {}
                }
                if token.is_cancelled() {
                    return;
                }
                sink.emit(EngineEvent::PhaseAdvanced {
                    session,
                    index: index + 1,
                });
            }
        });
    }

    /// Stops the ticker if it belongs to `session`.
    pub fn stop(&mut self, session: SessionId) {
        if self.session() == Some(session) {
            self.stop_all();
        }
    }

    pub fn stop_all(&mut self) {
        if let Some((session, token)) = self.running.take() {
            token.cancel();
            report_debug!("Phase ticker stopped for session {session}");
        }
    }
}

impl Drop for PhaseTicker {
    fn drop(&mut self) {
        self.stop_all();
    }
}
