use crate::{GeneratedReport, GenerationRequest, QueryId, SearchSlot, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Debounce, then look up entities for `slot`.
    ScheduleSearch {
        slot: SearchSlot,
        query_id: QueryId,
        query: String,
    },
    /// Drop any pending lookup for `slot`.
    CancelSearch { slot: SearchSlot },
    StartGeneration {
        session: SessionId,
        request: GenerationRequest,
    },
    StartPhaseTicker { session: SessionId },
    StopPhaseTicker { session: SessionId },
    ScrollToSection { section_id: String },
    PrintDocument { report: Box<GeneratedReport> },
    /// Copy the fixed canonical share URL; never a deep link to this report.
    CopyShareLink,
}
