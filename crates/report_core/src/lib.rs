//! Report core: pure state machine, report catalog and configuration rules.
mod catalog;
mod config;
mod effect;
mod msg;
mod notice;
mod phase;
mod report;
mod search;
mod selection;
mod state;
mod toc;
mod update;
mod validate;
mod view_model;

pub use catalog::{
    catalog, report_type, sector_label, FieldId, FieldKind, FieldOption, ReportConfigField,
    ReportSection, ReportType, ReportTypeId, UnknownReportType, MAX_COMPARED_COMPANIES,
    MIN_COMPARED_COMPANIES, MIN_TOPIC_CHARS, SECTORS,
};
pub use config::{ConfigForm, GenerationRequest, ReportConfig};
pub use effect::Effect;
pub use msg::Msg;
pub use notice::{Notice, NoticeLevel};
pub use phase::{
    phase_percent, GenerationPhase, PhaseProgress, GENERATION_PHASES, MAX_PERCENT_BEFORE_DONE,
};
pub use report::{GeneratedReport, GeneratedSection, GenerationOutcome, UsageInfo};
pub use search::{QueryId, SearchBox, SearchRequest, SearchSlot, SearchableEntity, MIN_QUERY_CHARS};
pub use selection::{AddOutcome, MultiSelection, SingleSelection};
pub use state::{AppState, SessionId, Stage};
pub use toc::{section_anchors, toc, TocEntry};
pub use update::{
    update, CONNECTION_FAILURE_MESSAGE, GENERIC_FAILURE_MESSAGE, SUCCESS_MESSAGE,
    UNEXPECTED_RESPONSE_MESSAGE,
};
pub use validate::{build, build_request, ValidationError};
pub use view_model::{AppViewModel, DocumentView, FormView, ProgressView, SearchView};
