//! Report engine: service clients, timers and document output.
mod engine;
mod export;
mod filename;
mod generate;
mod persist;
pub mod render;
mod search;
mod settings;
mod sink;
mod ticker;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use export::export_report;
pub use filename::export_filename;
pub use generate::{classify_response, GenerationClient, ReqwestGenerationClient};
pub use persist::{prepare_output_dir, write_atomic, PersistError};
pub use render::{render_report, RenderedDocument};
pub use search::{search_or_empty, EntityDirectory, ReqwestEntityDirectory, SearchDebouncer};
pub use settings::{SearchSettings, ServiceSettings};
pub use sink::{ChannelEventSink, EventSink};
pub use ticker::PhaseTicker;
pub use types::{DirectoryError, EngineEvent, FailureKind, GenerationError, GenerationResponse};
