use std::fmt;

use report_core::{
    GeneratedReport, QueryId, SearchSlot, SearchableEntity, SessionId, UsageInfo,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The cosmetic phase ticker moved on.
    PhaseAdvanced { session: SessionId, index: usize },
    /// A debounced entity lookup finished. Errors arrive as an empty list.
    SearchCompleted {
        slot: SearchSlot,
        query_id: QueryId,
        entities: Vec<SearchableEntity>,
    },
    GenerationCompleted {
        session: SessionId,
        result: Result<GenerationResponse, GenerationError>,
    },
}

/// A well-formed success body from the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    pub report: GeneratedReport,
    pub usage: Option<UsageInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerationError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GenerationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidRequest,
    /// Non-success status; `message` is the service's own explanation, if any.
    Service { status: u16, message: Option<String> },
    Timeout,
    /// Connection refused, reset, DNS failure and the like.
    Transport,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Success status but no usable `report` in the body.
    UnexpectedPayload,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::Service { status, .. } => write!(f, "http status {status}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Transport => write!(f, "network error"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnexpectedPayload => write!(f, "unexpected payload"),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("invalid directory url: {0}")]
    InvalidUrl(String),
    #[error("directory request failed: {0}")]
    Request(String),
    #[error("directory returned http status {0}")]
    Status(u16),
    #[error("could not decode directory response: {0}")]
    Decode(String),
}
