use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A finished report as returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub executive_summary: String,
    #[serde(default)]
    pub methodology: String,
    pub sections: Vec<GeneratedSection>,
}

/// One generated section; `content` is the semi-structured text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSection {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Quota metadata attached to a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageInfo {
    pub used: u32,
    pub limit: u32,
    #[serde(default)]
    pub tier: String,
}

/// How a generation attempt ended, as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Completed {
        report: GeneratedReport,
        usage: Option<UsageInfo>,
    },
    /// The service answered with a failure status, optionally explaining why.
    Rejected { message: Option<String> },
    /// The request never completed (connection failure or timeout).
    Unreachable,
    /// Success status, but the body did not contain a report.
    Unexpected,
}
