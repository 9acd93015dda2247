use crate::search::SearchBox;
use crate::{GeneratedReport, ReportType, SearchableEntity, Stage, TocEntry, UsageInfo};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub stage: Stage,
    pub report_type: Option<&'static ReportType>,
    pub form: FormView,
    pub single_search: SearchView,
    pub multi_search: SearchView,
    pub progress: Option<ProgressView>,
    pub document: Option<DocumentView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormView {
    pub sector: String,
    pub company: Option<SearchableEntity>,
    pub companies: Vec<SearchableEntity>,
    pub topic: String,
    /// Inline message from validation or the last failed attempt.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchView {
    pub query: String,
    pub results: Vec<SearchableEntity>,
    pub pending: bool,
}

impl SearchView {
    pub(crate) fn from_box(search: &SearchBox) -> Self {
        Self {
            query: search.query().to_string(),
            results: search.results().to_vec(),
            pending: search.is_pending(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub index: usize,
    pub total: usize,
    pub message: &'static str,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    pub report: GeneratedReport,
    pub toc: Vec<TocEntry>,
    pub usage: Option<UsageInfo>,
    pub active_section: Option<String>,
}
