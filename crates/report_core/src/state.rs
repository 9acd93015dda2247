use crate::catalog::{report_type, ReportType, ReportTypeId};
use crate::config::ConfigForm;
use crate::notice::Notice;
use crate::phase::PhaseProgress;
use crate::report::{GeneratedReport, UsageInfo};
use crate::search::{SearchBox, SearchSlot};
use crate::toc::toc;
use crate::view_model::{AppViewModel, DocumentView, FormView, ProgressView, SearchView};

/// Identifies one configure → generating → done cycle.
pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// No report type selected.
    #[default]
    Catalog,
    Configure,
    Generating,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    stage: Stage,
    selected: Option<ReportTypeId>,
    pub(crate) form: ConfigForm,
    form_error: Option<String>,
    single_search: SearchBox,
    multi_search: SearchBox,
    session: SessionId,
    pub(crate) phase: PhaseProgress,
    report: Option<GeneratedReport>,
    usage: Option<UsageInfo>,
    active_section: Option<String>,
    notices: Vec<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn selected_report_type(&self) -> Option<&'static ReportType> {
        self.selected.and_then(report_type)
    }

    pub fn report(&self) -> Option<&GeneratedReport> {
        self.report.as_ref()
    }

    pub fn search(&self, slot: SearchSlot) -> &SearchBox {
        match slot {
            SearchSlot::Single => &self.single_search,
            SearchSlot::Multi => &self.multi_search,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let progress = (self.stage == Stage::Generating).then(|| {
            let phase = self.phase.phase();
            ProgressView {
                index: self.phase.index(),
                total: crate::GENERATION_PHASES.len(),
                message: phase.message,
                percent: self.phase.percent(),
            }
        });

        let document = match (&self.report, self.stage) {
            (Some(report), Stage::Done) => Some(DocumentView {
                toc: toc(report),
                report: report.clone(),
                usage: self.usage.clone(),
                active_section: self.active_section.clone(),
            }),
            _ => None,
        };

        AppViewModel {
            stage: self.stage,
            report_type: self.selected_report_type(),
            form: FormView {
                sector: self.form.sector.clone(),
                company: self.form.company.get().cloned(),
                companies: self.form.companies.entities().to_vec(),
                topic: self.form.topic.clone(),
                error: self.form_error.clone(),
            },
            single_search: SearchView::from_box(&self.single_search),
            multi_search: SearchView::from_box(&self.multi_search),
            progress,
            document,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Drains notifications queued by the last updates.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
        self.dirty = true;
    }

    pub(crate) fn search_mut(&mut self, slot: SearchSlot) -> &mut SearchBox {
        match slot {
            SearchSlot::Single => &mut self.single_search,
            SearchSlot::Multi => &mut self.multi_search,
        }
    }

    pub(crate) fn set_form_error(&mut self, error: Option<String>) {
        self.form_error = error;
        self.dirty = true;
    }

    pub(crate) fn select_report_type(&mut self, id: ReportTypeId) {
        self.selected = Some(id);
        self.stage = Stage::Configure;
        self.clear_configuration();
    }

    /// Starts a new session and returns its id. Any earlier session becomes stale.
    pub(crate) fn begin_generation(&mut self) -> SessionId {
        self.session += 1;
        self.phase.reset();
        self.report = None;
        self.usage = None;
        self.active_section = None;
        self.form_error = None;
        self.stage = Stage::Generating;
        self.dirty = true;
        self.session
    }

    pub(crate) fn complete_generation(&mut self, report: GeneratedReport, usage: Option<UsageInfo>) {
        self.report = Some(report);
        self.usage = usage;
        self.active_section = None;
        self.stage = Stage::Done;
        self.dirty = true;
    }

    /// Back to the configuration screen with the inputs intact for a retry.
    pub(crate) fn fail_generation(&mut self, message: String) {
        self.phase.reset();
        self.stage = Stage::Configure;
        self.form_error = Some(message.clone());
        self.push_notice(Notice::error(message));
    }

    pub(crate) fn set_active_section(&mut self, section_id: String) {
        self.active_section = Some(section_id);
        self.dirty = true;
    }

    /// Blank configuration for the same report type.
    pub(crate) fn start_new_report(&mut self) {
        self.stage = Stage::Configure;
        self.clear_configuration();
    }

    /// Forget the selection and everything configured for it. Session and
    /// query counters survive so late results of abandoned work stay stale.
    pub(crate) fn back_to_catalog(&mut self) {
        self.clear_configuration();
        let session = self.session;
        let notices = std::mem::take(&mut self.notices);
        let single_search = std::mem::take(&mut self.single_search);
        let multi_search = std::mem::take(&mut self.multi_search);
        *self = Self {
            session,
            notices,
            single_search,
            multi_search,
            ..Self::default()
        };
        self.dirty = true;
    }

    fn clear_configuration(&mut self) {
        self.form.clear();
        self.form_error = None;
        self.single_search.reset();
        self.multi_search.reset();
        self.phase.reset();
        self.report = None;
        self.usage = None;
        self.active_section = None;
        self.dirty = true;
    }
}
