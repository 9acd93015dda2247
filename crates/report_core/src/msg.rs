use crate::{GenerationOutcome, QueryId, ReportTypeId, SearchSlot, SearchableEntity, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a report template from the catalog.
    ReportTypeSelected(ReportTypeId),
    /// User chose a sector value.
    SectorChanged(String),
    /// User edited the free-text market description.
    TopicChanged(String),
    /// User typed into one of the entity typeaheads.
    SearchInputChanged { slot: SearchSlot, query: String },
    /// Debounced lookup finished (errors already degraded to an empty list).
    SearchCompleted {
        slot: SearchSlot,
        query_id: QueryId,
        entities: Vec<SearchableEntity>,
    },
    /// User picked an entity from a typeahead's results.
    EntityPicked {
        slot: SearchSlot,
        entity: SearchableEntity,
    },
    /// User removed one company from the comparison list.
    EntityRemoved { slug: String },
    /// User cleared the single-company selection.
    EntityCleared,
    /// User clicked Generate.
    GenerateClicked,
    /// Phase ticker moved to `index` for `session`.
    PhaseAdvanced { session: SessionId, index: usize },
    /// Generation request for `session` resolved.
    GenerationFinished {
        session: SessionId,
        outcome: GenerationOutcome,
    },
    /// User clicked a table-of-contents entry.
    TocEntryClicked { section_id: String },
    /// User asked to print or export the document.
    PrintClicked,
    /// User asked to share the report page link.
    ShareClicked,
    /// User asked for a fresh report of the same type.
    StartNewReportClicked,
    /// User went back to the report type list.
    BackToCatalogClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
