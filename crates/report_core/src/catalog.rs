//! Static registry of report templates.
//!
//! The table is built at compile time and exposes lookups only, so the
//! configuration view and the validator always read the same definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportTypeId {
    SectorOverview,
    CompanyDeepDive,
    CompetitiveAnalysis,
    MarketEntryBrief,
}

impl ReportTypeId {
    pub const ALL: [ReportTypeId; 4] = [
        ReportTypeId::SectorOverview,
        ReportTypeId::CompanyDeepDive,
        ReportTypeId::CompetitiveAnalysis,
        ReportTypeId::MarketEntryBrief,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportTypeId::SectorOverview => "sector-overview",
            ReportTypeId::CompanyDeepDive => "company-deep-dive",
            ReportTypeId::CompetitiveAnalysis => "competitive-analysis",
            ReportTypeId::MarketEntryBrief => "market-entry-brief",
        }
    }
}

impl fmt::Display for ReportTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report type: {0}")]
pub struct UnknownReportType(pub String);

impl FromStr for ReportTypeId {
    type Err = UnknownReportType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ReportTypeId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownReportType(wanted.to_string()))
    }
}

/// Which configuration input a field feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Sector,
    Company,
    Companies,
    Topic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    SingleSelect,
    MultiSelect,
    FreeText,
    EntityTypeahead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfigField {
    pub id: FieldId,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub options: Option<&'static [FieldOption]>,
    pub placeholder: Option<&'static str>,
}

/// Expected structure of one part of the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSection {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportType {
    pub id: ReportTypeId,
    pub name: &'static str,
    pub description: &'static str,
    /// Whole currency units; zero marks the free sample.
    pub price: u32,
    pub sections: &'static [ReportSection],
    pub config_fields: &'static [ReportConfigField],
    pub estimated_pages: u32,
    pub generation_time_hint: &'static str,
}

impl ReportType {
    pub fn is_free_sample(&self) -> bool {
        self.price == 0
    }

    pub fn field(&self, id: FieldId) -> Option<&'static ReportConfigField> {
        self.config_fields.iter().find(|field| field.id == id)
    }
}

pub const MIN_COMPARED_COMPANIES: usize = 2;
pub const MAX_COMPARED_COMPANIES: usize = 5;
pub const MIN_TOPIC_CHARS: usize = 10;

pub const SECTORS: &[FieldOption] = &[
    FieldOption { value: "launch-services", label: "Launch Services" },
    FieldOption { value: "satellite-manufacturing", label: "Satellite Manufacturing" },
    FieldOption { value: "satellite-communications", label: "Satellite Communications" },
    FieldOption { value: "earth-observation", label: "Earth Observation" },
    FieldOption { value: "positioning-navigation-timing", label: "Positioning, Navigation & Timing" },
    FieldOption { value: "space-infrastructure", label: "Space Infrastructure" },
    FieldOption { value: "in-space-services", label: "In-Space Services" },
    FieldOption { value: "ground-segment", label: "Ground Segment" },
    FieldOption { value: "space-exploration", label: "Space Exploration" },
    FieldOption { value: "defense-and-security", label: "Defense & Security" },
];

pub fn sector_label(value: &str) -> Option<&'static str> {
    SECTORS
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.label)
}

const SECTOR_FIELD: ReportConfigField = ReportConfigField {
    id: FieldId::Sector,
    label: "Sector",
    kind: FieldKind::SingleSelect,
    required: true,
    min: None,
    max: None,
    options: Some(SECTORS),
    placeholder: Some("Select a sector"),
};

const COMPANY_FIELD: ReportConfigField = ReportConfigField {
    id: FieldId::Company,
    label: "Company",
    kind: FieldKind::EntityTypeahead,
    required: true,
    min: None,
    max: None,
    options: None,
    placeholder: Some("Search for a company"),
};

const COMPANIES_FIELD: ReportConfigField = ReportConfigField {
    id: FieldId::Companies,
    label: "Companies to compare",
    kind: FieldKind::MultiSelect,
    required: true,
    min: Some(MIN_COMPARED_COMPANIES),
    max: Some(MAX_COMPARED_COMPANIES),
    options: None,
    placeholder: Some("Search and add 2-5 companies"),
};

const TOPIC_FIELD: ReportConfigField = ReportConfigField {
    id: FieldId::Topic,
    label: "Market or opportunity",
    kind: FieldKind::FreeText,
    required: true,
    min: Some(MIN_TOPIC_CHARS),
    max: None,
    options: None,
    placeholder: Some("e.g. LEO broadband for maritime customers"),
};

const fn section(id: &'static str, title: &'static str, description: &'static str) -> ReportSection {
    ReportSection { id, title, description }
}

static REPORT_TYPES: &[ReportType] = &[
    ReportType {
        id: ReportTypeId::SectorOverview,
        name: "Sector Overview",
        description: "A broad look at one industry sector: market size, key players, funding activity and where it is heading.",
        price: 0,
        sections: &[
            section("market-overview", "Market Overview", "Definition of the sector and its segments"),
            section("market-size", "Market Size & Growth", "Current size, growth rates and forecasts"),
            section("key-players", "Key Players", "Leading companies and their positions"),
            section("funding-landscape", "Funding Landscape", "Recent rounds, investors and capital trends"),
            section("technology-trends", "Technology Trends", "Technologies reshaping the sector"),
            section("regulatory-environment", "Regulatory Environment", "Licensing, spectrum and policy drivers"),
            section("competitive-dynamics", "Competitive Dynamics", "How companies compete and consolidate"),
            section("risks-challenges", "Risks & Challenges", "Structural, technical and market risks"),
            section("outlook", "Five-Year Outlook", "Expected trajectory of the sector"),
            section("recommendations", "Recommendations", "Takeaways for investors and operators"),
        ],
        config_fields: &[SECTOR_FIELD],
        estimated_pages: 12,
        generation_time_hint: "about 1 minute",
    },
    ReportType {
        id: ReportTypeId::CompanyDeepDive,
        name: "Company Deep Dive",
        description: "An in-depth profile of a single company: business model, products, funding history and competitive position.",
        price: 49,
        sections: &[
            section("company-overview", "Company Overview", "History, mission and headquarters"),
            section("business-model", "Business Model", "How the company makes money"),
            section("products-services", "Products & Services", "Offerings and their maturity"),
            section("financials-funding", "Financials & Funding", "Funding rounds, investors and revenue signals"),
            section("leadership", "Leadership Team", "Founders and key executives"),
            section("competitive-position", "Competitive Position", "Peers and differentiation"),
            section("swot", "SWOT Analysis", "Strengths, weaknesses, opportunities and threats"),
            section("outlook", "Outlook", "Milestones to watch"),
        ],
        config_fields: &[COMPANY_FIELD],
        estimated_pages: 15,
        generation_time_hint: "1-2 minutes",
    },
    ReportType {
        id: ReportTypeId::CompetitiveAnalysis,
        name: "Competitive Analysis",
        description: "A side-by-side comparison of two to five companies across capabilities, funding and market positioning.",
        price: 79,
        sections: &[
            section("landscape-overview", "Landscape Overview", "Context for the compared companies"),
            section("company-profiles", "Company Profiles", "Short profile of each company"),
            section("capability-comparison", "Capability Comparison", "Products and technology side by side"),
            section("funding-comparison", "Funding Comparison", "Capital raised and investor base"),
            section("market-positioning", "Market Positioning", "Target customers and pricing"),
            section("strengths-weaknesses", "Strengths & Weaknesses", "Relative advantages of each company"),
            section("strategic-outlook", "Strategic Outlook", "Likely moves and winners"),
        ],
        config_fields: &[COMPANIES_FIELD],
        estimated_pages: 18,
        generation_time_hint: "2-3 minutes",
    },
    ReportType {
        id: ReportTypeId::MarketEntryBrief,
        name: "Market Entry Brief",
        description: "A focused brief on entering a specific market: sizing, customers, competitors, barriers and go-to-market options.",
        price: 99,
        sections: &[
            section("opportunity-summary", "Opportunity Summary", "The opportunity in one page"),
            section("market-sizing", "Market Sizing", "TAM, SAM and SOM estimates"),
            section("customer-segments", "Customer Segments", "Who buys and why"),
            section("competitive-landscape", "Competitive Landscape", "Incumbents and new entrants"),
            section("entry-barriers", "Barriers to Entry", "Capital, regulatory and technical hurdles"),
            section("regulatory-considerations", "Regulatory Considerations", "Licences and compliance"),
            section("go-to-market", "Go-to-Market Strategy", "Channels, partners and pricing"),
            section("risk-assessment", "Risk Assessment", "Key risks and mitigations"),
        ],
        config_fields: &[TOPIC_FIELD],
        estimated_pages: 14,
        generation_time_hint: "1-2 minutes",
    },
];

/// All report types in display order.
pub fn catalog() -> &'static [ReportType] {
    REPORT_TYPES
}

pub fn report_type(id: ReportTypeId) -> Option<&'static ReportType> {
    REPORT_TYPES.iter().find(|report_type| report_type.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_has_exactly_one_entry() {
        for id in ReportTypeId::ALL {
            let count = catalog().iter().filter(|t| t.id == id).count();
            assert_eq!(count, 1, "{id}");
        }
        assert_eq!(catalog().len(), ReportTypeId::ALL.len());
    }

    #[test]
    fn ids_parse_from_their_string_form() {
        for id in ReportTypeId::ALL {
            assert_eq!(id.as_str().parse::<ReportTypeId>(), Ok(id));
        }
        assert_eq!(
            "weather-report".parse::<ReportTypeId>(),
            Err(UnknownReportType("weather-report".to_string()))
        );
    }

    #[test]
    fn sector_overview_is_the_free_sample_with_ten_sections() {
        let sector = report_type(ReportTypeId::SectorOverview).unwrap();
        assert!(sector.is_free_sample());
        assert_eq!(sector.sections.len(), 10);
        assert!(catalog()
            .iter()
            .filter(|t| t.id != ReportTypeId::SectorOverview)
            .all(|t| !t.is_free_sample()));
    }

    #[test]
    fn section_ids_are_unique_per_type() {
        for report_type in catalog() {
            let mut ids: Vec<_> = report_type.sections.iter().map(|s| s.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), report_type.sections.len(), "{}", report_type.id);
        }
    }

    #[test]
    fn competitive_analysis_bounds_company_count() {
        let field = report_type(ReportTypeId::CompetitiveAnalysis)
            .and_then(|t| t.field(FieldId::Companies))
            .unwrap();
        assert_eq!(field.min, Some(2));
        assert_eq!(field.max, Some(5));
        assert_eq!(field.kind, FieldKind::MultiSelect);
    }

    #[test]
    fn sector_labels_resolve() {
        assert_eq!(sector_label("launch-services"), Some("Launch Services"));
        assert_eq!(sector_label("underwater-basket-weaving"), None);
    }
}
