use serde::{Deserialize, Serialize};

use crate::catalog::ReportTypeId;
use crate::selection::{MultiSelection, SingleSelection};

/// Type-specific generation parameters.
///
/// Serialized without a tag so each variant produces exactly the keys the
/// generation service expects for its report type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportConfig {
    SectorOverview {
        sector: String,
    },
    CompanyDeepDive {
        #[serde(rename = "companySlug")]
        company_slug: String,
    },
    CompetitiveAnalysis {
        #[serde(rename = "companySlugs")]
        company_slugs: Vec<String>,
    },
    MarketEntryBrief {
        topic: String,
    },
}

impl ReportConfig {
    pub fn report_type(&self) -> ReportTypeId {
        match self {
            ReportConfig::SectorOverview { .. } => ReportTypeId::SectorOverview,
            ReportConfig::CompanyDeepDive { .. } => ReportTypeId::CompanyDeepDive,
            ReportConfig::CompetitiveAnalysis { .. } => ReportTypeId::CompetitiveAnalysis,
            ReportConfig::MarketEntryBrief { .. } => ReportTypeId::MarketEntryBrief,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub report_type: ReportTypeId,
    pub config: ReportConfig,
}

/// Raw configuration input as edited on the configuration screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigForm {
    pub sector: String,
    pub company: SingleSelection,
    pub companies: MultiSelection,
    pub topic: String,
}

impl ConfigForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
