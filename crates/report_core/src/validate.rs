use crate::catalog::{
    sector_label, FieldId, ReportConfigField, ReportType, ReportTypeId, MAX_COMPARED_COMPANIES,
    MIN_COMPARED_COMPANIES, MIN_TOPIC_CHARS,
};
use crate::config::{ConfigForm, GenerationRequest, ReportConfig};

/// A pre-flight problem with the configuration input. `Display` is the
/// message shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a sector")]
    MissingSector,
    #[error("Unknown sector: {0}")]
    UnknownSector(String),
    #[error("Please select a company")]
    MissingCompany,
    #[error("Please select at least {min} companies to compare")]
    TooFewCompanies { min: usize, selected: usize },
    #[error("You can compare at most {max} companies")]
    TooManyCompanies { max: usize, selected: usize },
    #[error("Please describe the market in at least {min} characters")]
    TopicTooShort { min: usize, actual: usize },
}

/// Validates `form` against the fields of `report_type` and builds the
/// config for that type.
pub fn build(report_type: &ReportType, form: &ConfigForm) -> Result<ReportConfig, ValidationError> {
    for field in report_type.config_fields {
        check_field(field, form)?;
    }

    let config = match report_type.id {
        ReportTypeId::SectorOverview => ReportConfig::SectorOverview {
            sector: form.sector.trim().to_string(),
        },
        ReportTypeId::CompanyDeepDive => ReportConfig::CompanyDeepDive {
            company_slug: form
                .company
                .get()
                .map(|entity| entity.slug.clone())
                .ok_or(ValidationError::MissingCompany)?,
        },
        ReportTypeId::CompetitiveAnalysis => ReportConfig::CompetitiveAnalysis {
            company_slugs: form.companies.slugs(),
        },
        ReportTypeId::MarketEntryBrief => ReportConfig::MarketEntryBrief {
            topic: form.topic.trim().to_string(),
        },
    };
    Ok(config)
}

pub fn build_request(
    report_type: &ReportType,
    form: &ConfigForm,
) -> Result<GenerationRequest, ValidationError> {
    let config = build(report_type, form)?;
    Ok(GenerationRequest {
        report_type: report_type.id,
        config,
    })
}

fn check_field(field: &ReportConfigField, form: &ConfigForm) -> Result<(), ValidationError> {
    match field.id {
        FieldId::Sector => {
            let sector = form.sector.trim();
            if sector.is_empty() {
                return Err(ValidationError::MissingSector);
            }
            let known = match field.options {
                Some(options) => options.iter().any(|option| option.value == sector),
                None => sector_label(sector).is_some(),
            };
            if !known {
                return Err(ValidationError::UnknownSector(sector.to_string()));
            }
        }
        FieldId::Company => {
            if form.company.get().is_none() {
                return Err(ValidationError::MissingCompany);
            }
        }
        FieldId::Companies => {
            let min = field.min.unwrap_or(MIN_COMPARED_COMPANIES);
            let max = field.max.unwrap_or(MAX_COMPARED_COMPANIES);
            let selected = form.companies.len();
            if selected < min {
                return Err(ValidationError::TooFewCompanies { min, selected });
            }
            if selected > max {
                return Err(ValidationError::TooManyCompanies { max, selected });
            }
        }
        FieldId::Topic => {
            let min = field.min.unwrap_or(MIN_TOPIC_CHARS);
            let actual = form.topic.trim().chars().count();
            if actual < min {
                return Err(ValidationError::TopicTooShort { min, actual });
            }
        }
    }
    Ok(())
}
