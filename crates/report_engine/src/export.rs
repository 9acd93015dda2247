use std::path::{Path, PathBuf};

use report_core::GeneratedReport;
use report_logging::report_info;

use crate::filename::export_filename;
use crate::persist::{write_atomic, PersistError};
use crate::render::render_report;

/// Renders `report` to a printable HTML page under `output_dir` and returns
/// the written path.
pub fn export_report(report: &GeneratedReport, output_dir: &Path) -> Result<PathBuf, PersistError> {
    let document = render_report(report);
    let html = document.to_html();
    let filename = export_filename(&report.title, report.generated_at);
    let path = write_atomic(output_dir, &filename, html.as_bytes())?;
    report_info!("Exported '{}' to {}", report.title, path.display());
    Ok(path)
}
