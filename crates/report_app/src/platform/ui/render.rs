use std::fmt::Write;

use report_core::{
    catalog, sector_label, AppViewModel, FieldId, GeneratedReport, Notice, NoticeLevel,
    ProgressView, SearchView, Stage, UsageInfo,
};
use report_engine::render::{render_report, Block, Inline, RenderedSection, Table};

const WIDTH: usize = 78;
const BAR_WIDTH: usize = 24;

pub fn catalog_text() -> String {
    let mut out = String::from("Report types:\n");
    for (index, report_type) in catalog().iter().enumerate() {
        let price = if report_type.is_free_sample() {
            "free sample".to_string()
        } else {
            format!("${}", report_type.price)
        };
        let _ = writeln!(
            out,
            "  {}. {} [{}] ({}, ~{} pages, {})",
            index + 1,
            report_type.name,
            report_type.id,
            price,
            report_type.estimated_pages,
            report_type.generation_time_hint
        );
        for line in wrap(report_type.description, WIDTH - 5) {
            let _ = writeln!(out, "     {line}");
        }
    }
    out.push_str("Use 'select <n>' to configure one.\n");
    out
}

/// Text for the current view. `previous` is the stage shown last time, so a
/// finished document is printed once rather than on every change.
pub fn view_text(view: &AppViewModel, previous: Option<Stage>) -> String {
    match view.stage {
        Stage::Catalog if previous != Some(Stage::Catalog) => catalog_text(),
        Stage::Catalog => String::new(),
        Stage::Configure => configure_text(view),
        Stage::Generating => view
            .progress
            .as_ref()
            .map(progress_line)
            .unwrap_or_default(),
        Stage::Done => match view.document.as_ref() {
            Some(document) if previous != Some(Stage::Done) => {
                document_text(&document.report, document.usage.as_ref())
            }
            Some(document) => document
                .active_section
                .as_deref()
                .map(|id| format!("Active section: {id}\n"))
                .unwrap_or_default(),
            None => String::new(),
        },
    }
}

fn configure_text(view: &AppViewModel) -> String {
    let Some(report_type) = view.report_type else {
        return String::new();
    };
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", report_type.name);
    let preview: Vec<_> = report_type.sections.iter().map(|s| s.title).collect();
    for line in wrap(&format!("Sections: {}", preview.join(", ")), WIDTH) {
        let _ = writeln!(out, "{line}");
    }

    for field in report_type.config_fields {
        match field.id {
            FieldId::Sector => {
                let value = if view.form.sector.is_empty() {
                    "(not set)".to_string()
                } else {
                    sector_label(&view.form.sector)
                        .unwrap_or(view.form.sector.as_str())
                        .to_string()
                };
                let _ = writeln!(out, "{}: {value}", field.label);
                if view.form.sector.is_empty() {
                    for (index, option) in field.options.unwrap_or_default().iter().enumerate() {
                        let _ = writeln!(out, "  {}. {}", index + 1, option.label);
                    }
                }
            }
            FieldId::Company => {
                let value = view
                    .form
                    .company
                    .as_ref()
                    .map(|entity| format!("{} ({})", entity.name, entity.slug))
                    .unwrap_or_else(|| "(none)".to_string());
                let _ = writeln!(out, "{}: {value}", field.label);
                search_block(&view.single_search, &mut out);
            }
            FieldId::Companies => {
                let names: Vec<_> = view
                    .form
                    .companies
                    .iter()
                    .map(|entity| format!("{} ({})", entity.name, entity.slug))
                    .collect();
                let bounds = match (field.min, field.max) {
                    (Some(min), Some(max)) => format!(" [{min}-{max}]"),
                    _ => String::new(),
                };
                let value = if names.is_empty() {
                    "(none)".to_string()
                } else {
                    names.join(", ")
                };
                let _ = writeln!(out, "{}{bounds}: {value}", field.label);
                search_block(&view.multi_search, &mut out);
            }
            FieldId::Topic => {
                let value = if view.form.topic.is_empty() {
                    field.placeholder.unwrap_or("(empty)")
                } else {
                    view.form.topic.as_str()
                };
                let _ = writeln!(out, "{}: {value}", field.label);
            }
        }
    }

    if let Some(error) = &view.form.error {
        let _ = writeln!(out, "! {error}");
    }
    out
}

fn search_block(search: &SearchView, out: &mut String) {
    if search.pending {
        let _ = writeln!(out, "  searching for '{}'...", search.query);
        return;
    }
    for (index, entity) in search.results.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} ({}) {} {}",
            index + 1,
            entity.name,
            entity.slug,
            entity.sector,
            entity.tier
        );
    }
    if !search.query.is_empty() && search.results.is_empty() {
        let _ = writeln!(out, "  no matches for '{}'", search.query);
    }
}

pub fn progress_line(progress: &ProgressView) -> String {
    let filled = usize::from(progress.percent) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%  {} ({}/{})\n",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        progress.percent,
        progress.message,
        progress.index + 1,
        progress.total
    )
}

pub fn document_text(report: &GeneratedReport, usage: Option<&UsageInfo>) -> String {
    let document = render_report(report);
    let mut out = String::new();
    let _ = writeln!(out, "{}", document.title);
    let _ = writeln!(out, "{}", "=".repeat(document.title.chars().count().min(WIDTH)));
    if !document.subtitle.is_empty() {
        let _ = writeln!(out, "{}", document.subtitle);
    }
    let _ = writeln!(out, "Generated {}", document.generated_at.format("%Y-%m-%d %H:%M UTC"));
    if let Some(usage) = usage {
        let _ = writeln!(out, "Usage: {} of {} ({})", usage.used, usage.limit, usage.tier);
    }
    out.push('\n');

    if !document.executive_summary.is_empty() {
        out.push_str("Executive Summary\n-----------------\n");
        out.push_str(&blocks_text(&document.executive_summary));
        out.push('\n');
    }
    if !document.methodology.is_empty() {
        out.push_str("Methodology\n-----------\n");
        out.push_str(&blocks_text(&document.methodology));
        out.push('\n');
    }
    for (index, section) in document.sections.iter().enumerate() {
        out.push_str(&rendered_section_text(index, section));
        out.push('\n');
    }
    out.push_str("Commands: toc, goto <n>, print, share, new, back\n");
    out
}

/// One section of `report`, or `None` when no section has that anchor.
pub fn section_text(report: &GeneratedReport, section_id: &str) -> Option<String> {
    let document = render_report(report);
    document
        .sections
        .iter()
        .enumerate()
        .find(|(_, section)| section.id == section_id)
        .map(|(index, section)| rendered_section_text(index, section))
}

fn rendered_section_text(index: usize, section: &RenderedSection) -> String {
    let heading = format!("{}. {}", index + 1, section.title);
    let mut out = format!("{heading}\n{}\n", "-".repeat(heading.chars().count().min(WIDTH)));
    out.push_str(&blocks_text(&section.blocks));
    out
}

pub fn toc_text(view: &AppViewModel) -> String {
    let Some(document) = view.document.as_ref() else {
        return "No report yet.\n".to_string();
    };
    let mut out = String::from("Contents:\n");
    for (index, entry) in document.toc.iter().enumerate() {
        let marker = if document.active_section.as_deref() == Some(entry.id.as_str()) {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(out, "{marker} {}. {} [{}]", index + 1, entry.title, entry.id);
    }
    out
}

pub fn notice_line(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "done",
        NoticeLevel::Warning => "warn",
        NoticeLevel::Error => "error",
    };
    format!("[{tag}] {}", notice.text)
}

pub fn blocks_text(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Heading { level, content } => {
                let text = Inline::plain_text(content);
                match level {
                    1 => {
                        let _ = writeln!(out, "{}", text.to_uppercase());
                    }
                    2 => {
                        let _ = writeln!(out, "{text}\n{}", "~".repeat(text.chars().count()));
                    }
                    _ => {
                        let _ = writeln!(out, "> {text}");
                    }
                }
            }
            Block::Paragraph(content) => {
                for line in wrap(&Inline::plain_text(content), WIDTH) {
                    let _ = writeln!(out, "{line}");
                }
            }
            Block::Quote(content) => {
                for line in wrap(&Inline::plain_text(content), WIDTH - 4) {
                    let _ = writeln!(out, "  | {line}");
                }
            }
            Block::Rule => {
                let _ = writeln!(out, "{}", "-".repeat(40));
            }
            Block::UnorderedList(items) => {
                for item in items {
                    list_item("  * ", &Inline::plain_text(item), &mut out);
                }
            }
            Block::OrderedList(items) => {
                for (index, item) in items.iter().enumerate() {
                    list_item(&format!("  {}. ", index + 1), &Inline::plain_text(item), &mut out);
                }
            }
            Block::Table(table) => table_text(table, &mut out),
        }
    }
    out
}

fn list_item(marker: &str, text: &str, out: &mut String) {
    let indent = " ".repeat(marker.chars().count());
    for (index, line) in wrap(text, WIDTH - indent.len()).into_iter().enumerate() {
        let prefix = if index == 0 { marker } else { indent.as_str() };
        let _ = writeln!(out, "{prefix}{line}");
    }
}

fn table_text(table: &Table, out: &mut String) {
    let header: Vec<String> = table.header.iter().map(|cell| Inline::plain_text(cell)).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| Inline::plain_text(cell)).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in &rows {
        for (column, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(column) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("  {}", padded.join(" | ")).trim_end().to_string()
    };
    let _ = writeln!(out, "{}", line(&header));
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let _ = writeln!(out, "  {}", rule.join("-+-"));
    for row in &rows {
        let _ = writeln!(out, "{}", line(row));
    }
}

/// Greedy word wrap; words longer than `width` get their own line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use report_core::{update, AppState, GeneratedSection, Msg, ReportTypeId};

    fn report() -> GeneratedReport {
        GeneratedReport {
            title: "Launch Services".to_string(),
            subtitle: String::new(),
            generated_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            executive_summary: "**Demand** is up.".to_string(),
            methodology: String::new(),
            sections: vec![
                GeneratedSection {
                    id: "players".to_string(),
                    title: "Key Players".to_string(),
                    content: "| Company | Flights |\n|---|---|\n| Rocket Lab | 16 |\n| Firefly | 2 |"
                        .to_string(),
                },
                GeneratedSection {
                    id: "risks".to_string(),
                    title: "Risks".to_string(),
                    content: "- Cadence\n- Pricing".to_string(),
                },
            ],
        }
    }

    #[test]
    fn wrap_respects_width() {
        assert_eq!(
            wrap("alpha beta gamma delta", 11),
            vec!["alpha beta", "gamma delta"]
        );
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn tables_are_aligned() {
        let text = section_text(&report(), "players").unwrap();
        assert!(text.contains("  Company    | Flights\n"));
        assert!(text.contains("  Rocket Lab | 16\n"));
        assert!(text.contains("  Firefly    | 2\n"));
    }

    #[test]
    fn repeated_section_ids_are_reachable() {
        let mut report = report();
        report.sections[1].id = "players".to_string();
        let text = section_text(&report, "players-2").unwrap();
        assert!(text.starts_with("2. Risks"));
    }

    #[test]
    fn document_drops_markup_and_lists_sections() {
        let text = document_text(&report(), None);
        assert!(text.contains("Demand is up."));
        assert!(!text.contains("**"));
        assert!(text.contains("2. Risks"));
        assert!(text.contains("  * Cadence"));
        assert!(section_text(&report(), "missing").is_none());
    }

    #[test]
    fn catalog_prints_once_per_visit() {
        let view = AppState::new().view();
        assert!(view_text(&view, None).contains("Report types:"));
        assert!(view_text(&view, Some(Stage::Catalog)).is_empty());
    }

    #[test]
    fn configure_shows_form_and_errors() {
        let (state, _) = update(
            AppState::new(),
            Msg::ReportTypeSelected(ReportTypeId::MarketEntryBrief),
        );
        let (state, _) = update(state, Msg::TopicChanged("AI".to_string()));
        let (state, _) = update(state, Msg::GenerateClicked);
        let text = view_text(&state.view(), Some(Stage::Configure));
        assert!(text.contains("Market or opportunity: AI"));
        assert!(text.contains("! Please describe the market in at least 10 characters"));
    }

    #[test]
    fn progress_bar_tracks_percent() {
        let line = progress_line(&ProgressView {
            index: 2,
            total: 6,
            message: "Analyzing",
            percent: 50,
        });
        assert!(line.starts_with("[############............]  50%  Analyzing (3/6)"));
    }
}
