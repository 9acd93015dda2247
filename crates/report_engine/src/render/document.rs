use chrono::{DateTime, Utc};

use report_core::{section_anchors, toc, GeneratedReport, TocEntry};

use super::html::{blocks_to_html, escape_html};
use super::{render_body, Block};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    /// Stable anchor; matches the TOC entry id.
    pub id: String,
    pub title: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub title: String,
    pub subtitle: String,
    pub generated_at: DateTime<Utc>,
    pub executive_summary: Vec<Block>,
    pub methodology: Vec<Block>,
    pub toc: Vec<TocEntry>,
    pub sections: Vec<RenderedSection>,
}

pub fn render_report(report: &GeneratedReport) -> RenderedDocument {
    let sections = report
        .sections
        .iter()
        .zip(section_anchors(&report.sections))
        .map(|(section, id)| RenderedSection {
            id,
            title: section.title.clone(),
            blocks: render_body(&section.content),
        })
        .collect();

    RenderedDocument {
        title: report.title.clone(),
        subtitle: report.subtitle.clone(),
        generated_at: report.generated_at,
        executive_summary: render_body(&report.executive_summary),
        methodology: render_body(&report.methodology),
        toc: toc(report),
        sections,
    }
}

const PRINT_STYLE: &str = "\
body { font-family: Georgia, serif; max-width: 46rem; margin: 2rem auto; line-height: 1.5; color: #1a1a1a; }
header { border-bottom: 2px solid #1a1a1a; margin-bottom: 1.5rem; }
nav ol { padding-left: 1.2rem; }
blockquote { border-left: 3px solid #888; margin-left: 0; padding-left: 1rem; color: #444; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid #bbb; padding: 0.3rem 0.5rem; text-align: left; }
section { margin-top: 2rem; }
@media print { nav { page-break-after: always; } section { page-break-before: always; } a { color: inherit; text-decoration: none; } }
";

impl RenderedDocument {
    /// A standalone page suitable for printing, with a linked table of contents.
    pub fn to_html(&self) -> String {
        let title = escape_html(&self.title);
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{title}</title>\n<style>\n{PRINT_STYLE}</style>\n"));
        out.push_str("</head>\n<body>\n<header>\n");
        out.push_str(&format!("<h1>{title}</h1>\n"));
        if !self.subtitle.trim().is_empty() {
            out.push_str(&format!(
                "<p class=\"subtitle\">{}</p>\n",
                escape_html(&self.subtitle)
            ));
        }
        out.push_str(&format!(
            "<p class=\"generated\">Generated {}</p>\n</header>\n",
            self.generated_at.format("%B %-d, %Y")
        ));

        if !self.toc.is_empty() {
            out.push_str("<nav>\n<h2>Contents</h2>\n<ol>\n");
            for entry in &self.toc {
                out.push_str(&format!(
                    "<li><a href=\"#{}\">{}</a></li>\n",
                    escape_html(&entry.id),
                    escape_html(&entry.title)
                ));
            }
            out.push_str("</ol>\n</nav>\n");
        }

        push_named_section(&mut out, "executive-summary", "Executive Summary", &self.executive_summary);
        push_named_section(&mut out, "methodology", "Methodology", &self.methodology);
        for section in &self.sections {
            out.push_str(&format!(
                "<section id=\"{}\">\n<h2>{}</h2>\n",
                escape_html(&section.id),
                escape_html(&section.title)
            ));
            out.push_str(&blocks_to_html(&section.blocks));
            out.push_str("</section>\n");
        }
        out.push_str("</body>\n</html>\n");
        out
    }
}

fn push_named_section(out: &mut String, id: &str, title: &str, blocks: &[Block]) {
    if blocks.is_empty() {
        return;
    }
    out.push_str(&format!("<section id=\"{id}\">\n<h2>{title}</h2>\n"));
    out.push_str(&blocks_to_html(blocks));
    out.push_str("</section>\n");
}
