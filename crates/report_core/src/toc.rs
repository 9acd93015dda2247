use std::collections::HashSet;

use crate::report::{GeneratedReport, GeneratedSection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
}

/// Anchors for `sections`, one per section in order. A section's own id is
/// used when present and blank ids fall back to `section-{n}`. Repeats get
/// `-2`, `-3`, ... appended so every anchor is unique.
pub fn section_anchors(sections: &[GeneratedSection]) -> Vec<String> {
    let mut seen = HashSet::new();
    sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let id = section.id.trim();
            let base = if id.is_empty() {
                format!("section-{}", index + 1)
            } else {
                id.to_string()
            };
            let mut anchor = base.clone();
            let mut repeat = 1;
            while !seen.insert(anchor.clone()) {
                repeat += 1;
                anchor = format!("{base}-{repeat}");
            }
            anchor
        })
        .collect()
}

/// Table of contents in the order the sections were returned.
pub fn toc(report: &GeneratedReport) -> Vec<TocEntry> {
    report
        .sections
        .iter()
        .zip(section_anchors(&report.sections))
        .map(|(section, id)| TocEntry {
            id,
            title: section.title.clone(),
        })
        .collect()
}
