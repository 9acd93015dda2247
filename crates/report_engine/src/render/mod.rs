//! Section body renderer.
//!
//! A section body is semi-structured text: `#` headings, `>` quotes, `---`
//! rules, bullet and numbered lists, pipe tables and `*`/`**`/`***`
//! emphasis. Rendering is a chain of small passes:
//!
//! `tokenize` → `classify` → `group_lists` → `detect_tables` → `wrap_paragraphs`
//!
//! The passes work on [`Piece`]s, a mix of still-unplaced lines and finished
//! blocks. Finished blocks pass through every later stage untouched, which
//! keeps each stage idempotent on its own output.
mod block;
mod document;
mod html;
mod inline;

pub use block::{classify, detect_tables, group_lists, tokenize, wrap_paragraphs};
pub use document::{render_report, RenderedDocument, RenderedSection};
pub use html::{blocks_to_html, escape_html};
pub use inline::parse_inline;

/// Inline text with emphasis resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    StrongEmphasis(Vec<Inline>),
}

impl Inline {
    /// Text content with all markup dropped.
    pub fn plain_text(nodes: &[Inline]) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                Inline::Text(text) => out.push_str(text),
                Inline::Strong(children)
                | Inline::Emphasis(children)
                | Inline::StrongEmphasis(children) => out.push_str(&Inline::plain_text(children)),
            }
        }
        out
    }
}

/// One classified source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Heading { level: u8, text: String },
    Quote(String),
    Rule,
    Bullet(String),
    Numbered(String),
    PipeRow(String),
    Blank,
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<Vec<Inline>>,
    pub rows: Vec<Vec<Vec<Inline>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    Quote(Vec<Inline>),
    Rule,
    UnorderedList(Vec<Vec<Inline>>),
    OrderedList(Vec<Vec<Inline>>),
    Table(Table),
}

/// Intermediate pipeline element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Line(Line),
    Block(Block),
}

/// Runs the whole pipeline on one section body.
pub fn render_body(body: &str) -> Vec<Block> {
    let pieces = classify(&tokenize(body));
    wrap_paragraphs(detect_tables(group_lists(pieces)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn emphasis_nests_without_leftover_markers() {
        let blocks = render_body("**Bold** and *italic* and ***both***.");
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                Inline::Strong(vec![text("Bold")]),
                text(" and "),
                Inline::Emphasis(vec![text("italic")]),
                text(" and "),
                Inline::StrongEmphasis(vec![text("both")]),
                text("."),
            ])]
        );
        assert!(!blocks_to_html(&blocks).contains('*'));
    }

    #[test]
    fn empty_body_renders_nothing() {
        assert!(render_body("").is_empty());
        assert!(render_body("\n  \r\n\t\n").is_empty());
    }

    #[test]
    fn mixed_body_keeps_source_order() {
        let body = "## Market Overview\n\
                    Launch demand is rising.\n\
                    \n\
                    - Reusable boosters\n\
                    - Rideshare missions\n\
                    \n\
                    > Capacity is the constraint.\n\
                    ---\n\
                    1. Price\n\
                    2. Cadence";
        let blocks = render_body(body);
        assert_eq!(blocks.len(), 6);
        assert!(matches!(blocks[0], Block::Heading { level: 2, .. }));
        assert!(matches!(blocks[1], Block::Paragraph(_)));
        assert!(matches!(&blocks[2], Block::UnorderedList(items) if items.len() == 2));
        assert!(matches!(blocks[3], Block::Quote(_)));
        assert_eq!(blocks[4], Block::Rule);
        assert!(matches!(&blocks[5], Block::OrderedList(items) if items.len() == 2));
    }

    #[test]
    fn plain_text_flattens_markup() {
        let nodes = parse_inline("a **b *c* d** e");
        assert_eq!(Inline::plain_text(&nodes), "a b c d e");
    }
}
