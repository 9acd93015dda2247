use super::{Block, Inline, Table};

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn blocks_to_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        write_block(block, &mut out);
    }
    out
}

fn write_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            // h1 is the document title and h2 the section title.
            let tag = format!("h{}", (*level).clamp(1, 3) + 2);
            wrap(&tag, content, out);
        }
        Block::Paragraph(content) => wrap("p", content, out),
        Block::Quote(content) => {
            out.push_str("<blockquote>");
            wrap("p", content, out);
            out.push_str("</blockquote>\n");
        }
        Block::Rule => out.push_str("<hr>\n"),
        Block::UnorderedList(items) => write_list("ul", items, out),
        Block::OrderedList(items) => write_list("ol", items, out),
        Block::Table(table) => write_table(table, out),
    }
}

fn wrap(tag: &str, content: &[Inline], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    write_inline(content, out);
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}

fn write_list(tag: &str, items: &[Vec<Inline>], out: &mut String) {
    out.push_str(&format!("<{tag}>\n"));
    for item in items {
        out.push_str("<li>");
        write_inline(item, out);
        out.push_str("</li>\n");
    }
    out.push_str(&format!("</{tag}>\n"));
}

fn write_table(table: &Table, out: &mut String) {
    out.push_str("<table>\n<thead><tr>");
    for cell in &table.header {
        out.push_str("<th>");
        write_inline(cell, out);
        out.push_str("</th>");
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            write_inline(cell, out);
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

fn write_inline(nodes: &[Inline], out: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Strong(children) => {
                out.push_str("<strong>");
                write_inline(children, out);
                out.push_str("</strong>");
            }
            Inline::Emphasis(children) => {
                out.push_str("<em>");
                write_inline(children, out);
                out.push_str("</em>");
            }
            Inline::StrongEmphasis(children) => {
                out.push_str("<strong><em>");
                write_inline(children, out);
                out.push_str("</em></strong>");
            }
        }
    }
}
