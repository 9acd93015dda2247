use super::inline::parse_inline;
use super::{Block, Inline, Line, Piece, Table};

/// Splits a body into lines, tolerating CRLF and trailing whitespace.
pub fn tokenize(body: &str) -> Vec<&str> {
    body.lines().map(str::trim_end).collect()
}

pub fn classify(lines: &[&str]) -> Vec<Piece> {
    lines
        .iter()
        .map(|line| Piece::Line(classify_line(line)))
        .collect()
}

fn classify_line(line: &str) -> Line {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if let Some(heading) = heading(trimmed) {
        return heading;
    }
    if trimmed == ">" {
        return Line::Quote(String::new());
    }
    if let Some(rest) = trimmed.strip_prefix("> ") {
        return Line::Quote(rest.trim().to_string());
    }
    if is_rule(trimmed) {
        return Line::Rule;
    }
    if let Some(rest) = ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
    {
        return Line::Bullet(rest.trim().to_string());
    }
    if let Some(rest) = numbered_item(trimmed) {
        return Line::Numbered(rest.trim().to_string());
    }
    if trimmed.starts_with('|') {
        return Line::PipeRow(trimmed.to_string());
    }
    Line::Text(trimmed.to_string())
}

fn heading(line: &str) -> Option<Line> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?;
    Some(Line::Heading {
        level: hashes.min(3) as u8,
        text: text.trim().to_string(),
    })
}

fn is_rule(line: &str) -> bool {
    let compact: Vec<char> = line.chars().filter(|c| *c != ' ').collect();
    compact.len() >= 3
        && matches!(compact[0], '-' | '*' | '_')
        && compact.iter().all(|c| *c == compact[0])
}

fn numbered_item(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") "))
}

/// Folds each unbroken run of bullet lines into one unordered list and each
/// run of numbered lines into one ordered list. Anything already grouped
/// passes through.
pub fn group_lists(pieces: Vec<Piece>) -> Vec<Piece> {
    let mut out = Vec::with_capacity(pieces.len());
    let mut bullets: Vec<Vec<Inline>> = Vec::new();
    let mut numbered: Vec<Vec<Inline>> = Vec::new();

    for piece in pieces {
        match piece {
            Piece::Line(Line::Bullet(text)) => {
                flush(&mut numbered, Block::OrderedList, &mut out);
                bullets.push(parse_inline(&text));
            }
            Piece::Line(Line::Numbered(text)) => {
                flush(&mut bullets, Block::UnorderedList, &mut out);
                numbered.push(parse_inline(&text));
            }
            other => {
                flush(&mut bullets, Block::UnorderedList, &mut out);
                flush(&mut numbered, Block::OrderedList, &mut out);
                out.push(other);
            }
        }
    }
    flush(&mut bullets, Block::UnorderedList, &mut out);
    flush(&mut numbered, Block::OrderedList, &mut out);
    out
}

fn flush(
    items: &mut Vec<Vec<Inline>>,
    make: fn(Vec<Vec<Inline>>) -> Block,
    out: &mut Vec<Piece>,
) {
    if !items.is_empty() {
        out.push(Piece::Block(make(std::mem::take(items))));
    }
}

/// Turns `header | separator | rows...` runs of pipe rows into tables. Runs
/// that lack a separator or body rows are left for paragraph wrapping.
pub fn detect_tables(pieces: Vec<Piece>) -> Vec<Piece> {
    let mut out = Vec::with_capacity(pieces.len());
    let mut index = 0;
    while index < pieces.len() {
        match table_at(&pieces[index..]) {
            Some((table, consumed)) => {
                out.push(Piece::Block(Block::Table(table)));
                index += consumed;
            }
            None => {
                out.push(pieces[index].clone());
                index += 1;
            }
        }
    }
    out
}

fn table_at(pieces: &[Piece]) -> Option<(Table, usize)> {
    let [Piece::Line(Line::PipeRow(header)), Piece::Line(Line::PipeRow(separator)), rest @ ..] =
        pieces
    else {
        return None;
    };
    if !is_separator(separator) || is_separator(header) {
        return None;
    }
    let body: Vec<&str> = rest
        .iter()
        .map_while(|piece| match piece {
            Piece::Line(Line::PipeRow(row)) => Some(row.as_str()),
            _ => None,
        })
        .collect();
    if body.is_empty() {
        return None;
    }

    let header_cells = split_cells(header);
    let width = header_cells.len();
    if width == 0 {
        return None;
    }
    let rows = body
        .iter()
        .filter(|row| !is_separator(row))
        .map(|row| {
            let mut cells = split_cells(row);
            cells.resize(width, "");
            cells.into_iter().map(parse_inline).collect()
        })
        .collect();
    let table = Table {
        header: header_cells.into_iter().map(parse_inline).collect(),
        rows,
    };
    Some((table, 2 + body.len()))
}

fn is_separator(row: &str) -> bool {
    row.contains('-') && row.chars().all(|c| matches!(c, '-' | '|' | ':' | ' '))
}

fn split_cells(row: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = row.trim().split('|').map(str::trim).collect();
    if cells.first().is_some_and(|cell| cell.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}

/// Final pass: every line still unplaced becomes its own block. Blank lines
/// only separate and are dropped here.
pub fn wrap_paragraphs(pieces: Vec<Piece>) -> Vec<Block> {
    pieces
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Block(block) => Some(block),
            Piece::Line(line) => line_block(line),
        })
        .collect()
}

fn line_block(line: Line) -> Option<Block> {
    let block = match line {
        Line::Blank => return None,
        Line::Heading { level, text } => Block::Heading {
            level,
            content: parse_inline(&text),
        },
        Line::Quote(text) => Block::Quote(parse_inline(&text)),
        Line::Rule => Block::Rule,
        Line::Bullet(text) => Block::UnorderedList(vec![parse_inline(&text)]),
        Line::Numbered(text) => Block::OrderedList(vec![parse_inline(&text)]),
        Line::PipeRow(text) | Line::Text(text) => Block::Paragraph(parse_inline(&text)),
    };
    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    fn lines(body: &str) -> Vec<Line> {
        classify(&tokenize(body))
            .into_iter()
            .map(|piece| match piece {
                Piece::Line(line) => line,
                Piece::Block(block) => panic!("classify produced a block: {block:?}"),
            })
            .collect()
    }

    fn tables(body: &str) -> Vec<Table> {
        detect_tables(classify(&tokenize(body)))
            .into_iter()
            .filter_map(|piece| match piece {
                Piece::Block(Block::Table(table)) => Some(table),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn tokenize_handles_crlf_and_trailing_space() {
        assert_eq!(tokenize("a  \r\nb\t\r\n\r\nc"), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn classify_recognises_each_marker() {
        let body = "# One\n## Two\n### Three\n#### Deep\n#hashtag\n> quoted\n---\n* * *\n___\n- dash\n* star\n1. first\n12) twelfth\n| a | b |\n\nplain";
        assert_eq!(
            lines(body),
            vec![
                Line::Heading { level: 1, text: "One".into() },
                Line::Heading { level: 2, text: "Two".into() },
                Line::Heading { level: 3, text: "Three".into() },
                Line::Heading { level: 3, text: "Deep".into() },
                Line::Text("#hashtag".into()),
                Line::Quote("quoted".into()),
                Line::Rule,
                Line::Rule,
                Line::Rule,
                Line::Bullet("dash".into()),
                Line::Bullet("star".into()),
                Line::Numbered("first".into()),
                Line::Numbered("twelfth".into()),
                Line::PipeRow("| a | b |".into()),
                Line::Blank,
                Line::Text("plain".into()),
            ]
        );
    }

    #[test]
    fn emphasis_lines_are_not_bullets() {
        assert_eq!(
            lines("**Key finding:** growth\n*aside*"),
            vec![
                Line::Text("**Key finding:** growth".into()),
                Line::Text("*aside*".into()),
            ]
        );
    }

    #[test]
    fn runs_are_grouped_and_blank_lines_split_them() {
        let grouped = group_lists(classify(&tokenize("- a\n- b\n\n- c\n1. x\n2. y")));
        assert_eq!(
            grouped,
            vec![
                Piece::Block(Block::UnorderedList(vec![vec![text("a")], vec![text("b")]])),
                Piece::Line(Line::Blank),
                Piece::Block(Block::UnorderedList(vec![vec![text("c")]])),
                Piece::Block(Block::OrderedList(vec![vec![text("x")], vec![text("y")]])),
            ]
        );
    }

    #[test]
    fn grouping_is_idempotent() {
        let once = group_lists(classify(&tokenize("- a\n- b\ntext\n1. x")));
        let twice = group_lists(once.clone());
        assert_eq!(once, twice);
        let blocks = wrap_paragraphs(twice);
        assert!(matches!(&blocks[0], Block::UnorderedList(items) if items.len() == 2));
    }

    #[test]
    fn table_has_one_header_and_n_rows() {
        let found = tables("| Company | Funding |\n|---|:---:|\n| A | $1B |\n| B | $2B |\n| C | $3B |");
        assert_eq!(found.len(), 1);
        let table = &found[0];
        assert_eq!(table.header, vec![vec![text("Company")], vec![text("Funding")]]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[2], vec![vec![text("C")], vec![text("$3B")]]);
    }

    #[test]
    fn mismatched_rows_are_padded_or_truncated() {
        let found = tables("| a | b | c |\n|---|---|---|\n| 1 |\n| 1 | 2 | 3 | 4 |");
        let table = &found[0];
        assert_eq!(table.rows[0], vec![vec![text("1")], vec![], vec![]]);
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn rows_without_separator_become_paragraphs() {
        let pieces = detect_tables(classify(&tokenize("| a | b |\n| 1 | 2 |")));
        let blocks = wrap_paragraphs(pieces);
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![text("| a | b |")]),
                Block::Paragraph(vec![text("| 1 | 2 |")]),
            ]
        );
    }

    #[test]
    fn header_and_separator_alone_is_not_a_table() {
        assert!(tables("| a | b |\n|---|---|\nafter").is_empty());
    }

    #[test]
    fn table_ends_at_first_non_row() {
        let pieces = detect_tables(classify(&tokenize("| a |\n|---|\n| 1 |\ntrailing")));
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[1], Piece::Line(Line::Text("trailing".into())));
    }
}
