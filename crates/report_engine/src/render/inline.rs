use std::sync::LazyLock;

use regex::Regex;

use super::Inline;

static DELIMITER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*+").expect("valid pattern"));

enum Item {
    Node(Inline),
    Delim(Delimiter),
}

/// A run of `*`. A run opens when text follows it and closes when text
/// precedes it, so `2 * 3 * 4` stays literal.
struct Delimiter {
    count: usize,
    can_open: bool,
    can_close: bool,
}

/// Resolves emphasis markers. Each closing run pairs with the nearest open
/// run before it, taking two markers when both sides have them and one
/// otherwise, so spans nest inside each other. Markers without a partner
/// stay in the text as written.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut items = tokenize(text);
    resolve(&mut items);
    into_inlines(items)
}

fn tokenize(text: &str) -> Vec<Item> {
    let mut items = Vec::new();
    let mut last = 0;
    for run in DELIMITER_RUN.find_iter(text) {
        if run.start() > last {
            items.push(Item::Node(Inline::Text(text[last..run.start()].to_string())));
        }
        let before = text[..run.start()].chars().next_back();
        let after = text[run.end()..].chars().next();
        items.push(Item::Delim(Delimiter {
            count: run.len(),
            can_open: after.is_some_and(|c| !c.is_whitespace()),
            can_close: before.is_some_and(|c| !c.is_whitespace()),
        }));
        last = run.end();
    }
    if last < text.len() {
        items.push(Item::Node(Inline::Text(text[last..].to_string())));
    }
    items
}

fn resolve(items: &mut Vec<Item>) {
    let mut closer = 0;
    while closer < items.len() {
        let closes = matches!(&items[closer], Item::Delim(d) if d.can_close);
        let opener = if closes {
            (0..closer)
                .rev()
                .find(|&i| matches!(&items[i], Item::Delim(d) if d.can_open))
        } else {
            None
        };
        let Some(opener) = opener else {
            closer += 1;
            continue;
        };

        let used = match (&items[opener], &items[closer]) {
            (Item::Delim(open), Item::Delim(close)) if open.count >= 2 && close.count >= 2 => 2,
            _ => 1,
        };
        let children = into_inlines(items.drain(opener + 1..closer).collect());
        items.insert(opener + 1, Item::Node(span(used == 2, children)));
        closer = opener + 2;

        // An unspent closer is tried again against earlier openers.
        if spend(&mut items[closer], used) {
            items.remove(closer);
        }
        if spend(&mut items[opener], used) {
            items.remove(opener);
            closer -= 1;
        }
    }
}

/// Takes `used` markers from a run; true once the run is exhausted.
fn spend(item: &mut Item, used: usize) -> bool {
    match item {
        Item::Delim(delim) => {
            delim.count -= used;
            delim.count == 0
        }
        Item::Node(_) => false,
    }
}

fn span(strong: bool, mut children: Vec<Inline>) -> Inline {
    if children.len() == 1 {
        match (strong, children.pop()) {
            (true, Some(Inline::Emphasis(inner))) | (false, Some(Inline::Strong(inner))) => {
                return Inline::StrongEmphasis(inner);
            }
            (_, Some(child)) => children.push(child),
            (_, None) => {}
        }
    }
    if strong {
        Inline::Strong(children)
    } else {
        Inline::Emphasis(children)
    }
}

/// Unpaired runs become literal text; neighbouring text is merged.
fn into_inlines(items: Vec<Item>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::new();
    for item in items {
        let node = match item {
            Item::Node(node) => node,
            Item::Delim(delim) => Inline::Text("*".repeat(delim.count)),
        };
        if let (Some(Inline::Text(prev)), Inline::Text(text)) = (out.last_mut(), &node) {
            prev.push_str(text);
            continue;
        }
        out.push(node);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(parse_inline("**unclosed"), vec![text("**unclosed")]);
        assert_eq!(parse_inline("a * b"), vec![text("a * b")]);
        assert_eq!(parse_inline("2 * 3 * 4"), vec![text("2 * 3 * 4")]);
    }

    #[test]
    fn emphasis_inside_strong_is_nested() {
        assert_eq!(
            parse_inline("**a *b* c**"),
            vec![Inline::Strong(vec![
                text("a "),
                Inline::Emphasis(vec![text("b")]),
                text(" c"),
            ])]
        );
    }

    #[test]
    fn emphasis_can_wrap_strong() {
        assert_eq!(
            parse_inline("*Note: **important** fact*"),
            vec![Inline::Emphasis(vec![
                text("Note: "),
                Inline::Strong(vec![text("important")]),
                text(" fact"),
            ])]
        );
    }

    #[test]
    fn shared_closing_run_closes_both_spans() {
        assert_eq!(
            parse_inline("**bold *italic***"),
            vec![Inline::Strong(vec![
                text("bold "),
                Inline::Emphasis(vec![text("italic")]),
            ])]
        );
        assert_eq!(
            parse_inline("***bold** then italic*"),
            vec![Inline::Emphasis(vec![
                Inline::Strong(vec![text("bold")]),
                text(" then italic"),
            ])]
        );
    }

    #[test]
    fn leftover_markers_merge_into_text() {
        assert_eq!(
            parse_inline("*a**"),
            vec![Inline::Emphasis(vec![text("a")]), text("*")]
        );
    }

    #[test]
    fn plain_text_is_a_single_node() {
        assert_eq!(parse_inline("no markup here"), vec![text("no markup here")]);
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn several_spans_on_one_line() {
        assert_eq!(
            parse_inline("*x* and *y*"),
            vec![
                Inline::Emphasis(vec![text("x")]),
                text(" and "),
                Inline::Emphasis(vec![text("y")]),
            ]
        );
    }
}
