use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::{
    entity::{Entity, Line, LineBlock, LineBlockKind},
    span::{Buffer, Span},
};

use super::{Matcher, captures_at, indented::line_spans, whole};

/// One quoted line: `>` then either `' '` and the text, or nothing at all.
static QUOTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n>(?: (?P<text>.+))?").expect("quote line regex"));

static QUOTE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:\n>(?: .+)?)+\n").expect("quote block regex"));

/// Consecutive lines prefixed by `>`. A bare `>` line becomes an empty line
/// positioned right after its marker.
pub struct BlockQuoteRule;

impl Matcher for BlockQuoteRule {
    type Match = Span;

    fn name(&self) -> &'static str {
        "block_quote"
    }

    fn find_at(&self, buf: Buffer<'_>, pos: usize, end: usize) -> Option<(Span, Span)> {
        let full = whole(&captures_at(&QUOTE_BLOCK, buf, pos, end)?);
        Some((full, full))
    }

    fn parse_entity<'a>(&self, buf: Buffer<'a>, m: &Span) -> Entity<'a> {
        let mut block = LineBlock::new(LineBlockKind::BlockQuote, buf, m.start, m.end);
        for sp in line_spans(&QUOTE_LINE, buf, *m) {
            block.push_line(Line::new(buf, sp.start, sp.end));
        }
        Entity::Lines(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_entity_with_bare_marker_line() {
        let text = "\n\n> this is blockquoted\n>\n> so is this\n";
        let buf = Buffer::new(text);
        let (span, m) = BlockQuoteRule.find_at(buf, 0, text.len()).unwrap();
        assert_eq!(span, Span::new(0, 39));

        let Entity::Lines(block) = BlockQuoteRule.parse_entity(buf, &m) else {
            panic!("expected line block");
        };
        assert_eq!(
            block.lines,
            vec![
                Line::new(buf, 4, 23),
                Line::new(buf, 25, 25),
                Line::new(buf, 28, 38),
            ]
        );
    }

    #[test]
    fn marker_must_open_the_line() {
        let text = "\n\na > b\n";
        assert!(BlockQuoteRule.find_at(Buffer::new(text), 0, text.len()).is_none());
    }

    #[test]
    fn renders_lines_inside_blockquote() {
        let text = "\n\n> one\n> two\n";
        let buf = Buffer::new(text);
        let (_, m) = BlockQuoteRule.find_at(buf, 0, text.len()).unwrap();
        assert_eq!(
            BlockQuoteRule.parse_entity(buf, &m).to_html(),
            "\n<blockquote>one\ntwo</blockquote>\n"
        );
    }
}
