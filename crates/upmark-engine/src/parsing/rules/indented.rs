use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::{
    entity::{Entity, Line, LineBlock, LineBlockKind},
    span::{Buffer, Span},
};

use super::{Matcher, captures_at, group, whole};

/// One indented line: a tab or four or more spaces, then the code text.
static INDENTED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:\t| {4,})(?P<text>.+)").expect("indented line regex"));

/// A run of indented lines set off by a preceding and a trailing newline.
static INDENTED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:\n(?:\t| {4,}).+)+\n").expect("indented block regex"));

/// Collects the per-line text spans of a block match, in order.
pub(crate) fn line_spans(re: &Regex, buf: Buffer<'_>, block: Span) -> Vec<Span> {
    let mut lines = vec![];
    let mut pos = block.start;
    while let Some(caps) = captures_at(re, buf, pos, block.end) {
        let line = whole(&caps);
        lines.push(group(&caps, "text").unwrap_or(Span::new(line.end, line.end)));
        pos = line.end;
    }
    lines
}

/// Code indented by a tab or at least four spaces. Each line keeps its text
/// with the indent removed.
pub struct IndentedPreRule;

impl Matcher for IndentedPreRule {
    type Match = Span;

    fn name(&self) -> &'static str {
        "indented_pre"
    }

    fn find_at(&self, buf: Buffer<'_>, pos: usize, end: usize) -> Option<(Span, Span)> {
        let full = whole(&captures_at(&INDENTED_BLOCK, buf, pos, end)?);
        Some((full, full))
    }

    fn parse_entity<'a>(&self, buf: Buffer<'a>, m: &Span) -> Entity<'a> {
        let mut block = LineBlock::new(LineBlockKind::IndentedPre, buf, m.start, m.end);
        for sp in line_spans(&INDENTED_LINE, buf, *m) {
            block.push_line(Line::new(buf, sp.start, sp.end));
        }
        Entity::Lines(block)
    }
}
