//! Ordered and unordered lists.
//!
//! A list match is a run of item lines. Nesting is not bracketed by any
//! syntax, only by indentation, so it is rebuilt in one pass with a stack
//! of open lists, one per level, and a current level:
//!
//! - deeper than the current level: open one nested list, one level down
//!   however far the indent jumps
//! - shallower: close lists until the item's own level is innermost
//! - otherwise: append to the innermost list
//!
//! Lists get a provisional end (the end of the whole match) when opened and
//! are trimmed to their last child as they close.

use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use crate::parsing::{
    entity::{Content, Entity, List, ListChild, ListKind, WrapKind, Wrapping},
    span::{Buffer, Span},
};

use super::{Matcher, captures_at, group, whole};

static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(?P<indent>[\t ]*)\d+\.[\t ]+(?P<text>.+)").expect("ordered item regex")
});

static ORDERED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(?:\n[\t ]*\d+\.[\t ]+.+)+\n").expect("ordered list regex")
});

static UNORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(?P<indent>[\t ]*)[-*+][\t ]+(?P<text>.+)").expect("unordered item regex")
});

static UNORDERED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(?:\n[\t ]*[-*+][\t ]+.+)+\n").expect("unordered list regex")
});

/// Nesting depth of an item from its leading whitespace.
///
/// A tab counts two units, a space one, and two units make one level, so a
/// tab and two spaces both indent by one level. No indent is depth 0.
pub fn parse_indent(indent: Option<&str>) -> usize {
    let Some(indent) = indent else {
        return 0;
    };
    let units: usize = indent
        .chars()
        .map(|c| match c {
            '\t' => 2,
            ' ' => 1,
            _ => 0,
        })
        .sum();
    units / 2
}

/// One item line inside a list match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ItemLine {
    full: Span,
    text: Span,
    depth: usize,
}

/// Lists whose item marker is configured by a pair of patterns: one for a
/// single item line, one for a whole run of them.
pub struct ListRule {
    name: &'static str,
    kind: ListKind,
    item: &'static LazyLock<Regex>,
    block: &'static LazyLock<Regex>,
}

impl ListRule {
    /// `1. item`
    pub fn ordered() -> Self {
        Self {
            name: "ordered_list",
            kind: ListKind::Ordered,
            item: &ORDERED_ITEM,
            block: &ORDERED_BLOCK,
        }
    }

    /// `- item`, `* item` or `+ item`
    pub fn unordered() -> Self {
        Self {
            name: "unordered_list",
            kind: ListKind::Unordered,
            item: &UNORDERED_ITEM,
            block: &UNORDERED_BLOCK,
        }
    }

    fn item_lines(&self, buf: Buffer<'_>, block: Span) -> Vec<ItemLine> {
        let mut lines = vec![];
        let mut pos = block.start;
        while let Some(caps) = captures_at(self.item, buf, pos, block.end) {
            let full = whole(&caps);
            if let Some(text) = group(&caps, "text") {
                let indent = group(&caps, "indent").map(|sp| buf.slice(sp));
                lines.push(ItemLine {
                    full,
                    text,
                    depth: parse_indent(indent),
                });
            }
            pos = full.end;
        }
        lines
    }
}

/// The in-progress lists of one match, outermost first.
struct Nesting<'a> {
    kind: ListKind,
    buf: Buffer<'a>,
    /// Provisional end for every list opened.
    end: usize,
    root: List<'a>,
    /// Nested lists still accepting items; level `n` is `open[n - 1]`.
    open: Vec<List<'a>>,
}

impl<'a> Nesting<'a> {
    fn new(kind: ListKind, buf: Buffer<'a>, span: Span) -> Self {
        Self {
            kind,
            buf,
            end: span.end,
            root: List::new(kind, buf, span.start, span.end),
            open: vec![],
        }
    }

    /// Current level. Never more than one above the previous item's.
    fn level(&self) -> usize {
        self.open.len()
    }

    fn innermost(&mut self) -> &mut List<'a> {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    fn push(&mut self, line: ItemLine) {
        let item = ListChild::Item(Wrapping::new(
            WrapKind::ListItem,
            self.buf,
            line.full.start,
            line.full.end,
            Content::raw_remainder(self.buf, line.text.start, line.text.end),
        ));

        if line.depth > self.level() {
            trace!(
                "opening nested list at level {} for depth {} ({})",
                self.level() + 1,
                line.depth,
                line.full.start
            );
            let mut nested = List::new(self.kind, self.buf, line.full.start, self.end);
            nested.push_item(item);
            self.open.push(nested);
            return;
        }

        while line.depth < self.level() {
            self.close_innermost();
        }
        self.innermost().push_item(item);
    }

    /// Finalizes the innermost nested list and hands it to its parent.
    fn close_innermost(&mut self) {
        if let Some(mut list) = self.open.pop() {
            list.trim_to_content();
            self.innermost().push_item(ListChild::List(list));
        }
    }

    fn finish(mut self) -> List<'a> {
        while !self.open.is_empty() {
            self.close_innermost();
        }
        self.root.trim_to_content();
        self.root
    }
}

impl Matcher for ListRule {
    type Match = Span;

    fn name(&self) -> &'static str {
        self.name
    }

    fn find_at(&self, buf: Buffer<'_>, pos: usize, end: usize) -> Option<(Span, Span)> {
        let full = whole(&captures_at(self.block, buf, pos, end)?);
        Some((full, full))
    }

    fn parse_entity<'a>(&self, buf: Buffer<'a>, m: &Span) -> Entity<'a> {
        let mut nesting = Nesting::new(self.kind, buf, *m);
        for line in self.item_lines(buf, *m) {
            nesting.push(line);
        }
        Entity::List(nesting.finish())
    }
}
