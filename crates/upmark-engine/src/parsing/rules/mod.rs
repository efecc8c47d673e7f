//! # Rules
//!
//! A rule scans a raw region of the buffer and splits it into the constructs
//! it recognizes plus the raw gaps between them.
//!
//! ## Traits
//!
//! - **`Rule`**: the object-safe interface the [`Parser`](crate::parsing::Parser)
//!   drives. `parse(buffer, start, end)` returns entities in document order.
//! - **`Matcher`**: how concrete rules are written. A matcher finds one
//!   occurrence at a time (`find_at`) and turns it into an entity
//!   (`parse_entity`); the blanket `Rule` impl does the gap bookkeeping.
//!
//! ## Modules
//!
//! - **`header`**: `#`-prefixed and `===`/`---` underlined headers
//! - **`emphasis`**: `*em*`, `**bold**`, `***both***` (and `_` forms)
//! - **`fence`**: fenced code blocks, body kept verbatim
//! - **`indented`**: tab or four-space indented code
//! - **`block_quote`**: `>` prefixed lines
//! - **`list`**: ordered/unordered lists and the indent-driven nesting stack
//!
//! ## Ordering
//!
//! Rules never overlap themselves, but different rules may want the same
//! text. Whichever runs first wins; see [`RuleKind::STANDARD`].

pub mod block_quote;
pub mod emphasis;
pub mod fence;
pub mod header;
pub mod indented;
pub mod list;

use std::{fmt, str::FromStr};

use log::trace;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::{
    error::RuleError,
    parsing::{
        entity::{Entity, Raw},
        span::{Buffer, Span},
    },
};

pub use block_quote::BlockQuoteRule;
pub use emphasis::WrappingRule;
pub use fence::FencedPreRule;
pub use header::{HashHeaderRule, UnderlineHeaderRule};
pub use indented::IndentedPreRule;
pub use list::{ListRule, parse_indent};

/// Converts raw spans into typed entities plus leftover raw gaps.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Splits `[start, end)` into matched entities and the raw text between
    /// them, in increasing position order. Gaps that are empty or pure
    /// whitespace are dropped.
    fn parse<'a>(&self, buf: Buffer<'a>, start: usize, end: usize) -> Vec<Entity<'a>>;
}

/// A rule expressed as "find the next occurrence" plus "build its entity".
pub trait Matcher: Send + Sync {
    /// Whatever positions `parse_entity` needs from a match.
    type Match;

    fn name(&self) -> &'static str;

    /// Finds the leftmost occurrence starting at or after `pos` that ends at
    /// or before `end`. Text before `pos` still counts as context for
    /// anchors, text at or after `end` does not exist.
    fn find_at(&self, buf: Buffer<'_>, pos: usize, end: usize) -> Option<(Span, Self::Match)>;

    fn parse_entity<'a>(&self, buf: Buffer<'a>, m: &Self::Match) -> Entity<'a>;
}

impl<M: Matcher> Rule for M {
    fn name(&self) -> &'static str {
        Matcher::name(self)
    }

    fn parse<'a>(&self, buf: Buffer<'a>, start: usize, end: usize) -> Vec<Entity<'a>> {
        let mut out = vec![];
        let mut raw_ix = start;
        let mut pos = start;

        while pos < end {
            let Some((span, m)) = self.find_at(buf, pos, end) else {
                break;
            };
            trace!("{} matched {}..{}", Matcher::name(self), span.start, span.end);
            out.extend(Raw::from_slice(buf, raw_ix, span.start).map(Entity::Raw));
            out.push(self.parse_entity(buf, &m));
            raw_ix = raw_ix.max(span.end);
            pos = if span.is_empty() {
                next_char_end(buf, span.end)
            } else {
                span.end
            };
        }

        out.extend(Raw::from_slice(buf, raw_ix, end).map(Entity::Raw));
        out
    }
}

/// Offset just past the char starting at `pos`.
fn next_char_end(buf: Buffer<'_>, pos: usize) -> usize {
    buf.as_str()[pos..]
        .chars()
        .next()
        .map_or(pos + 1, |c| pos + c.len_utf8())
}

/// Runs `re` at or after `pos` over the buffer truncated at `end`.
pub(crate) fn captures_at<'h>(re: &Regex, buf: Buffer<'h>, pos: usize, end: usize) -> Option<Captures<'h>> {
    if pos > end {
        return None;
    }
    re.captures_at(&buf.as_str()[..end], pos)
}

/// Span of a named group, if it participated in the match.
pub(crate) fn group(caps: &Captures<'_>, name: &str) -> Option<Span> {
    caps.name(name).map(|m| Span::new(m.start(), m.end()))
}

/// Span of the whole match.
pub(crate) fn whole(caps: &Captures<'_>) -> Span {
    caps.get(0)
        .map_or_else(Span::default, |m| Span::new(m.start(), m.end()))
}

/// Every rule this crate ships, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    FencedPre,
    IndentedPre,
    BlockQuote,
    OrderedList,
    UnorderedList,
    HashHeader,
    EqualsHeader,
    DashHeader,
    BoldEm,
    Bold,
    Em,
}

impl RuleKind {
    /// Default pass order: opaque blocks first so nothing inside them is
    /// re-read, then line structures, headers, and finally inline emphasis
    /// from the widest delimiter down.
    pub const STANDARD: [RuleKind; 11] = [
        RuleKind::FencedPre,
        RuleKind::IndentedPre,
        RuleKind::BlockQuote,
        RuleKind::OrderedList,
        RuleKind::UnorderedList,
        RuleKind::HashHeader,
        RuleKind::EqualsHeader,
        RuleKind::DashHeader,
        RuleKind::BoldEm,
        RuleKind::Bold,
        RuleKind::Em,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RuleKind::FencedPre => "fenced_pre",
            RuleKind::IndentedPre => "indented_pre",
            RuleKind::BlockQuote => "block_quote",
            RuleKind::OrderedList => "ordered_list",
            RuleKind::UnorderedList => "unordered_list",
            RuleKind::HashHeader => "hash_header",
            RuleKind::EqualsHeader => "equals_header",
            RuleKind::DashHeader => "dash_header",
            RuleKind::BoldEm => "bold_em",
            RuleKind::Bold => "bold",
            RuleKind::Em => "em",
        }
    }

    pub fn build(self) -> Box<dyn Rule> {
        match self {
            RuleKind::FencedPre => Box::new(FencedPreRule),
            RuleKind::IndentedPre => Box::new(IndentedPreRule),
            RuleKind::BlockQuote => Box::new(BlockQuoteRule),
            RuleKind::OrderedList => Box::new(ListRule::ordered()),
            RuleKind::UnorderedList => Box::new(ListRule::unordered()),
            RuleKind::HashHeader => Box::new(HashHeaderRule),
            RuleKind::EqualsHeader => Box::new(UnderlineHeaderRule::equals()),
            RuleKind::DashHeader => Box::new(UnderlineHeaderRule::dashes()),
            RuleKind::BoldEm => Box::new(WrappingRule::bold_em()),
            RuleKind::Bold => Box::new(WrappingRule::bold()),
            RuleKind::Em => Box::new(WrappingRule::em()),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::STANDARD
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RuleError::UnknownRule(s.to_string()))
    }
}
