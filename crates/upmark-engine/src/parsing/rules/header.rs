use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::{
    entity::{Content, Entity, Header},
    span::{Buffer, Span},
};

use super::{Matcher, captures_at, group, whole};

/// `#` to `######`, then the header text to end of line. The preceding
/// newline is part of the match unless the header opens the buffer.
static HASH_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<pre>^|\n)(?P<level>#{1,6})\s*(?P<text>.+)").expect("hash header regex")
});

static EQUALS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<pre>^|\n)(?P<text>.+)\n={2,}\n").expect("equals header regex")
});

static DASH_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<pre>^|\n)(?P<text>.+)\n-{2,}\n").expect("dash header regex")
});

/// Positions of one header occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch {
    pub full: Span,
    pub text: Span,
    pub level: u8,
    /// No boundary newline was consumed: the match starts the buffer.
    pub is_bof: bool,
}

/// `## Header text`
pub struct HashHeaderRule;

impl Matcher for HashHeaderRule {
    type Match = HeaderMatch;

    fn name(&self) -> &'static str {
        "hash_header"
    }

    fn find_at(&self, buf: Buffer<'_>, pos: usize, end: usize) -> Option<(Span, HeaderMatch)> {
        let caps = captures_at(&HASH_HEADER, buf, pos, end)?;
        let full = whole(&caps);
        let m = HeaderMatch {
            full,
            text: group(&caps, "text")?,
            level: group(&caps, "level")?.len() as u8,
            is_bof: group(&caps, "pre").is_none_or(Span::is_empty),
        };
        Some((full, m))
    }

    fn parse_entity<'a>(&self, buf: Buffer<'a>, m: &HeaderMatch) -> Entity<'a> {
        Entity::Header(Header::new(
            buf,
            m.full.start,
            m.full.end,
            Content::raw_remainder(buf, m.text.start, m.full.end),
            m.level,
            m.is_bof,
        ))
    }
}

/// A line of text over a run of two or more `=` (level 1) or `-` (level 2).
pub struct UnderlineHeaderRule {
    name: &'static str,
    level: u8,
    pattern: &'static LazyLock<Regex>,
}

impl UnderlineHeaderRule {
    pub fn equals() -> Self {
        Self {
            name: "equals_header",
            level: 1,
            pattern: &EQUALS_HEADER,
        }
    }

    pub fn dashes() -> Self {
        Self {
            name: "dash_header",
            level: 2,
            pattern: &DASH_HEADER,
        }
    }
}

impl Matcher for UnderlineHeaderRule {
    type Match = HeaderMatch;

    fn name(&self) -> &'static str {
        self.name
    }

    fn find_at(&self, buf: Buffer<'_>, pos: usize, end: usize) -> Option<(Span, HeaderMatch)> {
        let caps = captures_at(self.pattern, buf, pos, end)?;
        let full = whole(&caps);
        let m = HeaderMatch {
            full,
            text: group(&caps, "text")?,
            level: self.level,
            is_bof: group(&caps, "pre").is_none_or(Span::is_empty),
        };
        Some((full, m))
    }

    fn parse_entity<'a>(&self, buf: Buffer<'a>, m: &HeaderMatch) -> Entity<'a> {
        Entity::Header(Header::new(
            buf,
            m.full.start,
            m.full.end,
            Content::raw_remainder(buf, m.text.start, m.text.end),
            m.level,
            m.is_bof,
        ))
    }
}
