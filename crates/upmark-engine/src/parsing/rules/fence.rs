use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::{
    entity::{Entity, FencedPre},
    span::{Buffer, Span},
};

use super::{Matcher, captures_at, group, whole};

/// Opening fence line: a newline, three or more backticks or tildes, an
/// optional language word, end of line. The closer is found by scanning,
/// since it must repeat the opener exactly.
static FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(?P<fence>`{3,}|~{3,})(?P<lang>\w+)?\n").expect("fence opener regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn of(fence: &str) -> Option<FenceKind> {
        match fence.as_bytes().first() {
            Some(b'`') => Some(FenceKind::Backticks),
            Some(b'~') => Some(FenceKind::Tildes),
            _ => None,
        }
    }
}

/// Positions of one fenced block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceMatch {
    pub full: Span,
    pub fence: Span,
    pub lang: Option<Span>,
    pub body: Span,
}

/// Fenced code: body runs to the first repeat of the opening fence that is
/// followed by a newline. The body is one opaque span and is never re-parsed.
pub struct FencedPreRule;

impl FencedPreRule {
    /// First offset in `[from, end)` where `fence` followed by `\n` begins.
    fn find_closer(s: &str, fence: &str, from: usize, end: usize) -> Option<usize> {
        let mut at = from;
        while let Some(rel) = s[at..end].find(fence) {
            let candidate = at + rel;
            let after = candidate + fence.len();
            if after < end && s.as_bytes()[after] == b'\n' {
                return Some(candidate);
            }
            at = candidate + 1;
        }
        None
    }
}

impl Matcher for FencedPreRule {
    type Match = FenceMatch;

    fn name(&self) -> &'static str {
        "fenced_pre"
    }

    fn find_at(&self, buf: Buffer<'_>, pos: usize, end: usize) -> Option<(Span, FenceMatch)> {
        let s = buf.as_str();
        let mut from = pos;
        while let Some(caps) = captures_at(&FENCE_OPEN, buf, from, end) {
            let open = whole(&caps);
            let fence = group(&caps, "fence")?;
            let body_start = open.end;
            // The body holds at least one character.
            if let Some(first) = s[body_start..end].chars().next()
                && let Some(close) =
                    Self::find_closer(s, buf.slice(fence), body_start + first.len_utf8(), end)
            {
                let full = Span::new(open.start, close + fence.len() + 1);
                let m = FenceMatch {
                    full,
                    fence,
                    lang: group(&caps, "lang"),
                    body: Span::new(body_start, close),
                };
                return Some((full, m));
            }
            from = open.start + 1;
        }
        None
    }

    fn parse_entity<'a>(&self, buf: Buffer<'a>, m: &FenceMatch) -> Entity<'a> {
        Entity::FencedPre(FencedPre {
            buf,
            span: m.full,
            fence: m.fence,
            lang: m.lang,
            body: m.body,
        })
    }
}
