use crate::parsing::{
    entity::{Content, Entity, WrapKind, Wrapping},
    span::{Buffer, Span},
};

use super::Matcher;

/// Delimiter characters; any mix of them forms a run.
const DELIMITERS: [u8; 2] = [b'*', b'_'];

/// Positions of one delimited occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapMatch {
    pub full: Span,
    pub text: Span,
}

/// Symmetric inline delimiters of a fixed width: the opening run is closed by
/// the *last* identical run on the same line, with at least one character in
/// between.
pub struct WrappingRule {
    name: &'static str,
    width: usize,
    kind: WrapKind,
}

impl WrappingRule {
    pub fn new(name: &'static str, width: usize, kind: WrapKind) -> Self {
        Self { name, width, kind }
    }

    /// `*text*` or `_text_`
    pub fn em() -> Self {
        Self::new("em", 1, WrapKind::Em)
    }

    /// `**text**` or `__text__`
    pub fn bold() -> Self {
        Self::new("bold", 2, WrapKind::Bold)
    }

    /// `***text***` or `___text___`
    pub fn bold_em() -> Self {
        Self::new("bold_em", 3, WrapKind::BoldEm)
    }

    /// Tries to close a run opening at `open`, within `[open, end)`.
    fn close_from(&self, s: &str, open: usize, end: usize) -> Option<WrapMatch> {
        let delim = &s[open..open + self.width];
        let text_start = open + self.width;
        let line_end = s[text_start..end]
            .find('\n')
            .map_or(end, |i| text_start + i);
        let first = s[text_start..line_end].chars().next()?;
        let min_close = text_start + first.len_utf8();
        let close = min_close + s[min_close..line_end].rfind(delim)?;
        Some(WrapMatch {
            full: Span::new(open, close + self.width),
            text: Span::new(text_start, close),
        })
    }
}

impl Matcher for WrappingRule {
    type Match = WrapMatch;

    fn name(&self) -> &'static str {
        self.name
    }

    fn find_at(&self, buf: Buffer<'_>, pos: usize, end: usize) -> Option<(Span, WrapMatch)> {
        let s = buf.as_str();
        let bytes = s.as_bytes();
        let mut open = pos;
        while open + self.width <= end {
            let is_run = bytes[open..open + self.width]
                .iter()
                .all(|b| DELIMITERS.contains(b));
            if is_run && let Some(m) = self.close_from(s, open, end) {
                return Some((m.full, m));
            }
            open += 1;
        }
        None
    }

    fn parse_entity<'a>(&self, buf: Buffer<'a>, m: &WrapMatch) -> Entity<'a> {
        Entity::Wrapping(Wrapping::new(
            self.kind,
            buf,
            m.full.start,
            m.full.end,
            Content::raw_remainder(buf, m.text.start, m.text.end),
        ))
    }
}
