//! # Entities
//!
//! The parsed document is a flat [`Content`] of [`Entity`] values, each of
//! which is a span into one shared, never-mutated [`Buffer`]. Composite
//! entities (emphasis, headers, lists, code blocks) own their children;
//! nothing ever copies text out of the buffer until rendering.
//!
//! ## Variants
//!
//! - **`Raw`**: text no rule has claimed yet. Rules only ever look at these.
//! - **`Wrapping`**: a tag around child content (`em`, `strong`, `p`, `li`, ...)
//! - **`Header`**: `h1`..`h6`, aware of whether it starts the document
//! - **`List`**: ordered/unordered, nesting by containing other lists
//! - **`FencedPre`**: fenced code with an optional language, body kept opaque
//! - **`Lines`**: indented code or a block quote, one span per line

pub mod lines;
pub mod list;
pub mod wrapping;

use std::fmt;

use crate::parsing::span::{Buffer, Span};

pub use lines::{FencedPre, Line, LineBlock, LineBlockKind};
pub use list::{List, ListChild, ListKind};
pub use wrapping::{Header, WrapKind, Wrapping};

/// A parsed construct, or a stretch of not-yet-recognized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity<'a> {
    Raw(Raw<'a>),
    Wrapping(Wrapping<'a>),
    Header(Header<'a>),
    List(List<'a>),
    FencedPre(FencedPre<'a>),
    Lines(LineBlock<'a>),
}

impl<'a> Entity<'a> {
    pub fn span(&self) -> Span {
        match self {
            Entity::Raw(e) => e.span,
            Entity::Wrapping(e) => e.span,
            Entity::Header(e) => e.span,
            Entity::List(e) => e.span(),
            Entity::FencedPre(e) => e.span,
            Entity::Lines(e) => e.span,
        }
    }

    pub fn start(&self) -> usize {
        self.span().start
    }

    pub fn end(&self) -> usize {
        self.span().end
    }

    pub fn buffer(&self) -> Buffer<'a> {
        match self {
            Entity::Raw(e) => e.buf,
            Entity::Wrapping(e) => e.buf,
            Entity::Header(e) => e.buf,
            Entity::List(e) => e.buffer(),
            Entity::FencedPre(e) => e.buf,
            Entity::Lines(e) => e.buf,
        }
    }

    /// True for text that later rules are still allowed to claim.
    pub fn is_raw(&self) -> bool {
        matches!(self, Entity::Raw(_))
    }

    /// Short name of the variant, used in logs and snapshots.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Entity::Raw(_) => "Raw",
            Entity::Wrapping(e) => e.kind.name(),
            Entity::Header(_) => "Header",
            Entity::List(e) => e.kind.name(),
            Entity::FencedPre(_) => "FencedPre",
            Entity::Lines(e) => e.kind.name(),
        }
    }

    /// Appends the tagged-markup rendering of this entity to `out`.
    pub fn render_into(&self, out: &mut String) {
        match self {
            Entity::Raw(e) => e.render_into(out),
            Entity::Wrapping(e) => e.render_into(out),
            Entity::Header(e) => e.render_into(out),
            Entity::List(e) => e.render_into(out),
            Entity::FencedPre(e) => e.render_into(out),
            Entity::Lines(e) => e.render_into(out),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

impl fmt::Display for Entity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {} - {}>", self.kind_name(), self.start(), self.end())
    }
}

/// Unparsed buffer text. Renders as the literal slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raw<'a> {
    pub buf: Buffer<'a>,
    pub span: Span,
}

impl<'a> Raw<'a> {
    pub fn new(buf: Buffer<'a>, start: usize, end: usize) -> Self {
        debug_assert!(
            start <= end && end <= buf.len(),
            "raw span out of bounds: {start}..{end} (buffer len: {})",
            buf.len()
        );
        Self {
            buf,
            span: Span::new(start, end),
        }
    }

    /// A raw span covering the whole buffer.
    pub fn whole(buf: Buffer<'a>) -> Self {
        Self::new(buf, 0, buf.len())
    }

    /// Builds a raw span unless the range is empty or whitespace only.
    ///
    /// Whitespace gaps between matches are dropped rather than kept as empty
    /// output nodes.
    pub fn from_slice(buf: Buffer<'a>, start: usize, end: usize) -> Option<Self> {
        if start >= end || buf.slice(Span::new(start, end)).trim().is_empty() {
            return None;
        }
        Some(Self::new(buf, start, end))
    }

    /// Shifts both bounds by signed deltas.
    ///
    /// Returns `None` when the result would invert or leave the buffer.
    pub fn offset(&self, start_delta: isize, end_delta: isize) -> Option<Self> {
        let start = self.span.start.checked_add_signed(start_delta)?;
        let end = self.span.end.checked_add_signed(end_delta)?;
        if start > end || end > self.buf.len() {
            return None;
        }
        Some(Self::new(self.buf, start, end))
    }

    pub fn text(&self) -> &'a str {
        self.buf.slice(self.span)
    }

    pub fn render_into(&self, out: &mut String) {
        out.push_str(self.text());
    }
}

/// An ordered run of entities covering a contiguous document region.
///
/// Bounds are not stored: they are read off the first and last child, so a
/// composite's extent can never drift from its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content<'a> {
    entities: Vec<Entity<'a>>,
}

impl<'a> Content<'a> {
    pub fn new(entities: Vec<Entity<'a>>) -> Self {
        Self { entities }
    }

    /// A single raw entity spanning the entire buffer; the seed of every parse.
    pub fn raw_from_buffer(buf: Buffer<'a>) -> Self {
        Self::new(vec![Entity::Raw(Raw::whole(buf))])
    }

    /// A single raw entity over `[start, end)`, used for the inner text of
    /// wrapping constructs.
    pub fn raw_remainder(buf: Buffer<'a>, start: usize, end: usize) -> Self {
        Self::new(vec![Entity::Raw(Raw::new(buf, start, end))])
    }

    pub fn start(&self) -> Option<usize> {
        self.entities.first().map(Entity::start)
    }

    pub fn end(&self) -> Option<usize> {
        self.entities.last().map(Entity::end)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity<'a>] {
        &self.entities
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity<'a>> {
        self.entities.iter()
    }

    pub fn into_entities(self) -> Vec<Entity<'a>> {
        self.entities
    }

    pub fn render_into(&self, out: &mut String) {
        for entity in &self.entities {
            entity.render_into(out);
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

impl<'a> FromIterator<Entity<'a>> for Content<'a> {
    fn from_iter<I: IntoIterator<Item = Entity<'a>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for Content<'a> {
    type Item = Entity<'a>;
    type IntoIter = std::vec::IntoIter<Entity<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'c, 'a> IntoIterator for &'c Content<'a> {
    type Item = &'c Entity<'a>;
    type IntoIter = std::slice::Iter<'c, Entity<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
