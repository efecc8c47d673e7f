use crate::parsing::span::{Buffer, Span};

use super::Content;

/// Which tag a [`Wrapping`] entity renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapKind {
    Em,
    Bold,
    BoldEm,
    Paragraph,
    ListItem,
}

impl WrapKind {
    /// Opening tags, outermost first.
    fn tags(self) -> &'static [&'static str] {
        match self {
            WrapKind::Em => &["em"],
            WrapKind::Bold => &["strong"],
            WrapKind::BoldEm => &["strong", "em"],
            WrapKind::Paragraph => &["p"],
            WrapKind::ListItem => &["li"],
        }
    }

    /// Block kinds are set off by newlines on both sides.
    pub fn is_block(self) -> bool {
        matches!(self, WrapKind::Paragraph | WrapKind::ListItem)
    }

    pub fn name(self) -> &'static str {
        match self {
            WrapKind::Em => "Em",
            WrapKind::Bold => "Bold",
            WrapKind::BoldEm => "BoldEm",
            WrapKind::Paragraph => "Paragraph",
            WrapKind::ListItem => "ListItem",
        }
    }
}

/// A tag around child content.
///
/// Inline kinds render as `<tag>children</tag>`, block kinds as
/// `\n<tag>children</tag>\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapping<'a> {
    pub kind: WrapKind,
    pub buf: Buffer<'a>,
    pub span: Span,
    pub content: Content<'a>,
}

impl<'a> Wrapping<'a> {
    pub fn new(kind: WrapKind, buf: Buffer<'a>, start: usize, end: usize, content: Content<'a>) -> Self {
        Self {
            kind,
            buf,
            span: Span::new(start, end),
            content,
        }
    }

    pub fn render_into(&self, out: &mut String) {
        let block = self.kind.is_block();
        if block {
            out.push('\n');
        }
        render_tagged(out, self.kind.tags(), &self.content);
        if block {
            out.push('\n');
        }
    }
}

/// A header of level 1 through 6.
///
/// Header patterns consume the newline that precedes them. When the header
/// instead opens the buffer (`is_bof`), there is no such newline and the
/// leading one is left out of the rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    pub level: u8,
    pub is_bof: bool,
    pub buf: Buffer<'a>,
    pub span: Span,
    pub content: Content<'a>,
}

impl<'a> Header<'a> {
    pub fn new(
        buf: Buffer<'a>,
        start: usize,
        end: usize,
        content: Content<'a>,
        level: u8,
        is_bof: bool,
    ) -> Self {
        debug_assert!((1..=6).contains(&level), "header level {level} out of range");
        Self {
            level,
            is_bof,
            buf,
            span: Span::new(start, end),
            content,
        }
    }

    pub fn tag(&self) -> String {
        format!("h{}", self.level)
    }

    pub fn render_into(&self, out: &mut String) {
        if !self.is_bof {
            out.push('\n');
        }
        let tag = self.tag();
        render_tagged(out, &[tag.as_str()], &self.content);
        out.push('\n');
    }
}

fn render_tagged(out: &mut String, tags: &[&str], content: &Content<'_>) {
    for tag in tags {
        out.push('<');
        out.push_str(tag);
        out.push('>');
    }
    content.render_into(out);
    for tag in tags.iter().rev() {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::entity::{Entity, Raw};

    fn raw_content(buf: Buffer<'_>, start: usize, end: usize) -> Content<'_> {
        Content::new(vec![Entity::Raw(Raw::new(buf, start, end))])
    }

    #[test]
    fn em_renders_inline() {
        let buf = Buffer::new("_test string_");
        let em = Wrapping::new(WrapKind::Em, buf, 0, 13, raw_content(buf, 1, 12));
        let mut out = String::new();
        em.render_into(&mut out);
        assert_eq!(out, "<em>test string</em>");
    }

    #[test]
    fn bold_em_nests_tags() {
        let buf = Buffer::new("***loud***");
        let e = Wrapping::new(WrapKind::BoldEm, buf, 0, 10, raw_content(buf, 3, 7));
        let mut out = String::new();
        e.render_into(&mut out);
        assert_eq!(out, "<strong><em>loud</em></strong>");
    }

    #[test]
    fn paragraph_renders_as_block() {
        let buf = Buffer::new("\n\nthis is a paragraph of text\n");
        let p = Wrapping::new(WrapKind::Paragraph, buf, 0, 30, raw_content(buf, 2, 30));
        let mut out = String::new();
        p.render_into(&mut out);
        assert_eq!(out, "\n<p>this is a paragraph of text\n</p>\n");
    }

    #[test]
    fn header_keeps_leading_newline() {
        let buf = Buffer::new("\n# this is a header\n");
        let h = Header::new(buf, 0, 19, raw_content(buf, 3, 19), 1, false);
        let mut out = String::new();
        h.render_into(&mut out);
        assert_eq!(out, "\n<h1>this is a header</h1>\n");
    }

    #[test]
    fn header_at_start_of_buffer_drops_leading_newline() {
        let buf = Buffer::new("## this is a header\n");
        let h = Header::new(buf, 0, 19, raw_content(buf, 3, 19), 2, true);
        let mut out = String::new();
        h.render_into(&mut out);
        assert_eq!(out, "<h2>this is a header</h2>\n");
    }
}
