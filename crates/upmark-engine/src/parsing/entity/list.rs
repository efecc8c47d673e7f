use crate::parsing::span::{Buffer, Span};

use super::Wrapping;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ListKind::Ordered => "OrderedList",
            ListKind::Unordered => "UnorderedList",
        }
    }
}

/// One element of a list: an item, or a list nested one level deeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChild<'a> {
    Item(Wrapping<'a>),
    List(List<'a>),
}

impl ListChild<'_> {
    pub fn span(&self) -> Span {
        match self {
            ListChild::Item(item) => item.span,
            ListChild::List(list) => list.span,
        }
    }

    pub fn render_into(&self, out: &mut String) {
        match self {
            ListChild::Item(item) => item.render_into(out),
            ListChild::List(list) => list.render_into(out),
        }
    }
}

/// An ordered or unordered list.
///
/// While a list is being built its `end` is only provisional; call
/// [`List::trim_to_content`] once the last child is in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List<'a> {
    pub kind: ListKind,
    buf: Buffer<'a>,
    span: Span,
    items: Vec<ListChild<'a>>,
}

impl<'a> List<'a> {
    pub fn new(kind: ListKind, buf: Buffer<'a>, start: usize, end: usize) -> Self {
        Self {
            kind,
            buf,
            span: Span::new(start, end),
            items: vec![],
        }
    }

    pub fn with_items(
        kind: ListKind,
        buf: Buffer<'a>,
        start: usize,
        end: usize,
        items: Vec<ListChild<'a>>,
    ) -> Self {
        Self {
            kind,
            buf,
            span: Span::new(start, end),
            items,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn buffer(&self) -> Buffer<'a> {
        self.buf
    }

    pub fn items(&self) -> &[ListChild<'a>] {
        &self.items
    }

    pub fn push_item(&mut self, item: ListChild<'a>) {
        self.items.push(item);
    }

    /// Pulls `end` in to the end of the last child, finalizing a trailing
    /// nested list first. A list with no children keeps its bounds.
    pub fn trim_to_content(&mut self) {
        if let Some(ListChild::List(inner)) = self.items.last_mut() {
            inner.trim_to_content();
        }
        if let Some(last) = self.items.last() {
            self.span.end = last.span().end;
        }
    }

    pub fn render_into(&self, out: &mut String) {
        let tag = self.kind.tag();
        out.push_str("\n<");
        out.push_str(tag);
        out.push('>');
        for item in &self.items {
            item.render_into(out);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push_str(">\n");
    }
}
