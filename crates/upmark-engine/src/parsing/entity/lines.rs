use crate::parsing::span::{Buffer, Span};

/// A fenced code block. The body is an opaque leaf: no rule ever sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedPre<'a> {
    pub buf: Buffer<'a>,
    pub span: Span,
    /// The opening fence run (three or more backticks or tildes).
    pub fence: Span,
    /// Language tag following the opening fence, if any.
    pub lang: Option<Span>,
    pub body: Span,
}

impl<'a> FencedPre<'a> {
    pub fn lang(&self) -> Option<&'a str> {
        self.lang.map(|sp| self.buf.slice(sp))
    }

    pub fn body(&self) -> &'a str {
        self.buf.slice(self.body)
    }

    pub fn render_into(&self, out: &mut String) {
        match self.lang() {
            Some(lang) => {
                out.push_str("\n<pre><code class=\"language-");
                out.push_str(lang);
                out.push_str("\">");
            }
            None => out.push_str("\n<pre><code>"),
        }
        out.push_str(self.body());
        out.push_str("</code></pre>\n");
    }
}

/// A single line inside a [`LineBlock`], with its prefix already stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub buf: Buffer<'a>,
    pub span: Span,
}

impl<'a> Line<'a> {
    pub fn new(buf: Buffer<'a>, start: usize, end: usize) -> Self {
        Self {
            buf,
            span: Span::new(start, end),
        }
    }

    pub fn text(&self) -> &'a str {
        self.buf.slice(self.span)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineBlockKind {
    /// Lines indented by a tab or four or more spaces.
    IndentedPre,
    /// Lines prefixed by `>`.
    BlockQuote,
}

impl LineBlockKind {
    pub fn name(self) -> &'static str {
        match self {
            LineBlockKind::IndentedPre => "IndentedPre",
            LineBlockKind::BlockQuote => "BlockQuote",
        }
    }

    fn open_close(self) -> (&'static str, &'static str) {
        match self {
            LineBlockKind::IndentedPre => ("\n<pre><code>", "</code></pre>\n"),
            LineBlockKind::BlockQuote => ("\n<blockquote>", "</blockquote>\n"),
        }
    }
}

/// A block made of consecutive prefixed lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBlock<'a> {
    pub kind: LineBlockKind,
    pub buf: Buffer<'a>,
    pub span: Span,
    pub lines: Vec<Line<'a>>,
}

impl<'a> LineBlock<'a> {
    pub fn new(kind: LineBlockKind, buf: Buffer<'a>, start: usize, end: usize) -> Self {
        Self {
            kind,
            buf,
            span: Span::new(start, end),
            lines: vec![],
        }
    }

    pub fn push_line(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn render_into(&self, out: &mut String) {
        let (open, close) = self.kind.open_close();
        out.push_str(open);
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(line.text());
        }
        out.push_str(close);
    }
}
