use std::fmt;

/// A byte range `[start, end)` into the source buffer.
///
/// All parsed entities store spans rather than copied text: slicing the
/// buffer with any span reproduces the exact source it covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns true if `other` lies entirely within `self`.
    #[must_use]
    pub fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Shared, read-only handle to the text being parsed.
///
/// Every entity carries one of these next to its offsets. Two buffers are
/// equal only when they are the *same* text (same address and length), so
/// entity equality is positional identity, not textual coincidence.
#[derive(Clone, Copy)]
pub struct Buffer<'a>(&'a str);

impl<'a> Buffer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self(text)
    }

    pub fn as_str(self) -> &'a str {
        self.0
    }

    pub fn len(self) -> usize {
        self.0.len()
    }

    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }

    /// The span covering the whole buffer.
    pub fn full_span(self) -> Span {
        Span::new(0, self.0.len())
    }

    /// Borrows the text under `sp`.
    ///
    /// # Panics
    /// Panics if `sp` is out of bounds or splits a UTF-8 sequence.
    pub fn slice(self, sp: Span) -> &'a str {
        &self.0[sp.start..sp.end]
    }
}

impl PartialEq for Buffer<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for Buffer<'_> {}

impl fmt::Debug for Buffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Buffer({} bytes)", self.0.len())
    }
}

/// Extracts text for a span, truncated to at most `max` bytes with a "..."
/// suffix if needed. Truncation backs off to the nearest char boundary.
///
/// Used for human-readable snapshot output.
pub fn preview(buf: Buffer<'_>, sp: Span, max: usize) -> String {
    let s = buf.slice(sp);
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}
