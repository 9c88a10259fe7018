//! Line model
//!
//! The source is split once into borrowed lines that keep their original
//! terminators, so untouched lines are written back byte for byte.

/// One source line together with its immediate neighbours
///
/// Neighbours are read-only context; the state machines use them to
/// recognise content generated by an earlier run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineView<'a> {
    number: usize,
    text: &'a str,
    prev: Option<&'a str>,
    next: Option<&'a str>,
}

impl<'a> LineView<'a> {
    /// Create a view with no neighbours
    #[inline]
    #[must_use]
    pub fn new(number: usize, text: &'a str) -> Self {
        Self {
            number,
            text,
            prev: None,
            next: None,
        }
    }

    /// Attach the surrounding lines
    #[inline]
    #[must_use]
    pub fn with_neighbours(mut self, prev: Option<&'a str>, next: Option<&'a str>) -> Self {
        self.prev = prev;
        self.next = next;
        self
    }

    /// 1-based line number
    #[inline]
    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }

    /// Raw text including the terminator
    #[inline]
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Text without the line terminator
    #[inline]
    #[must_use]
    pub fn content(&self) -> &'a str {
        strip_terminator(self.text)
    }

    /// Line preceding this one, if any
    #[inline]
    #[must_use]
    pub fn prev(&self) -> Option<&'a str> {
        self.prev
    }

    /// Line following this one, if any
    #[inline]
    #[must_use]
    pub fn next(&self) -> Option<&'a str> {
        self.next
    }
}

/// Ordered lines of a whole source text
#[derive(Debug, Clone, Default)]
pub struct SourceLines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceLines<'a> {
    /// Split text into lines, keeping each `\n` with its line
    ///
    /// A final line without terminator is kept as is.
    #[must_use]
    pub fn split(text: &'a str) -> Self {
        Self {
            lines: text.split_inclusive('\n').collect(),
        }
    }

    /// Number of lines
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the source has no lines
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over the lines as views with neighbours attached
    pub fn views(&self) -> impl Iterator<Item = LineView<'a>> + '_ {
        self.lines.iter().enumerate().map(move |(idx, text)| {
            let prev = idx.checked_sub(1).and_then(|p| self.lines.get(p).copied());
            let next = self.lines.get(idx + 1).copied();
            LineView::new(idx + 1, text).with_neighbours(prev, next)
        })
    }
}

/// Remove a trailing `\n` or `\r\n`
#[inline]
#[must_use]
pub fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
