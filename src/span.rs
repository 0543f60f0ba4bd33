//! Source location tracking for tokens, AST nodes, values and errors.
//!
//! Every token carries a [`Span`], every AST node derives one from its first
//! and last token, and every runtime value remembers the span of the
//! expression that produced it. Spans hold a shared handle to the [`Source`]
//! they point into, so an error raised while running a function defined on an
//! earlier REPL line still renders that earlier line.
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//!
//! use scenev::span::{Position, Source, Span};
//!
//! let source = Rc::new(Source::new("<stdin>", "1 + 2"));
//! let start = Position::start();
//! let end = start.advance('1');
//! let span = Span::new(source, start, end);
//!
//! assert_eq!(span.len(), 1);
//! assert_eq!(span.text(), "1");
//! ```

use std::{fmt, rc::Rc};

/// A named chunk of source text fed to the interpreter.
///
/// One `Source` exists per call to [`crate::run`]; the REPL creates a new one
/// for every line it reads.
#[derive(Debug, PartialEq, Eq)]
pub struct Source {
    /// Name shown in diagnostics (`<stdin>`, a file path, ...).
    pub name: String,
    /// Full text of the input.
    pub text: String,
}

impl Source {
    /// Creates a new source from a display name and its text.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(),
               text: text.into(), }
    }

    /// Returns the text of the given 1-indexed line, without its line break.
    ///
    /// Returns an empty string for lines past the end of the source.
    #[must_use]
    pub fn line(&self, line: usize) -> &str {
        self.text
            .split('\n')
            .nth(line.saturating_sub(1))
            .map_or("", |l| l.trim_end_matches('\r'))
    }
}

/// A cursor into source text.
///
/// `offset` is a byte offset (0-indexed), `line` is 1-indexed and `column` is
/// a 1-indexed character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Byte offset into the source.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line:   usize,
    /// Column number in characters (1-indexed).
    pub column: usize,
}

impl Position {
    /// The position of the first character of any source.
    #[must_use]
    pub const fn start() -> Self {
        Self { offset: 0,
               line:   1,
               column: 1, }
    }

    /// Returns the position immediately after `ch`.
    ///
    /// Advancing past a newline moves to column 1 of the next line.
    ///
    /// # Example
    /// ```
    /// use scenev::span::Position;
    ///
    /// let pos = Position::start().advance('a').advance('\n');
    /// assert_eq!((pos.offset, pos.line, pos.column), (2, 2, 1));
    /// ```
    #[must_use]
    pub const fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self { offset: self.offset + ch.len_utf8(),
                   line:   self.line + 1,
                   column: 1, }
        } else {
            Self { offset: self.offset + ch.len_utf8(),
                   line:   self.line,
                   column: self.column + 1, }
        }
    }
}

/// A half-open range `[start, end)` inside a [`Source`].
#[derive(Clone, PartialEq, Eq)]
pub struct Span {
    /// The source this span points into.
    pub source: Rc<Source>,
    /// First position covered by the span.
    pub start:  Position,
    /// Position just past the last character covered.
    pub end:    Position,
}

impl Span {
    /// Creates a span from two positions in the same source.
    #[must_use]
    pub const fn new(source: Rc<Source>, start: Position, end: Position) -> Self {
        Self { source, start, end }
    }

    /// Creates a span covering both `left` and `right`.
    ///
    /// The result starts where `left` starts and ends where `right` ends.
    #[must_use]
    pub fn merge(left: &Self, right: &Self) -> Self {
        Self { source: Rc::clone(&left.source),
               start:  left.start,
               end:    right.end, }
    }

    /// Creates a span covering all of `text` in its own `<builtin>` source.
    ///
    /// Used for values that do not come from user input, such as the
    /// constants a session starts with.
    #[must_use]
    pub fn synthetic(text: &str) -> Self {
        let end = text.chars().fold(Position::start(), Position::advance);
        Self { source: Rc::new(Source::new("<builtin>", text)),
               start:  Position::start(),
               end, }
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Returns `true` if the span covers no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the source text covered by the span.
    #[must_use]
    pub fn text(&self) -> &str {
        self.source
            .text
            .get(self.start.offset..self.end.offset)
            .unwrap_or("")
    }

    /// Name of the source this span points into.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.source.name
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "{}:{}:{}-{}:{}",
               self.source.name,
               self.start.line,
               self.start.column,
               self.end.line,
               self.end.column)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source.name, self.start.line, self.start.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_of(text: &str, from: usize, to: usize) -> Span {
        let source = Rc::new(Source::new("<test>", text));
        let mut start = Position::start();
        for ch in text[..from].chars() {
            start = start.advance(ch);
        }
        let mut end = start;
        for ch in text[from..to].chars() {
            end = end.advance(ch);
        }
        Span::new(source, start, end)
    }

    #[test]
    fn advance_resets_column_on_newline() {
        let pos = "ab\ncd".chars().fold(Position::start(), Position::advance);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 3);
        assert_eq!(pos.offset, 5);
    }

    #[test]
    fn merge_covers_both_spans() {
        let left = span_of("foo + bar", 0, 3);
        let right = span_of("foo + bar", 6, 9);
        let merged = Span::merge(&left, &right);
        assert_eq!(merged.text(), "foo + bar");
        assert_eq!(merged.start.column, 1);
        assert_eq!(merged.end.column, 10);
    }

    #[test]
    fn source_line_lookup() {
        let source = Source::new("<test>", "first\r\nsecond\nthird");
        assert_eq!(source.line(1), "first");
        assert_eq!(source.line(2), "second");
        assert_eq!(source.line(3), "third");
        assert_eq!(source.line(9), "");
    }
}
