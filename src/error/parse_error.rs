use crate::{error::report, span::Span};

/// Invalid syntax: the token stream does not match the grammar.
///
/// The message always reads "Expected ..." and names what the innermost rule
/// that made progress was looking for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid Syntax: {message}")]
pub struct ParseError {
    /// Description of what was expected.
    pub message: String,
    /// The offending token(s).
    pub span:    Span,
}

impl ParseError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self { message: message.into(),
               span }
    }

    /// Renders the error with its file/line header and source excerpt.
    #[must_use]
    pub fn report(&self) -> String {
        report::render_static(self, &self.span)
    }
}
