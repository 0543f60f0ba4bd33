use crate::{error::report, span::Span};

/// The ways scanning can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character that cannot start any token.
    IllegalCharacter(char),
    /// A character that must be followed by another one, e.g. `!` by `=`.
    ExpectedCharacter {
        /// The character that was required.
        expected: char,
        /// The character that required it.
        after:    char,
    },
    /// A string literal with no closing `"` before the end of input.
    UnterminatedString,
    /// An integer literal that does not fit in a signed 64-bit integer.
    InvalidNumber(String),
}

impl LexErrorKind {
    /// Human-readable error category.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IllegalCharacter(_) => "Illegal Character",
            Self::ExpectedCharacter { .. } | Self::UnterminatedString => "Expected Character",
            Self::InvalidNumber(_) => "Invalid Number",
        }
    }

    /// Human-readable error description.
    #[must_use]
    pub fn details(&self) -> String {
        match self {
            Self::IllegalCharacter(ch) => format!("'{ch}'"),
            Self::ExpectedCharacter { expected, after } => {
                format!("'{expected}' (after '{after}')")
            },
            Self::UnterminatedString => "'\"' to close the string literal".to_string(),
            Self::InvalidNumber(literal) => {
                format!("'{literal}' does not fit in a 64-bit integer")
            },
        }
    }
}

/// A failure to tokenize the input, pointing at the offending characters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {}", .kind.name(), .kind.details())]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// Where it went wrong.
    pub span: Span,
}

impl LexError {
    /// Creates a new lexing error.
    #[must_use]
    pub const fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Renders the error with its file/line header and source excerpt.
    #[must_use]
    pub fn report(&self) -> String {
        report::render_static(self, &self.span)
    }
}
