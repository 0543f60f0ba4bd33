/// Lexing errors.
///
/// Raised while scanning source text into tokens: characters that cannot
/// start a token, incomplete two-character operators and malformed literals.
pub mod lex_error;
/// Parsing errors.
///
/// Raised when the token stream does not match the grammar. Each carries an
/// "Expected ..." message naming what the parser was looking for.
pub mod parse_error;
/// Rendering of errors for humans.
///
/// Produces the traceback, header, and caret-underlined source excerpt.
pub mod report;
/// Runtime errors.
///
/// Raised during evaluation: undefined variables, illegal operand types,
/// division by zero, arity mismatches and friends. Runtime errors remember
/// the evaluation frame they were raised in so a traceback can be printed.
pub mod runtime_error;

pub use lex_error::{LexError, LexErrorKind};
pub use parse_error::ParseError;
pub use runtime_error::{RuntimeError, RuntimeErrorKind};

/// Result type produced by the lexer.
pub type LexResult<T> = Result<T, LexError>;

/// Any failure produced while running one input through the pipeline.
///
/// The `Display` implementation renders the full report: traceback (runtime
/// errors) or file/line header (lexical and syntax errors), the error line,
/// and the offending source line underlined with carets.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input could not be tokenized.
    #[error("{}", .0.report())]
    Lexical(#[from] LexError),
    /// The token stream did not match the grammar.
    #[error("{}", .0.report())]
    Syntax(#[from] ParseError),
    /// Evaluation failed.
    #[error("{}", .0.report())]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The span the error points at.
    #[must_use]
    pub const fn span(&self) -> &crate::span::Span {
        match self {
            Self::Lexical(e) => &e.span,
            Self::Syntax(e) => &e.span,
            Self::Runtime(e) => &e.span,
        }
    }
}
