use std::rc::Rc;

use crate::{error::report, interpreter::scope::Context, span::Span};

/// The ways evaluation can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// A name was read that no enclosing scope defines.
    UndefinedVariable(String),
    /// An operator was applied to operands it does not support.
    IllegalOperation(String),
    /// Division by an integer or floating-point zero.
    DivisionByZero,
    /// A function was called with the wrong number of arguments.
    ArityMismatch {
        /// Name of the called function.
        function: String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
    },
    /// The callee of a call expression is not a function.
    NotCallable(String),
    /// String indexing outside `0..len`.
    IndexOutOfRange {
        /// The requested index.
        index: i64,
        /// Length of the string, in characters.
        len:   usize,
    },
    /// An expression that yields nothing was used where a value is needed.
    MissingValue,
    /// Integer arithmetic overflowed 64 bits.
    Overflow,
    /// Evaluation nested deeper than the given limit, usually through
    /// unbounded recursion.
    StackOverflow(usize),
}

impl RuntimeErrorKind {
    /// Human-readable error category.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UndefinedVariable(_) => "Undefined Variable",
            Self::IllegalOperation(_) => "Illegal Operation",
            Self::DivisionByZero => "Division By Zero",
            Self::ArityMismatch { .. } => "Arity Mismatch",
            Self::NotCallable(_) => "Not Callable",
            Self::IndexOutOfRange { .. } => "Index Out Of Range",
            Self::MissingValue => "Missing Value",
            Self::Overflow => "Integer Overflow",
            Self::StackOverflow(_) => "Stack Overflow",
        }
    }

    /// Human-readable error description.
    #[must_use]
    pub fn details(&self) -> String {
        match self {
            Self::UndefinedVariable(name) => format!("'{name}' is not defined"),
            Self::IllegalOperation(details) => details.clone(),
            Self::DivisionByZero => "Division by zero".to_string(),
            Self::ArityMismatch { function,
                                  expected,
                                  found, } => {
                let (count, direction) = if found > expected {
                    (found - expected, "too many")
                } else {
                    (expected - found, "too few")
                };
                format!("{count} {direction} args passed into '{function}'")
            },
            Self::NotCallable(what) => format!("{what} is not a function"),
            Self::IndexOutOfRange { index, len } => {
                format!("index {index} is out of range for a string of length {len}")
            },
            Self::MissingValue => "expression produced no value".to_string(),
            Self::Overflow => "integer overflow while computing result".to_string(),
            Self::StackOverflow(limit) => format!("maximum recursion depth {limit} exceeded"),
        }
    }
}

/// A failure raised while evaluating an expression.
///
/// Besides the offending span, a runtime error keeps the evaluation frame it
/// was raised in. Walking that frame's parents yields the traceback.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}: {}", .kind.name(), .kind.details())]
pub struct RuntimeError {
    /// What went wrong.
    pub kind:    RuntimeErrorKind,
    /// The expression that failed.
    pub span:    Span,
    /// The frame the failure happened in.
    pub context: Option<Rc<Context>>,
}

impl RuntimeError {
    /// Creates a runtime error raised in `context`.
    #[must_use]
    pub const fn new(kind: RuntimeErrorKind, span: Span, context: Option<Rc<Context>>) -> Self {
        Self { kind,
               span,
               context }
    }

    /// Attaches `context` unless the error already knows its frame.
    #[must_use]
    pub fn or_context(mut self, context: &Rc<Context>) -> Self {
        if self.context.is_none() {
            self.context = Some(Rc::clone(context));
        }
        self
    }

    /// Renders the error with its traceback and source excerpt.
    #[must_use]
    pub fn report(&self) -> String {
        report::render_runtime(self)
    }
}
