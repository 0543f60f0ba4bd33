use std::{
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        evaluator::core::EvalResult,
        scope::Context,
        value::{function::Function, number::Number},
    },
    span::Span,
};

/// The payload of a runtime value.
#[derive(Debug, Clone)]
pub enum Data {
    /// An integer or float.
    Number(Number),
    /// An immutable string.
    String(Rc<str>),
    /// A user-defined function together with its defining frame.
    Function(Rc<Function>),
}

/// Represents a runtime value in the interpreter.
///
/// Besides its [`Data`], every value remembers where it came from: the span
/// of the expression that produced it and the frame it was produced in.
/// Reading a variable hands out a copy restamped with the reading
/// expression's span, so errors point at the use site rather than the
/// definition.
///
/// The frame back-reference is weak. A value stored in a scope never keeps
/// that scope's frame alive.
#[derive(Clone)]
pub struct Value {
    /// What the value is.
    pub data: Data,
    /// The expression that produced the value.
    pub span: Span,
    context:  Weak<Context>,
}

impl Value {
    /// Creates a value with no owning frame.
    #[must_use]
    pub fn new(data: Data, span: Span) -> Self {
        Self { data,
               span,
               context: Weak::new() }
    }

    /// Creates an integer value.
    ///
    /// # Example
    /// ```
    /// use scenev::{interpreter::value::core::Value, span::Span};
    ///
    /// let v = Value::int(42, Span::synthetic("42"));
    /// assert_eq!(v.to_string(), "42");
    /// assert_eq!(v.type_name(), "int");
    /// ```
    #[must_use]
    pub fn int(value: i64, span: Span) -> Self {
        Self::new(Data::Number(Number::Int(value)), span)
    }

    /// Creates a float value.
    #[must_use]
    pub fn float(value: f64, span: Span) -> Self {
        Self::new(Data::Number(Number::Float(value)), span)
    }

    /// Creates a numeric value.
    #[must_use]
    pub fn number(value: Number, span: Span) -> Self {
        Self::new(Data::Number(value), span)
    }

    /// Creates `1` for `true` and `0` for `false`.
    #[must_use]
    pub fn boolean(value: bool, span: Span) -> Self {
        Self::int(i64::from(value), span)
    }

    /// Creates a string value.
    #[must_use]
    pub fn string(value: impl Into<Rc<str>>, span: Span) -> Self {
        Self::new(Data::String(value.into()), span)
    }

    /// Creates a function value.
    #[must_use]
    pub fn function(function: Function, span: Span) -> Self {
        Self::new(Data::Function(Rc::new(function)), span)
    }

    /// Returns a copy pointing at `span`.
    #[must_use]
    pub fn with_position(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns a copy owned by `context`.
    #[must_use]
    pub fn with_context(mut self, context: &Rc<Context>) -> Self {
        self.context = Rc::downgrade(context);
        self
    }

    /// The frame that produced this value, if it is still alive.
    #[must_use]
    pub fn context(&self) -> Option<Rc<Context>> {
        self.context.upgrade()
    }

    /// Name of the value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match &self.data {
            Data::Number(Number::Int(_)) => "int",
            Data::Number(Number::Float(_)) => "float",
            Data::String(_) => "string",
            Data::Function(_) => "function",
        }
    }

    /// The numeric payload, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<Number> {
        match &self.data {
            Data::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Truthiness used by `if` and `while`.
    ///
    /// Numbers are true unless zero; strings are true unless empty.
    ///
    /// # Errors
    /// [`RuntimeErrorKind::IllegalOperation`] for functions.
    pub fn is_true(&self) -> EvalResult<bool> {
        match &self.data {
            Data::Number(n) => Ok(n.is_true()),
            Data::String(s) => Ok(!s.is_empty()),
            Data::Function(_) => {
                Err(self.error(RuntimeErrorKind::IllegalOperation("a function has no truth value".into())))
            },
        }
    }

    /// Builds an error pointing at this value, raised in its frame.
    #[must_use]
    pub fn error(&self, kind: RuntimeErrorKind) -> RuntimeError {
        RuntimeError::new(kind, self.span.clone(), self.context())
    }
}

impl PartialEq for Value {
    /// Compares payloads only; provenance is ignored. Functions are equal
    /// only to themselves.
    fn eq(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (Data::Number(a), Data::Number(b)) => a == b,
            (Data::String(a), Data::String(b)) => a == b,
            (Data::Function(a), Data::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Data::Number(n) => write!(f, "{n}"),
            Data::String(s) => write!(f, "\"{s}\""),
            Data::Function(func) => write!(f, "<function {}>", func.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} @ {:?}", self.span)
    }
}
