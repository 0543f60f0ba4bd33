//! # scenev
//!
//! scenev is a small dynamically-typed expression language with a
//! tree-walking interpreter written in Rust. Everything is an expression:
//! arithmetic, comparisons, `var` bindings, `if`/`for`/`while` and
//! first-class functions with lexical closures.
//!
//! A line of input flows through three stages, each of which can fail with
//! its own error type:
//!
//! 1. [`interpreter::lexer::tokenize`] turns text into tokens.
//! 2. [`interpreter::parser::core::parse`] builds an [`ast::Expr`].
//! 3. [`interpreter::scope::Context::eval`] walks the tree.
//!
//! [`run`] chains the three against a persistent [`interpreter::scope::Context`],
//! which is how bindings survive from one REPL line to the next.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::rc::Rc;

use crate::{
    error::Error,
    interpreter::{
        lexer::tokenize,
        parser::core::parse,
        scope::{Context, PROGRAM_NAME},
        value::core::Value,
    },
    span::{Source, Span},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression types for all language constructs.
/// - Attaches source spans to every node for error reporting.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running code and
/// renders them for humans: a traceback for runtime errors, a file/line
/// header for the others, and the offending source line underlined with
/// carets.
///
/// # Responsibilities
/// - Defines error types for all failure modes (lexer, parser, evaluator).
/// - Attaches spans and, for runtime errors, the failing frame.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and scoping.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the frames that hold variable bindings.
pub mod interpreter;
/// Source text and locations within it.
///
/// Every token, AST node, value and error carries a span pointing back into
/// the source it came from.
pub mod span;
/// General utilities for numeric conversion.
pub mod util;

/// Stack size for a thread that runs the interpreter.
///
/// Parsing and evaluation recurse along the expression tree and the call
/// chain. Both are capped ([`interpreter::parser::core::MAX_NESTING`],
/// [`interpreter::evaluator::core::MAX_EVAL_DEPTH`]), and this much stack
/// is enough to reach either cap without overflowing, even in debug builds.
pub const STACK_SIZE: usize = 64 * 1024 * 1024;

/// Creates the root frame of a session.
///
/// The frame is named `<program>` and starts out with `null = 0`,
/// `true = 1` and `false = 0` bound.
///
/// # Example
/// ```
/// let context = scenev::global_context();
/// assert_eq!(context.lookup("true").unwrap().to_string(), "1");
/// ```
#[must_use]
pub fn global_context() -> Rc<Context> {
    let context = Context::root(PROGRAM_NAME);
    for (name, value) in [("null", 0), ("true", 1), ("false", 0)] {
        context.define(name, Value::int(value, Span::synthetic(name)).with_context(&context));
    }
    context
}

/// Runs one input through the lexer, the parser and the evaluator.
///
/// Bindings made by the input are written into `context`, so passing the same
/// context to successive calls gives the persistent behaviour of a REPL
/// session.
///
/// # Parameters
/// - `filename`: Name shown in error reports.
/// - `source`: The text to run.
/// - `context`: The frame to evaluate in.
///
/// # Returns
/// The value of the expression, or `None` if it produced none.
///
/// # Errors
/// The first lexical, syntax or runtime error. Its `Display` output is the
/// full human-readable report.
///
/// # Examples
/// ```
/// use scenev::{global_context, run};
///
/// let context = global_context();
/// assert!(run("<stdin>", "var x = 20", &context).unwrap().is_none());
/// let value = run("<stdin>", "x + 1", &context).unwrap().unwrap();
/// assert_eq!(value.to_string(), "21");
///
/// // 'y' is not defined
/// assert!(run("<stdin>", "y + 1", &context).is_err());
/// ```
pub fn run(filename: &str, source: &str, context: &Rc<Context>) -> Result<Option<Value>, Error> {
    let source = Rc::new(Source::new(filename, source));
    let tokens = tokenize(&source)?;
    let expr = parse(&tokens)?;
    Ok(context.eval(&expr)?)
}
