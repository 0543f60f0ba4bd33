/// Core evaluation logic.
///
/// Holds the `EvalResult` alias, the dispatch over expression variants and
/// the handling of literals and variables.
pub mod core;

/// Binary operator evaluation.
///
/// Evaluates both operands, left first, and applies the operator.
pub mod binary;

/// Unary operator evaluation.
pub mod unary;

/// Conditionals and loops.
///
/// `if`/`elif`/`else`, counting `for` loops and `while` loops. Loops run in
/// the current frame and leave their bindings behind.
pub mod control;

/// Function definition and invocation.
///
/// Builds closures over the defining frame and runs calls in a fresh child of
/// that frame.
pub mod function;
