/// Core value representation.
///
/// Defines [`core::Value`], the data it carries, and the provenance (source
/// span and owning frame) attached to every runtime value.
pub mod core;
/// User-defined function values.
///
/// A function value pairs a parsed definition with the frame it was defined
/// in. Invocation lives in the evaluator.
pub mod function;
/// Numeric values.
///
/// Integer and floating-point arithmetic with int → float promotion and
/// overflow detection.
pub mod number;
/// Operators on values.
///
/// Binary and unary operator semantics: arithmetic, comparison, logic,
/// string concatenation and string indexing.
pub mod ops;
