/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, applies operators, manages variable
/// bindings and calls functions. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates every expression variant.
/// - Runs function calls in fresh frames for lexical scoping.
/// - Reports runtime errors such as division by zero or invalid operations.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a literal, name, keyword, operator or delimiter, and each
/// carrying its span.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source locations.
/// - Decodes numeric and string literals.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates the grammar, reporting the most specific "Expected ..."
///   message available.
pub mod parser;
/// Evaluation frames and their symbol tables.
pub mod scope;
/// The value module defines the runtime data types for evaluation.
///
/// Values are numbers, strings and functions. Each remembers the span that
/// produced it and the frame it was produced in.
///
/// # Responsibilities
/// - Defines `Value` and its payload variants.
/// - Implements arithmetic, comparison, logic and string operators.
/// - Promotes integers to floats in mixed arithmetic.
pub mod value;
