/// Core parsing logic.
///
/// Holds the token cursor, the `ParseResult` alias and the public entry
/// points. Parsing begins here and descends through the precedence ladder.
pub mod core;

/// Binary operator parsing.
///
/// One generic left-folding loop, instantiated for each precedence level from
/// `and`/`or` down to `**`.
pub mod binary;

/// Prefix operators, calls and atoms.
///
/// The tightest-binding levels of the grammar: `+`, `-` and `not` prefixes,
/// postfix call syntax, literals, names and parenthesised expressions.
pub mod unary;

/// Control flow and function definitions.
///
/// Parses `if`/`elif`/`else`, `for`, `while` and `fn` forms, all of which
/// take `{ expr }` bodies.
pub mod control;

/// Shared parser helpers.
///
/// Comma-separated lists, braced bodies and the rule that decides which of
/// two competing error messages is reported.
pub mod utils;
