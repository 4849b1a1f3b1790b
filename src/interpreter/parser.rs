/// Core parsing entry points shared by the other parser modules.
///
/// Exposes the `ParseResult` alias and the top-level expression parser that
/// starts the precedence ladder.
pub mod core;

/// Binary operator parsing.
///
/// Implements the precedence-climbing ladder for all binary operators, from
/// assignment at the bottom to exponentiation at the top.
pub mod binary;

/// Unary, postfix and primary expression parsing.
///
/// Handles prefix operators, postfix increment/decrement, indexing, calls,
/// literals, grouping, array literals and `read` expressions.
pub mod unary;

/// Statement parsing.
///
/// Dispatches on the leading token and parses every statement form of the
/// language, from declarations to loops and includes.
pub mod statement;

/// Block parsing.
///
/// Parses `{ ... }` statement sequences and the single-statement shorthand
/// used by control-flow bodies.
pub mod block;

/// Utility functions shared by the parser modules.
///
/// Provides comma-separated list parsing, identifier extraction and token
/// expectation helpers.
pub mod utils;
