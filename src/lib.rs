//! # quill
//!
//! quill is a small dynamically-typed scripting language with a
//! tree-walking interpreter. Source text is tokenized, parsed into an
//! abstract syntax tree and evaluated directly, with lexically-scoped
//! environments, function closures, console I/O and file inclusion.

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
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::statement::parse_statement},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches metadata (such as source lines) to AST nodes for error
///   reporting.
/// - Enables extensible and robust handling of parsed code.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including error kinds, descriptions, and
/// source locations for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, error handling, and all supporting infrastructure to
/// provide a complete runtime for source code execution. It exposes the
/// public API for interpreting programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers and conversion routines that are
/// used throughout the interpreter, parser, and evaluator. These include
/// safe conversions between integer and floating-point types, and any
/// general-purpose functions not specific to a single phase.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64` without silent data
///   loss.
/// - Provide general utility functions used in multiple modules.
pub mod util;

/// Lexes and parses a complete source string into top-level statements.
///
/// The statements are returned in source order; an exhausted token stream
/// ends the sequence. This is also the entry point the `include` statement
/// uses for the files it loads.
///
/// # Errors
/// Returns the first [`ParseError`] raised by the lexer or the parser,
/// carrying the 1-based line of the offending input.
///
/// # Examples
/// ```
/// use quill::parse_source;
///
/// let statements = parse_source("let x = 1; write(x);").unwrap();
/// assert_eq!(statements.len(), 2);
///
/// assert!(parse_source("let = 1;").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Vec<Statement>, ParseError> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let mut statements = Vec::new();
    while iter.peek().is_some() {
        statements.push(parse_statement(&mut iter)?);
    }

    Ok(statements)
}

/// Parses and executes a complete source string against the process's
/// standard streams.
///
/// # Errors
/// Returns an error if parsing fails or if any runtime error occurs during
/// execution.
///
/// # Examples
/// ```
/// use quill::run_source;
///
/// // Simple script: no error should occur.
/// let res = run_source("let sum = 1 + 2;");
/// assert!(res.is_ok());
///
/// // Example with an intentional error (unknown variable).
/// let res = run_source("let y = x + 1;"); // 'x' is not defined
/// assert!(res.is_err());
/// ```
pub fn run_source(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let statements = parse_source(source)?;

    let mut interpreter = Interpreter::new();
    interpreter.interpret(&statements)?;

    Ok(())
}
