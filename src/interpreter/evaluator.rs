/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter` type, the `Flow` control signal, the
/// expression and statement dispatchers and the scope helpers.
pub mod core;

/// The environment chain.
///
/// Defines variable bindings, runtime function records and the chained
/// lookup, assignment and declaration rules.
pub mod env;

/// Statement execution.
///
/// Implements declarations, console I/O statements, control flow, includes
/// and blocks.
pub mod statement;

/// Function declaration and call evaluation.
///
/// Handles user-defined functions, the `read`/`write` builtins, argument
/// checking and the Return signal trap.
pub mod function;

/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions, including
/// arithmetic, comparisons, logical operators, bit manipulation and
/// membership.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements prefix negation, logical and bitwise NOT, and the postfix
/// increment and decrement forms.
pub mod unary;

/// Utility functions for evaluation.
///
/// Provides expression helpers shared by the dispatchers and the console
/// input plumbing.
pub mod utils;
