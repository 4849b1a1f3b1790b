/// Binary operator dispatch.
///
/// Routes each operator class to its specialized evaluator.
pub mod core;

/// Scalar arithmetic and string concatenation.
///
/// Implements `+`, `-`, `*`, `/` and `%` with integer/real promotion and
/// zero checks.
pub mod scalar;

/// Relational, equality and membership comparisons.
pub mod comparison;

/// Logical operators over booleans.
pub mod logic;

/// Bitwise and shift operators over the 32-bit integer view.
pub mod bits;

/// Exponentiation and roots.
pub mod power;
