use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Evaluates a logical operation between two boolean values.
///
/// Both operands must be booleans; anything else is an `ExpectedBoolean`
/// error. Operands arrive already evaluated, so there is no
/// short-circuiting: `false && f()` still calls `f`.
///
/// # Parameters
/// - `op`: `And` or `Or`.
/// - `left`: The left-hand value.
/// - `right`: The right-hand value.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// A boolean value.
///
/// # Example
/// ```
/// use quill::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::logic::eval_logic, value::Value},
/// };
///
/// let result = eval_logic(BinaryOperator::And, &Value::Bool(true), &Value::Bool(false), 1);
/// assert_eq!(result.unwrap(), Value::Bool(false));
/// ```
pub fn eval_logic(op: BinaryOperator,
                  left: &Value,
                  right: &Value,
                  line: usize)
                  -> EvalResult<Value> {
    let a = left.as_bool(line)?;
    let b = right.as_bool(line)?;

    Ok(Value::Bool(match op {
                       BinaryOperator::And => a && b,
                       BinaryOperator::Or => a || b,
                       _ => unreachable!(),
                   }))
}
