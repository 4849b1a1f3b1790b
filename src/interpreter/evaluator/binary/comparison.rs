use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Evaluates a comparison of the form `Value <Operator> Value`.
///
/// For `Equal` and `NotEqual`, values of any type are compared using
/// structural equality without coercion: values of different types are
/// simply unequal. Relational operators are defined when both operands are
/// numeric (integers compare exactly, mixed operands promote to real) or
/// both are strings (lexicographic).
///
/// # Parameters
/// - `op`: The comparison operator.
/// - `left`: The left-hand value.
/// - `right`: The right-hand value.
/// - `line`: Current line number used for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing a boolean result.
///
/// # Example
/// ```
/// use quill::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::comparison::eval_comparison, value::Value},
/// };
///
/// let a = Value::Real(3.0);
/// let b = Value::Real(5.0);
///
/// let result = eval_comparison(BinaryOperator::Less, &a, &b, 1);
/// assert_eq!(result.unwrap(), Value::Bool(true));
/// ```
pub fn eval_comparison(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
    match op {
        BinaryOperator::Equal => Ok(Value::Bool(left == right)),
        BinaryOperator::NotEqual => Ok(Value::Bool(left != right)),

        BinaryOperator::Less
        | BinaryOperator::Greater
        | BinaryOperator::LessEqual
        | BinaryOperator::GreaterEqual => {
            let ordering = compare_operands(left, right, line)?;
            Ok(Value::Bool(match op {
                               BinaryOperator::Less => ordering == Ordering::Less,
                               BinaryOperator::Greater => ordering == Ordering::Greater,
                               BinaryOperator::LessEqual => ordering != Ordering::Greater,
                               BinaryOperator::GreaterEqual => ordering != Ordering::Less,
                               _ => unreachable!(),
                           }))
        },

        _ => unreachable!(),
    }
}

/// Orders two comparable operands.
///
/// Integer pairs compare exactly; mixed numeric pairs promote to real;
/// string pairs compare lexicographically. Any other pairing is a type
/// error. An incomparable real pair (a NaN operand) is reported as a type
/// error rather than picking an arbitrary order.
fn compare_operands(left: &Value, right: &Value, line: usize) -> EvalResult<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),

        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),

        _ if left.is_numeric() && right.is_numeric() => {
            let a = left.as_real(line)?;
            let b = right.as_real(line)?;
            a.partial_cmp(&b)
             .ok_or_else(|| RuntimeError::TypeError { details:
                                                          "Cannot order these values".to_string(),
                                                      line })
        },

        _ => Err(RuntimeError::TypeError { details: format!("Cannot compare {} and {}",
                                                            left.type_name(),
                                                            right.type_name()),
                                           line }),
    }
}

/// Evaluates an array membership test.
///
/// The right operand must be an array; the left operand is searched for by
/// structural equality.
///
/// # Parameters
/// - `op`: `In` or `NotIn`.
/// - `left`: The needle.
/// - `right`: The array to search.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// A boolean value.
pub fn eval_membership(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
    let elements = right.as_array(line)?;
    let found = elements.contains(left);

    Ok(Value::Bool(match op {
                       BinaryOperator::In => found,
                       BinaryOperator::NotIn => !found,
                       _ => unreachable!(),
                   }))
}
