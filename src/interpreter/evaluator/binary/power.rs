use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Evaluates exponentiation and roots.
///
/// `a ^ b` computes `pow(a, b)`: two integers with a non-negative exponent
/// stay in checked integer arithmetic, everything else promotes to real.
/// `a ^/ b` computes the b-th root as `pow(a, 1/b)` and fails when the
/// degree is zero.
///
/// # Parameters
/// - `op`: `Pow` or `Root`.
/// - `left`: The base.
/// - `right`: The exponent or root degree.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The computed value.
///
/// # Example
/// ```
/// use quill::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::power::eval_power, value::Value},
/// };
///
/// let squared = eval_power(BinaryOperator::Pow, &Value::Integer(2), &Value::Integer(10), 1);
/// assert_eq!(squared.unwrap(), Value::Integer(1024));
///
/// let root = eval_power(BinaryOperator::Root, &Value::Integer(27), &Value::Integer(3), 1).unwrap();
/// let Value::Real(r) = root else { unreachable!() };
/// assert!((r - 3.0).abs() < 1e-12);
/// ```
pub fn eval_power(op: BinaryOperator,
                  left: &Value,
                  right: &Value,
                  line: usize)
                  -> EvalResult<Value> {
    match op {
        BinaryOperator::Pow => match (left, right) {
            (Value::Integer(base), Value::Integer(exponent)) if *exponent >= 0 => {
                let exponent =
                    u32::try_from(*exponent).map_err(|_| RuntimeError::Overflow { line })?;
                base.checked_pow(exponent)
                    .map(Value::Integer)
                    .ok_or(RuntimeError::Overflow { line })
            },

            _ => {
                let a = left.as_real(line)?;
                let b = right.as_real(line)?;
                Ok(Value::Real(a.powf(b)))
            },
        },

        BinaryOperator::Root => {
            let degree_is_zero = match right {
                Value::Integer(n) => *n == 0,
                Value::Real(r) => *r == 0.0,
                _ => return Err(RuntimeError::ExpectedNumber { line }),
            };
            if degree_is_zero {
                return Err(RuntimeError::RootDegreeZero { line });
            }

            let a = left.as_real(line)?;
            let b = right.as_real(line)?;
            Ok(Value::Real(a.powf(1.0 / b)))
        },

        _ => unreachable!(),
    }
}
