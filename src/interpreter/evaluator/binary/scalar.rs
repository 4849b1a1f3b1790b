use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Evaluates an arithmetic operation or a string concatenation.
///
/// `+` concatenates when either operand is a string (the other side may be
/// a string or a number, which is rendered in its decimal form). All other
/// combinations must be numeric: integer-only operands stay integers with
/// checked arithmetic, any real operand promotes both sides. `/` on two
/// integers truncates; division and modulus by zero fail.
///
/// # Parameters
/// - `op`: One of `Add`, `Sub`, `Mul`, `Div`, `Mod`.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing the computed scalar.
///
/// # Example
/// ```
/// use quill::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::scalar::eval_arithmetic, value::Value},
/// };
///
/// let x = Value::Integer(7);
/// let y = Value::Integer(2);
///
/// let quotient = eval_arithmetic(BinaryOperator::Div, &x, &y, 1).unwrap();
/// assert_eq!(quotient, Value::Integer(3));
/// ```
pub fn eval_arithmetic(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
    if op == BinaryOperator::Add {
        match (left, right) {
            (Value::Str(a), Value::Str(b)) => {
                return Ok(Value::Str(format!("{a}{b}")));
            },
            (Value::Str(a), b) if b.is_numeric() => {
                return Ok(Value::Str(format!("{a}{b}")));
            },
            (a, Value::Str(b)) if a.is_numeric() => {
                return Ok(Value::Str(format!("{a}{b}")));
            },
            _ => {},
        }
    }

    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => eval_integer(op, *a, *b, line),

        _ if left.is_numeric() && right.is_numeric() => {
            let a = left.as_real(line)?;
            let b = right.as_real(line)?;
            eval_real(op, a, b, line)
        },

        _ => Err(RuntimeError::TypeError { details: format!("Cannot use {op} on {} and {}",
                                                            left.type_name(),
                                                            right.type_name()),
                                           line }),
    }
}

/// Integer arithmetic with overflow and zero checks.
///
/// Division truncates toward zero, matching `i64` division.
fn eval_integer(op: BinaryOperator, a: i64, b: i64, line: usize) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Sub => a.checked_sub(b),
        BinaryOperator::Mul => a.checked_mul(b),
        BinaryOperator::Div => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            a.checked_div(b)
        },
        BinaryOperator::Mod => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            a.checked_rem(b)
        },
        _ => unreachable!(),
    };

    result.map(Value::Integer)
          .ok_or(RuntimeError::Overflow { line })
}

/// Floating-point arithmetic with zero checks for division and modulus.
fn eval_real(op: BinaryOperator, a: f64, b: f64, line: usize) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            a / b
        },
        BinaryOperator::Mod => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            a % b
        },
        _ => unreachable!(),
    };

    Ok(Value::Real(result))
}
