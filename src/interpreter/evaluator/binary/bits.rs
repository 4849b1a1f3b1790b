use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Evaluates a bitwise or shift operation.
///
/// Both operands are coerced to a 32-bit integer view (reals truncate
/// toward zero first). `<<` and `>>` are arithmetic shifts on that view;
/// `<<<` and `>>>` operate on the unsigned reinterpretation, so `>>>`
/// zero-fills. Shift amounts are masked to the 0..32 range.
///
/// # Parameters
/// - `op`: One of `BitAnd`, `BitOr`, `BitXor`, `Shl`, `Shr`, `ShlLogical`,
///   `ShrLogical`.
/// - `left`: The left-hand value.
/// - `right`: The right-hand value.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// An integer value.
///
/// # Example
/// ```
/// use quill::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::bits::eval_bits, value::Value},
/// };
///
/// let result = eval_bits(BinaryOperator::Shl, &Value::Integer(1), &Value::Integer(4), 1);
/// assert_eq!(result.unwrap(), Value::Integer(16));
/// ```
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn eval_bits(op: BinaryOperator,
                 left: &Value,
                 right: &Value,
                 line: usize)
                 -> EvalResult<Value> {
    let a = left.as_i32_bits(line)?;
    let b = right.as_i32_bits(line)?;

    let result: i64 = match op {
        BinaryOperator::BitAnd => i64::from(a & b),
        BinaryOperator::BitOr => i64::from(a | b),
        BinaryOperator::BitXor => i64::from(a ^ b),
        BinaryOperator::Shl => i64::from(a.wrapping_shl(b as u32)),
        BinaryOperator::Shr => i64::from(a.wrapping_shr(b as u32)),
        BinaryOperator::ShlLogical => i64::from((a as u32).wrapping_shl(b as u32) as i32),
        BinaryOperator::ShrLogical => i64::from((a as u32).wrapping_shr(b as u32)),
        _ => unreachable!(),
    };

    Ok(Value::Integer(result))
}
