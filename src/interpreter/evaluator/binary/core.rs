use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::{bits, comparison, logic, power, scalar},
            core::EvalResult,
        },
        value::Value,
    },
};

/// Evaluates a binary operation between two values.
///
/// This function routes the operation to specialized handlers depending on
/// the operator class: arithmetic and concatenation, exponentiation and
/// roots, comparisons and membership, logic, and bit manipulation. The
/// nullish fallback is resolved directly here.
///
/// Operands arrive already evaluated; the conditional operator, which needs
/// lazy branches, is not a binary operator and is handled by the
/// expression dispatcher.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing the evaluated result.
///
/// # Example
/// ```
/// use quill::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::core::eval_binary, value::Value},
/// };
///
/// let left = Value::Integer(3);
/// let right = Value::Integer(4);
///
/// let result = eval_binary(BinaryOperator::Add, &left, &right, 1);
/// assert_eq!(result.unwrap(), Value::Integer(7));
/// ```
pub fn eval_binary(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   line: usize)
                   -> EvalResult<Value> {
    use BinaryOperator::{
        Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, In, Less, LessEqual,
        Mod, Mul, NotEqual, NotIn, Nullish, Or, Pow, Root, Shl, ShlLogical, Shr, ShrLogical, Sub,
    };

    match op {
        Add | Sub | Mul | Div | Mod => scalar::eval_arithmetic(op, left, right, line),

        Pow | Root => power::eval_power(op, left, right, line),

        Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
            comparison::eval_comparison(op, left, right, line)
        },

        In | NotIn => comparison::eval_membership(op, left, right, line),

        And | Or => logic::eval_logic(op, left, right, line),

        BitAnd | BitOr | BitXor | Shl | Shr | ShlLogical | ShrLogical => {
            bits::eval_bits(op, left, right, line)
        },

        Nullish => Ok(if left.is_null() {
            right.clone()
        } else {
            left.clone()
        }),
    }
}
