use std::io::{BufRead, Write};

use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Evaluates a unary operator applied to a subexpression.
    ///
    /// Prefix forms:
    /// - `-` negates a number (integers stay integers, checked for
    ///   overflow),
    /// - `!` inverts a boolean,
    /// - `~` inverts the 32-bit view of a number.
    ///
    /// Postfix `++` and `--` are handled by [`Self::eval_step`]: they
    /// require a variable operand and store the updated value.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `operand`: Operand expression.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed value.
    pub(crate) fn eval_unary(&mut self,
                             op: UnaryOperator,
                             operand: &Expr,
                             line: usize)
                             -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match self.eval(operand)? {
                Value::Integer(n) => n.checked_neg()
                                      .map(Value::Integer)
                                      .ok_or(RuntimeError::Overflow { line }),
                Value::Real(r) => Ok(Value::Real(-r)),
                _ => Err(RuntimeError::ExpectedNumber { line }),
            },

            UnaryOperator::Not => Ok(Value::Bool(!self.eval(operand)?.as_bool(line)?)),

            UnaryOperator::BitNot => {
                let bits = self.eval(operand)?.as_i32_bits(line)?;
                Ok(Value::Integer(i64::from(!bits)))
            },

            UnaryOperator::Increment | UnaryOperator::Decrement => {
                self.eval_step(op, operand, line)
            },
        }
    }

    /// Evaluates a postfix increment or decrement.
    ///
    /// The operand must be a variable holding a number. The variable is
    /// updated in place (subject to the `const` check) and the updated
    /// value is the expression's result.
    ///
    /// # Errors
    /// - [`RuntimeError::AssignTarget`] when the operand is not a variable.
    /// - [`RuntimeError::UnknownVariable`] when the name is unbound.
    /// - [`RuntimeError::ExpectedNumber`] for non-numeric values.
    fn eval_step(&mut self, op: UnaryOperator, operand: &Expr, line: usize) -> EvalResult<Value> {
        let Expr::Variable { name, .. } = operand else {
            return Err(RuntimeError::AssignTarget { line });
        };

        let current = self.env
                          .borrow()
                          .get(name)
                          .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                         line })?;

        let forward = op == UnaryOperator::Increment;
        let updated = match current {
            Value::Integer(n) => {
                let stepped = if forward {
                    n.checked_add(1)
                } else {
                    n.checked_sub(1)
                };
                Value::Integer(stepped.ok_or(RuntimeError::Overflow { line })?)
            },
            Value::Real(r) => Value::Real(if forward { r + 1.0 } else { r - 1.0 }),
            _ => return Err(RuntimeError::ExpectedNumber { line }),
        };

        self.env.borrow_mut().assign(name, updated.clone(), line)?;
        Ok(updated)
    }
}
