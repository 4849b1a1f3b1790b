use std::io::{BufRead, Write};

use crate::{
    ast::{AssignOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::eval_binary,
            core::{EvalResult, Interpreter},
        },
        value::Value,
    },
};

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Looks up a variable by name.
    ///
    /// Lookup walks the environment chain from the innermost frame
    /// outward. If the variable is not found, an `UnknownVariable` error is
    /// returned.
    ///
    /// # Parameters
    /// - `name`: Variable name.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The variable's value, if found.
    pub(crate) fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.env
            .borrow()
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// Evaluates the conditional operator.
    ///
    /// The condition must be a boolean; only the selected branch is
    /// evaluated. For the short form `c ?: b` (no then-branch) a true
    /// condition yields the condition's own value.
    ///
    /// # Parameters
    /// - `condition`: The condition expression.
    /// - `then_branch`: Branch taken when true; absent for the short form.
    /// - `else_branch`: Branch taken when false.
    /// - `line`: Line number for error reporting.
    pub(crate) fn eval_ternary(&mut self,
                               condition: &Expr,
                               then_branch: Option<&Expr>,
                               else_branch: &Expr,
                               line: usize)
                               -> EvalResult<Value> {
        let cond = self.eval(condition)?.as_bool(line)?;

        match then_branch {
            Some(then_expr) => {
                if cond {
                    self.eval(then_expr)
                } else {
                    self.eval(else_branch)
                }
            },
            None => {
                if cond {
                    Ok(Value::Bool(true))
                } else {
                    self.eval(else_branch)
                }
            },
        }
    }

    /// Evaluates an assignment expression and returns the stored value.
    ///
    /// The target must be a variable reference; the name must already be
    /// bound somewhere in the chain, and `const` bindings reject writes.
    /// Compound operators read the current value, combine it with the
    /// right-hand side and store the result. `??=` stores only when the
    /// current value is `null`, otherwise it yields the current value
    /// without evaluating the right-hand side.
    ///
    /// # Parameters
    /// - `target`: The left-hand side expression.
    /// - `op`: The assignment operator.
    /// - `value`: The right-hand side expression.
    /// - `line`: Line number for error reporting.
    pub(crate) fn eval_assign(&mut self,
                              target: &Expr,
                              op: AssignOperator,
                              value: &Expr,
                              line: usize)
                              -> EvalResult<Value> {
        let Expr::Variable { name, .. } = target else {
            return Err(RuntimeError::AssignTarget { line });
        };

        match op {
            AssignOperator::Assign => {
                let new_value = self.eval(value)?;
                self.env.borrow_mut().assign(name, new_value.clone(), line)?;
                Ok(new_value)
            },

            AssignOperator::Nullish => {
                let current = self.eval_variable(name, line)?;
                if !current.is_null() {
                    return Ok(current);
                }

                let new_value = self.eval(value)?;
                self.env.borrow_mut().assign(name, new_value.clone(), line)?;
                Ok(new_value)
            },

            compound => {
                let Some(binary_op) = compound.combining_operator() else {
                    unreachable!()
                };

                let current = self.eval_variable(name, line)?;
                let rhs = self.eval(value)?;
                let result = eval_binary(binary_op, &current, &rhs, line)?;

                self.env.borrow_mut().assign(name, result.clone(), line)?;
                Ok(result)
            },
        }
    }

    /// Evaluates an array indexing expression.
    ///
    /// The target must be an array and the index a non-negative integer
    /// strictly less than the array length.
    ///
    /// # Parameters
    /// - `array`: Expression producing the array.
    /// - `index`: Expression producing the index.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// A clone of the element at the given index.
    pub(crate) fn eval_index(&mut self,
                             array: &Expr,
                             index: &Expr,
                             line: usize)
                             -> EvalResult<Value> {
        let array_value = self.eval(array)?;
        let index_value = self.eval(index)?;

        if !index_value.is_integer() {
            return Err(RuntimeError::TypeError { details:
                                                     "Array index must be an integer".to_string(),
                                                 line });
        }
        let index = index_value.as_integer(line)?;

        let Value::Array(elements) = &array_value else {
            return Err(RuntimeError::TypeError { details:
                                                     "Tried to index a non-array value".to_string(),
                                                 line });
        };

        match usize::try_from(index) {
            Ok(i) if i < elements.len() => Ok(elements[i].clone()),
            _ => Err(RuntimeError::IndexOutOfBounds { len: elements.len(),
                                                      found: index,
                                                      line }),
        }
    }

    /// Evaluates an array literal expression.
    ///
    /// Each element expression is evaluated in order and the results are
    /// collected into a `Value::Array`.
    pub(crate) fn eval_array_literal(&mut self, elements: &[Expr]) -> EvalResult<Value> {
        let mut values = Vec::with_capacity(elements.len());

        for element in elements {
            values.push(self.eval(element)?);
        }

        Ok(Value::from(values))
    }

    /// Evaluates a console read: prints the optional prompt (no newline),
    /// consumes one input line and parses it.
    pub(crate) fn eval_read(&mut self, prompt: Option<&Expr>, line: usize) -> EvalResult<Value> {
        if let Some(prompt) = prompt {
            let value = self.eval(prompt)?;
            self.write_prompt(&value, line)?;
        }

        let input = self.read_input_line(line)?;
        Ok(parse_input(&input))
    }

    /// Writes a formatted value followed by a newline to the output.
    pub(crate) fn write_value_line(&mut self, value: &Value, line: usize) -> EvalResult<()> {
        writeln!(self.writer, "{value}").map_err(|error| RuntimeError::Io { details:
                                                                                error.to_string(),
                                                                            line })
    }

    /// Writes a prompt without a newline and flushes, so it is visible
    /// before input is consumed.
    pub(crate) fn write_prompt(&mut self, value: &Value, line: usize) -> EvalResult<()> {
        write!(self.writer, "{value}").map_err(|error| RuntimeError::Io { details:
                                                                              error.to_string(),
                                                                          line })?;
        self.writer
            .flush()
            .map_err(|error| RuntimeError::Io { details: error.to_string(),
                                                line })
    }

    /// Reads one line from the input, stripping the trailing newline (and a
    /// carriage return before it, for CRLF input).
    pub(crate) fn read_input_line(&mut self, line: usize) -> EvalResult<String> {
        let mut buffer = String::new();
        self.reader
            .read_line(&mut buffer)
            .map_err(|error| RuntimeError::Io { details: error.to_string(),
                                                line })?;

        if buffer.ends_with('\n') {
            buffer.pop();
            if buffer.ends_with('\r') {
                buffer.pop();
            }
        }

        Ok(buffer)
    }
}

/// Parses one line of console input into a value.
///
/// A line made entirely of ASCII digits becomes an integer; otherwise, a
/// line that parses as a floating-point number becomes a real; anything
/// else stays a string.
///
/// # Example
/// ```
/// use quill::interpreter::{evaluator::utils::parse_input, value::Value};
///
/// assert_eq!(parse_input("42"), Value::Integer(42));
/// assert_eq!(parse_input("-1.5"), Value::Real(-1.5));
/// assert_eq!(parse_input("hello"), Value::Str("hello".to_string()));
/// ```
#[must_use]
pub fn parse_input(input: &str) -> Value {
    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
       && let Ok(n) = input.parse::<i64>()
    {
        return Value::Integer(n);
    }

    if let Ok(r) = input.parse::<f64>() {
        return Value::Real(r);
    }

    Value::Str(input.to_string())
}
