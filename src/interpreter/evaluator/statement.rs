use std::io::{BufRead, Write};

use crate::{
    ast::{DeclarationKind, Expr, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::Value,
    },
};

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Executes a `let` or `const` declaration.
    ///
    /// The initializer is evaluated first (a `let` without one defaults to
    /// integer zero); the name is then bound in the current frame. A name
    /// already bound in the *same* frame is a duplicate-declaration error;
    /// shadowing an enclosing frame is allowed and unwinds when the frame
    /// exits.
    ///
    /// # Parameters
    /// - `kind`: Whether the binding is `let` or `const`.
    /// - `name`: The declared name.
    /// - `initializer`: Optional initializer expression.
    /// - `line`: Line number for error reporting.
    pub(crate) fn exec_variable_declaration(&mut self,
                                            kind: DeclarationKind,
                                            name: &str,
                                            initializer: Option<&Expr>,
                                            line: usize)
                                            -> EvalResult<Flow> {
        let value = match initializer {
            Some(expr) => self.eval(expr)?,
            None => Value::Integer(0),
        };

        if self.env.borrow().is_defined_here(name) {
            return Err(RuntimeError::DuplicateDeclaration { name: name.to_string(),
                                                            line });
        }

        self.env
            .borrow_mut()
            .define(name, value, kind == DeclarationKind::Const);
        Ok(Flow::Normal)
    }

    /// Executes a `write` statement: evaluates the message and prints it
    /// followed by a newline.
    pub(crate) fn exec_write(&mut self, message: &Expr, line: usize) -> EvalResult<Flow> {
        let value = self.eval(message)?;
        self.write_value_line(&value, line)?;
        Ok(Flow::Normal)
    }

    /// Executes a `read` statement: prints the optional prompt, consumes
    /// one input line, parses it and binds it to the target variable.
    ///
    /// The binding follows assignment rules when the name already exists
    /// (including the `const` check) and creates the variable in the
    /// current frame otherwise.
    pub(crate) fn exec_read(&mut self,
                            target: &str,
                            prompt: Option<&Expr>,
                            line: usize)
                            -> EvalResult<Flow> {
        let value = self.eval_read(prompt, line)?;
        self.env.borrow_mut().assign_or_define(target, value, line)?;
        Ok(Flow::Normal)
    }

    /// Executes an `if` statement.
    ///
    /// The condition must evaluate to a boolean; anything else is a runtime
    /// error. The taken branch's control flow propagates.
    pub(crate) fn exec_if(&mut self,
                          condition: &Expr,
                          then_branch: &Statement,
                          else_branch: Option<&Statement>,
                          line: usize)
                          -> EvalResult<Flow> {
        if self.eval(condition)?.as_bool(line)? {
            self.exec_statement(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.exec_statement(else_branch)
        } else {
            Ok(Flow::Normal)
        }
    }

    /// Executes a `while` loop.
    ///
    /// Iterates while the condition evaluates to `true`; a condition that
    /// is not a boolean ends the loop rather than failing. A Return signal
    /// from the body crosses the loop unchanged.
    pub(crate) fn exec_while(&mut self, condition: &Expr, body: &Statement) -> EvalResult<Flow> {
        loop {
            let Value::Bool(keep_going) = self.eval(condition)? else {
                break;
            };
            if !keep_going {
                break;
            }

            let flow = self.exec_statement(body)?;
            if let Flow::Return { .. } = flow {
                return Ok(flow);
            }
        }

        Ok(Flow::Normal)
    }

    /// Executes a three-clause `for` loop.
    ///
    /// The loop runs in its own frame so that an `init` declaration does
    /// not leak. `init` runs once, then the loop iterates like `while`,
    /// evaluating `increment` after each body pass.
    pub(crate) fn exec_for(&mut self,
                           init: &Statement,
                           condition: &Expr,
                           increment: &Expr,
                           body: &Statement)
                           -> EvalResult<Flow> {
        self.in_child_scope(|interp| {
                let flow = interp.exec_statement(init)?;
                if let Flow::Return { .. } = flow {
                    return Ok(flow);
                }

                loop {
                    let Value::Bool(keep_going) = interp.eval(condition)? else {
                        break;
                    };
                    if !keep_going {
                        break;
                    }

                    let flow = interp.exec_statement(body)?;
                    if let Flow::Return { .. } = flow {
                        return Ok(flow);
                    }

                    interp.eval(increment)?;
                }

                Ok(Flow::Normal)
            })
    }

    /// Executes a for-each loop over an array.
    ///
    /// The iterable must evaluate to an array. The loop variable is bound
    /// in the loop's frame once per element, in order.
    pub(crate) fn exec_foreach(&mut self,
                               variable: &str,
                               iterable: &Expr,
                               body: &Statement,
                               line: usize)
                               -> EvalResult<Flow> {
        let value = self.eval(iterable)?;
        let Value::Array(elements) = value else {
            return Err(RuntimeError::ExpectedArray { line });
        };

        self.in_child_scope(|interp| {
                for element in elements.iter() {
                    interp.env.borrow_mut().define(variable, element.clone(), false);

                    let flow = interp.exec_statement(body)?;
                    if let Flow::Return { .. } = flow {
                        return Ok(flow);
                    }
                }

                Ok(Flow::Normal)
            })
    }

    /// Executes a `return` statement by raising the Return signal.
    ///
    /// The operand defaults to `null`. The signal is trapped by the nearest
    /// enclosing function call; everything else passes it through.
    pub(crate) fn exec_return(&mut self, value: Option<&Expr>, line: usize) -> EvalResult<Flow> {
        let value = match value {
            Some(expr) => self.eval(expr)?,
            None => Value::Null,
        };

        Ok(Flow::Return { value, line })
    }

    /// Executes an `include` statement.
    ///
    /// The named file is read, lexed and parsed; its statements then
    /// execute in the *current* environment (lexical inclusion, not a
    /// module scope). The parser's optional dotted target does not affect
    /// execution.
    ///
    /// # Errors
    /// Open, lex and parse failures wrap into
    /// [`RuntimeError::IncludeFailed`] at the include's line; runtime
    /// errors raised by included statements propagate unchanged, carrying
    /// their own lines.
    pub(crate) fn exec_include(&mut self, path: &str, line: usize) -> EvalResult<Flow> {
        let source =
            std::fs::read_to_string(path).map_err(|error| RuntimeError::IncludeFailed {
                                             path: path.to_string(),
                                             details: error.to_string(),
                                             line,
                                         })?;

        let statements =
            crate::parse_source(&source).map_err(|error| RuntimeError::IncludeFailed {
                                            path: path.to_string(),
                                            details: error.to_string(),
                                            line,
                                        })?;

        for statement in &statements {
            let flow = self.exec_statement(statement)?;
            if let Flow::Return { .. } = flow {
                return Ok(flow);
            }
        }

        Ok(Flow::Normal)
    }

    /// Executes a block of statements in a fresh child frame.
    ///
    /// Declarations inside the block unwind when it exits; a Return signal
    /// from any child propagates immediately.
    pub(crate) fn exec_block(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        self.in_child_scope(|interp| {
                for statement in statements {
                    let flow = interp.exec_statement(statement)?;
                    if let Flow::Return { .. } = flow {
                        return Ok(flow);
                    }
                }

                Ok(Flow::Normal)
            })
    }
}
