use std::{
    cell::RefCell,
    io::{BufRead, BufReader, Stdin, Stdout, Write},
    rc::Rc,
};

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::core::eval_binary, env::Environment},
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Control-flow outcome of executing a statement.
///
/// The `Return` variant is the interpreter's only non-error signal: it is
/// raised by a `return` statement, passes unchanged through blocks and
/// loops, and is trapped by the nearest enclosing function call. Keeping it
/// in the success channel of [`EvalResult`] keeps it strictly separate from
/// the error channel, so it can never surface to the user as an error.
#[derive(Debug)]
pub enum Flow {
    /// Execution fell through normally.
    Normal,
    /// A `return` statement fired.
    Return {
        /// The returned value; `null` when the statement had no operand.
        value: Value,
        /// Line of the `return`, reported when no function call traps it.
        line:  usize,
    },
}

/// Walks the AST and executes it.
///
/// The interpreter owns the current [`Environment`] and the input and
/// output handles used by `read` and `write`. It is generic over the I/O
/// handles so that tests can drive programs with in-memory buffers and
/// assert on the exact bytes produced.
///
/// ## Usage
///
/// An `Interpreter` is created once and fed the statements of a program in
/// order. [`Interpreter::new`] attaches the process's standard streams;
/// [`Interpreter::with_io`] accepts any `BufRead`/`Write` pair.
pub struct Interpreter<R, W> {
    /// The innermost environment frame.
    pub(crate) env:    Rc<RefCell<Environment>>,
    pub(crate) reader: R,
    pub(crate) writer: W,
}

impl Default for Interpreter<BufReader<Stdin>, Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter<BufReader<Stdin>, Stdout> {
    /// Creates an interpreter bound to the process's standard streams.
    #[must_use]
    pub fn new() -> Self {
        Self::with_io(BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Creates an interpreter with an empty global environment reading from
    /// `reader` and writing to `writer`.
    ///
    /// # Example
    /// ```
    /// use std::io::Cursor;
    ///
    /// use quill::{interpreter::evaluator::core::Interpreter, parse_source};
    ///
    /// let statements = parse_source("let x = 2; write(x * 3);").unwrap();
    ///
    /// let mut output = Vec::new();
    /// Interpreter::with_io(Cursor::new(""), &mut output).interpret(&statements)
    ///                                                   .unwrap();
    ///
    /// assert_eq!(output, b"6\n");
    /// ```
    pub fn with_io(reader: R, writer: W) -> Self {
        Self { env: Environment::new_root(),
               reader,
               writer }
    }

    /// Executes a sequence of top-level statements in order.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] raised by a statement. A `return`
    /// that reaches the top level is reported as
    /// [`RuntimeError::ReturnOutsideFunction`].
    pub fn interpret(&mut self, statements: &[Statement]) -> EvalResult<()> {
        for statement in statements {
            if let Flow::Return { line, .. } = self.exec_statement(statement)? {
                return Err(RuntimeError::ReturnOutsideFunction { line });
            }
        }
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches based on expression variant: literals,
    /// variables, unary and binary operations, the conditional operator,
    /// assignments, indexing, calls, array literals and console reads.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The computed [`Value`].
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, line } => self.eval_variable(name, *line),
            Expr::Unary { op, operand, line } => self.eval_unary(*op, operand, *line),
            Expr::Binary { left, op, right, line } => {
                let lval = self.eval(left)?;
                let rval = self.eval(right)?;
                eval_binary(*op, &lval, &rval, *line)
            },
            Expr::Ternary { condition,
                            then_branch,
                            else_branch,
                            line, } => {
                self.eval_ternary(condition, then_branch.as_deref(), else_branch, *line)
            },
            Expr::Assign { target, op, value, line } => {
                self.eval_assign(target, *op, value, *line)
            },
            Expr::Index { array, index, line } => self.eval_index(array, index, *line),
            Expr::Call { name, arguments, line } => self.eval_call(name, arguments, *line),
            Expr::Array { elements, .. } => self.eval_array_literal(elements),
            Expr::Read { prompt, line } => self.eval_read(prompt.as_deref(), *line),
        }
    }

    /// Executes a single statement.
    ///
    /// Handles declarations, console I/O, control flow, function
    /// declarations, includes, blocks and plain expression statements.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    ///
    /// # Returns
    /// The control-flow outcome: [`Flow::Normal`], or [`Flow::Return`]
    /// bubbling up toward the nearest function call.
    pub fn exec_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Expression { expr, .. } => {
                self.eval(expr)?;
                Ok(Flow::Normal)
            },
            Statement::VariableDeclaration { kind,
                                             name,
                                             initializer,
                                             line, } => {
                self.exec_variable_declaration(*kind, name, initializer.as_ref(), *line)
            },
            Statement::Write { message, line } => self.exec_write(message, *line),
            Statement::Read { target, prompt, line } => {
                self.exec_read(target, prompt.as_ref(), *line)
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            line, } => {
                self.exec_if(condition, then_branch, else_branch.as_deref(), *line)
            },
            Statement::While { condition, body, .. } => self.exec_while(condition, body),
            Statement::For { init,
                             condition,
                             increment,
                             body,
                             .. } => self.exec_for(init, condition, increment, body),
            Statement::ForEach { variable,
                                 iterable,
                                 body,
                                 line, } => self.exec_foreach(variable, iterable, body, *line),
            Statement::Function(def) => self.exec_function_declaration(def),
            Statement::Return { value, line } => self.exec_return(value.as_ref(), *line),
            Statement::Include { path, line, .. } => self.exec_include(path, *line),
            Statement::Block { statements, .. } => self.exec_block(statements),
        }
    }

    /// Runs `run` inside a fresh frame whose parent is `parent`, restoring
    /// the previous frame afterwards, error or not.
    pub(crate) fn in_scope<T>(&mut self,
                              parent: &Rc<RefCell<Environment>>,
                              run: impl FnOnce(&mut Self) -> EvalResult<T>)
                              -> EvalResult<T> {
        let saved = std::mem::replace(&mut self.env, Environment::with_parent(parent));
        let result = run(self);
        self.env = saved;
        result
    }

    /// Runs `run` inside a fresh child frame of the current environment.
    ///
    /// Used for blocks and loop bodies: declarations made inside the frame
    /// are unwound when it exits, while assignments still reach enclosing
    /// frames through the parent link.
    pub(crate) fn in_child_scope<T>(&mut self,
                                    run: impl FnOnce(&mut Self) -> EvalResult<T>)
                                    -> EvalResult<T> {
        let parent = Rc::clone(&self.env);
        self.in_scope(&parent, run)
    }
}
