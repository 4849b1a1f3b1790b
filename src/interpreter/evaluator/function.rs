use std::{
    io::{BufRead, Write},
    rc::Rc,
};

use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Flow, Interpreter},
            env::Function,
            utils::parse_input,
        },
        value::Value,
    },
};

/// Names resolved before any user definition; declaring a function with one
/// of these names is an error.
pub const BUILTIN_FUNCTIONS: &[&str] = &["read", "write"];

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Executes a function declaration.
    ///
    /// The body is cloned out of the AST into a shared [`Function`] record
    /// together with the current environment, which the function captures
    /// by reference: a later call sees the declaring scope's bindings as
    /// they are at call time. Redeclaring a function replaces the previous
    /// definition.
    ///
    /// # Errors
    /// [`RuntimeError::BuiltinRedefinition`] when the name collides with a
    /// builtin.
    pub(crate) fn exec_function_declaration(&mut self, def: &FunctionDef) -> EvalResult<Flow> {
        if BUILTIN_FUNCTIONS.contains(&def.name.as_str()) {
            return Err(RuntimeError::BuiltinRedefinition { name: def.name.clone(),
                                                           line: def.line, });
        }

        let function = Function { params: def.params.clone(),
                                  body:   Rc::new((*def.body).clone()),
                                  env:    Rc::clone(&self.env), };

        self.env.borrow_mut().define_function(&def.name, function);
        Ok(Flow::Normal)
    }

    /// Evaluates a function call expression.
    ///
    /// Arguments are evaluated left to right. The builtins `read` and
    /// `write` resolve first; any other name is looked up in the function
    /// table of the environment chain.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Argument expressions, in call order.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The function result; a function that finishes without `return`
    /// yields `null`.
    pub(crate) fn eval_call(&mut self,
                            name: &str,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.eval(argument)?);
        }

        match name {
            "write" => {
                if args.len() != 1 {
                    return Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                                     expected: 1,
                                                                     found:    args.len(),
                                                                     line, });
                }
                self.write_value_line(&args[0], line)?;
                Ok(Value::Null)
            },

            "read" => {
                if args.len() > 1 {
                    return Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                                     expected: 1,
                                                                     found:    args.len(),
                                                                     line, });
                }
                if let Some(prompt) = args.first() {
                    self.write_prompt(prompt, line)?;
                }
                let input = self.read_input_line(line)?;
                Ok(parse_input(&input))
            },

            _ => self.call_user_function(name, args, line),
        }
    }

    /// Calls a user-defined function.
    ///
    /// The parameter count must match the argument count. Execution runs in
    /// a fresh frame whose parent is the function's *captured* environment,
    /// with the parameters bound as locals. A Return signal raised anywhere
    /// in the body is trapped here and supplies the call's result.
    ///
    /// # Errors
    /// - [`RuntimeError::UnknownFunction`] for an unresolved name.
    /// - [`RuntimeError::ArgumentCountMismatch`] for an arity mismatch.
    fn call_user_function(&mut self,
                          name: &str,
                          args: Vec<Value>,
                          line: usize)
                          -> EvalResult<Value> {
        let function = self.env
                           .borrow()
                           .get_function(name)
                           .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                                          line })?;

        if args.len() != function.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                             expected: function.params.len(),
                                                             found:    args.len(),
                                                             line, });
        }

        let captured = Rc::clone(&function.env);
        self.in_scope(&captured, |interp| {
                for (param, arg) in function.params.iter().zip(args) {
                    interp.env.borrow_mut().define(param, arg, false);
                }

                match interp.exec_statement(&function.body)? {
                    Flow::Return { value, .. } => Ok(value),
                    Flow::Normal => Ok(Value::Null),
                }
            })
    }
}
