use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    ast::Statement,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// A variable binding: the stored value plus its mutability.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The bound value.
    pub value:    Value,
    /// `true` for `const` declarations; assignment then fails.
    pub constant: bool,
}

/// A runtime function record.
///
/// Carries the parameter list, the body cloned out of the declaring AST,
/// and the environment captured at declaration time. The body lives behind
/// an `Rc` so that calls share one copy instead of deep-cloning per call;
/// the captured environment is shared by reference, so a call observes the
/// declaring scope's bindings as they are at call time.
#[derive(Clone)]
pub struct Function {
    /// Parameter names, in declaration order.
    pub params: Vec<String>,
    /// The function body.
    pub body:   Rc<Statement>,
    /// The environment the function was declared in.
    pub env:    Rc<RefCell<Environment>>,
}

/// One frame of the environment chain.
///
/// A frame maps names to variable [`Binding`]s and to [`Function`]s, and
/// optionally links to a parent frame for lookup fallback. Frames are
/// created on block entry, loop entry and function calls, and dropped when
/// that scope exits; a function closure keeps its captured chain alive.
///
/// Lookup walks parent links outward. Declarations bind in the frame they
/// execute in; assignments write to the nearest frame that already defines
/// the name.
pub struct Environment {
    variables: HashMap<String, Binding>,
    functions: HashMap<String, Function>,
    parent:    Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates the root (global) frame.
    #[must_use]
    pub fn new_root() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { variables: HashMap::new(),
                                    functions: HashMap::new(),
                                    parent:    None, }))
    }

    /// Creates a frame whose lookups fall back to `parent`.
    #[must_use]
    pub fn with_parent(parent: &Rc<RefCell<Self>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { variables: HashMap::new(),
                                    functions: HashMap::new(),
                                    parent:    Some(Rc::clone(parent)), }))
    }

    /// Looks a variable up through the chain, innermost frame first.
    ///
    /// # Parameters
    /// - `name`: Variable name.
    ///
    /// # Returns
    /// A clone of the value if any frame defines the name, otherwise
    /// `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.variables.get(name) {
            return Some(binding.value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.borrow().get(name))
    }

    /// Returns `true` when this frame itself defines `name`.
    ///
    /// Used by declarations: re-declaring a name that exists in the same
    /// frame is an error, while shadowing a name from an enclosing frame is
    /// allowed.
    #[must_use]
    pub fn is_defined_here(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Binds a variable in this frame, replacing any previous binding with
    /// the same name in this frame only.
    ///
    /// # Parameters
    /// - `name`: Variable name.
    /// - `value`: Value to store.
    /// - `constant`: Whether the binding rejects reassignment.
    pub fn define(&mut self, name: &str, value: Value, constant: bool) {
        self.variables
            .insert(name.to_string(), Binding { value, constant });
    }

    /// Assigns to the nearest frame that defines `name`.
    ///
    /// # Errors
    /// - [`RuntimeError::ConstReassignment`] if the binding is `const`.
    /// - [`RuntimeError::UnknownVariable`] if no frame defines the name.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        match self.try_assign(name, value, line)? {
            None => Ok(()),
            Some(_) => Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line }),
        }
    }

    /// Assigns to the nearest frame that defines `name`, or binds the name
    /// in this frame when no frame does. Used by the `read` statement,
    /// which creates its target variable on first use.
    ///
    /// # Errors
    /// [`RuntimeError::ConstReassignment`] if an existing binding is
    /// `const`.
    pub fn assign_or_define(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        if let Some(value) = self.try_assign(name, value, line)? {
            self.define(name, value, false);
        }
        Ok(())
    }

    /// Walks the chain trying to assign; hands the value back when no frame
    /// defines the name.
    fn try_assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<Option<Value>> {
        if let Some(binding) = self.variables.get_mut(name) {
            if binding.constant {
                return Err(RuntimeError::ConstReassignment { name: name.to_string(),
                                                             line });
            }
            binding.value = value;
            return Ok(None);
        }

        match &self.parent {
            Some(parent) => parent.borrow_mut().try_assign(name, value, line),
            None => Ok(Some(value)),
        }
    }

    /// Looks a function up through the chain, innermost frame first.
    ///
    /// # Parameters
    /// - `name`: Function name.
    ///
    /// # Returns
    /// A clone of the record (cheap: the body and environment are shared)
    /// if any frame defines the function, otherwise `None`.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<Function> {
        if let Some(function) = self.functions.get(name) {
            return Some(function.clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().get_function(name))
    }

    /// Binds a function in this frame. Redeclaring a name replaces the
    /// previous function.
    pub fn define_function(&mut self, name: &str, function: Function) {
        self.functions.insert(name.to_string(), function);
    }
}
