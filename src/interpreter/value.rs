use std::rc::Rc;

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::i64_to_f64_checked,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations. Equality is
/// structural and never coerces: an `Integer(2)` is not equal to a
/// `Real(2.0)`.
///
/// Values carry no references into the AST or the environment, so they can
/// be freely cloned and moved; arrays share their element storage through
/// `Rc`, which keeps cloning cheap.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value. Produced by functions that finish without
    /// `return` and by `return;` with no operand.
    Null,
    /// An integer value (64 bit signed).
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators (`<`, `==`, `!=`, etc.) and logical
    /// operations. Conditions of `if`, loops and the ternary operator must
    /// evaluate to `Bool`.
    Bool(bool),
    /// A string of characters.
    Str(String),
    /// An array of `Value` elements.
    Array(Rc<Vec<Self>>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl Value {
    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Accepts `Value::Real` and `Value::Integer`. For integers, conversion
    /// fails if the value is too large to be represented as `f64` exactly.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is real or a safe integer.
    /// - `Err(RuntimeError::ExpectedNumber | LiteralTooLarge)`: If not
    ///   numeric or not representable.
    ///
    /// # Example
    /// ```
    /// use quill::interpreter::value::Value;
    ///
    /// let x = Value::Integer(10);
    /// let real = x.as_real(42).unwrap();
    ///
    /// assert_eq!(real, 10.0);
    /// ```
    pub fn as_real(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => Ok(i64_to_f64_checked(*n, RuntimeError::LiteralTooLarge { line })?),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }
    /// Converts the value to `i64`, or returns an error if not an integer.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(i64)`: The integer value.
    /// - `Err(RuntimeError::ExpectedNumber)`: If not an integer.
    pub const fn as_integer(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }
    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for conditions in `if` statements, loops, the ternary operator
    /// and logical operations.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(bool)`: The boolean value.
    /// - `Err(RuntimeError::ExpectedBoolean)`: If not boolean.
    pub const fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { line }),
        }
    }
    /// Borrows the element vector, or returns an error if not an array.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(&Vec<Value>)`: If the value is an array.
    /// - `Err(RuntimeError::ExpectedArray)`: If not an array.
    pub fn as_array(&self, line: usize) -> EvalResult<&Vec<Self>> {
        match self {
            Self::Array(v) => Ok(v),
            _ => Err(RuntimeError::ExpectedArray { line }),
        }
    }
    /// Coerces a numeric value to the 32-bit view used by the bitwise and
    /// shift operators.
    ///
    /// Integers truncate to their low 32 bits; reals are truncated toward
    /// zero first. Non-numeric values are a type error.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(i32)`: The 32-bit view of the number.
    /// - `Err(RuntimeError::ExpectedNumber)`: If not numeric.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i32_bits(&self, line: usize) -> EvalResult<i32> {
        match self {
            Self::Integer(n) => Ok(*n as i32),
            Self::Real(r) => Ok(r.trunc() as i64 as i32),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Integer`] or [`Real`].
    ///
    /// [`Integer`]: Value::Integer
    /// [`Real`]: Value::Real
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Real(..))
    }

    /// Returns `true` if the value is [`Integer`].
    ///
    /// [`Integer`]: Value::Integer
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns a short name for the value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(..) => "integer",
            Self::Real(..) => "real",
            Self::Bool(..) => "boolean",
            Self::Str(..) => "string",
            Self::Array(..) => "array",
        }
    }
}

/// Formats a value as an array element.
///
/// Identical to `Display`, except that strings are surrounded by double
/// quotes so that `["a", "b"]` round-trips visually.
fn fmt_element(value: &Value, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match value {
        Value::Str(s) => write!(f, "\"{s}\""),
        other => write!(f, "{other}"),
    }
}

impl std::fmt::Display for Value {
    /// Formats the value the way the `write` statement prints it.
    ///
    /// - `Null` prints as `null`.
    /// - Integers print in decimal.
    /// - Reals always carry a decimal point (`3.0`, not `3`).
    /// - Strings print their raw characters, without quotes.
    /// - Arrays print as `[e0, e1, ...]` with their elements formatted
    ///   recursively; strings inside arrays are quoted.
    ///
    /// # Example
    /// ```
    /// use quill::interpreter::value::Value;
    ///
    /// let v = Value::from(vec![Value::Integer(1), Value::from("two")]);
    ///
    /// assert_eq!(v.to_string(), "[1, \"two\"]");
    /// assert_eq!(Value::Real(3.0).to_string(), "3.0");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => {
                if r.is_finite() && r.fract() == 0.0 {
                    write!(f, "{r:.1}")
                } else {
                    write!(f, "{r}")
                }
            },
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    fmt_element(value, f)?;
                }

                write!(f, "]")
            },
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Integer(i) => (*i).into(),
            LiteralValue::Real(n) => (*n).into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Str(s) => s.clone().into(),
        }
    }
}
