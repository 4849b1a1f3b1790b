#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use an undefined variable.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called an unknown function.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to declare a name that already exists in the current scope.
    DuplicateDeclaration {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted to redefine a built-in function.
    BuiltinRedefinition {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to assign to a `const` binding.
    ConstReassignment {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left-hand side of an assignment was not a variable.
    AssignTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A boolean value was expected, but not found.
    ExpectedBoolean {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array value was expected, but not found.
    ExpectedArray {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// How many parameters the function declares.
        expected: usize,
        /// How many arguments the call supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Attempted division or modulus by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted to take a root of degree zero.
    RootDegreeZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A literal value was too large to be represented safely.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access an array element outside the allowed bounds.
    IndexOutOfBounds {
        /// The length of the array.
        len:   usize,
        /// The index that was actually requested.
        found: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A `return` statement executed outside of any function call.
    ReturnOutsideFunction {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An included file could not be opened, lexed or parsed.
    IncludeFailed {
        /// The path named by the include statement.
        path:    String,
        /// The wrapped inner error message.
        details: String,
        /// The source line of the include statement.
        line:    usize,
    },
    /// Reading or writing one of the standard streams failed.
    Io {
        /// Details from the underlying I/O error.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Unknown variable '{name}'.")
            },
            Self::UnknownFunction { name, line } => {
                write!(f, "Error on line {line}: Unknown function '{name}'.")
            },
            Self::DuplicateDeclaration { name, line } => write!(f,
                                                                "Error on line {line}: Variable '{name}' is already declared in this scope."),
            Self::BuiltinRedefinition { name, line } => write!(f,
                                                               "Error on line {line}: Cannot redefine built-in function '{name}'."),
            Self::ConstReassignment { name, line } => write!(f,
                                                             "Error on line {line}: Cannot assign to constant '{name}'."),
            Self::AssignTarget { line } => write!(f,
                                                  "Error on line {line}: Left-hand side of assignment must be a variable."),
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
            Self::ExpectedBoolean { line } => write!(f, "Error on line {line}: Expected boolean."),
            Self::ExpectedNumber { line } => write!(f, "Error on line {line}: Expected number."),
            Self::ExpectedArray { line } => write!(f, "Error on line {line}: Expected array."),
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found,
                                          line, } => write!(f,
                                                            "Error on line {line}: Function '{name}' expects {expected} arguments, but got {found}."),
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::RootDegreeZero { line } => {
                write!(f, "Error on line {line}: Root with exponent 0 is undefined.")
            },
            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: Integer overflow while trying to compute result."),
            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },
            Self::IndexOutOfBounds { len, found, line } => write!(f,
                                                                  "Error on line {line}: Index {found} is out of bounds for an array of length {len}."),
            Self::ReturnOutsideFunction { line } => write!(f,
                                                           "Error on line {line}: 'return' outside of a function."),
            Self::IncludeFailed { path, details, line } => write!(f,
                                                                  "Error on line {line}: Could not include '{path}': {details}"),
            Self::Io { details, line } => {
                write!(f, "Error on line {line}: I/O error: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
