#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered, or a description of what was expected.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal was opened but never closed.
    UnterminatedString {
        /// The source line of the opening quote.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A semicolon `;` was expected but not found.
    ExpectedSemicolon {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An identifier was expected but not found.
    ExpectedIdentifier {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `const` declaration was written without an initializer.
    MissingInitializer {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string literal.")
            },

            Self::ExpectedClosingParen { line } => write!(f,
                                                          "Error on line {line}: Expected closing parenthesis ')' but none found."),

            Self::ExpectedSemicolon { line } => {
                write!(f, "Error on line {line}: Expected ';' after statement.")
            },

            Self::ExpectedIdentifier { line } => {
                write!(f, "Error on line {line}: Expected an identifier.")
            },

            Self::MissingInitializer { name, line } => write!(f,
                                                              "Error on line {line}: Constant '{name}' must be initialized."),
        }
    }
}

impl std::error::Error for ParseError {}
