use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Floating-point literal tokens, such as `3.14` or `2.`.
    /// At least one digit must precede the dot.
    #[regex(r"[0-9]+\.[0-9]*", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, `true` or `false`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// String literal tokens delimited by `"` or `'`, with the escapes
    /// `\n`, `\t`, `\\`, `\'` and `\"` resolved. An unknown escape keeps
    /// the escaped character.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, unescape_string)]
    #[regex(r"'([^'\\\n]|\\[^\n])*'", unescape_string)]
    Str(String),
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `return`
    #[token("return")]
    Return,
    /// `write`
    #[token("write")]
    Write,
    /// `read`
    #[token("read")]
    Read,
    /// `include`
    #[token("include")]
    Include,
    /// `let`
    #[token("let")]
    Let,
    /// `const`
    #[token("const")]
    Const,
    /// `function`
    #[token("function")]
    Function,
    /// `class` (reserved; no grammar rule accepts it)
    #[token("class")]
    Class,
    /// `public` (reserved)
    #[token("public")]
    Public,
    /// `private` (reserved)
    #[token("private")]
    Private,
    /// `protected` (reserved)
    #[token("protected")]
    Protected,
    /// `in`
    #[token("in")]
    In,
    /// `from`
    #[token("from")]
    From,
    /// Identifier tokens; variable or function names such as `x` or `sum`.
    /// An identifier starts with an ASCII letter or any code point at or
    /// above U+0080 and continues with those, digits and underscores.
    #[regex(r"[A-Za-z\u{80}-\u{10FFFF}][A-Za-z0-9_\u{80}-\u{10FFFF}]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `!`
    #[token("!")]
    Bang,
    /// `~`
    #[token("~")]
    Tilde,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `&=`
    #[token("&=")]
    AmpersandAssign,
    /// `|=`
    #[token("|=")]
    PipeAssign,
    /// `^`
    #[token("^")]
    Caret,
    /// `^=`
    #[token("^=")]
    CaretAssign,
    /// `^^`
    #[token("^^")]
    CaretCaret,
    /// `^/`
    #[token("^/")]
    RootOf,
    /// `<<`
    #[token("<<")]
    Shl,
    /// `>>`
    #[token(">>")]
    Shr,
    /// `<<<`
    #[token("<<<")]
    ShlLogical,
    /// `>>>`
    #[token(">>>")]
    ShrLogical,
    /// `??`
    #[token("??")]
    NullishCoalesce,
    /// `??=`
    #[token("??=")]
    NullishAssign,
    /// `?`
    #[token("?")]
    Question,
    /// `?:`
    #[token("?:")]
    Elvis,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `.`
    #[token(".")]
    Dot,
    /// `@`
    #[token("@")]
    At,

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// Newlines advance the line counter and are never emitted.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    Newline,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
/// Incremented as newlines are processed.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses a floating-point literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_real(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
/// Parses an integer literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if successful.
/// - `None`: If the token slice does not fit an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}
/// Parses a boolean literal from the current token slice (`true` or
/// `false`).
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(true)` if the slice is `"true"`.
/// - `Some(false)` if the slice is `"false"`.
/// - `None` otherwise.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
/// Strips the quotes from a string literal slice and resolves its escape
/// sequences.
///
/// Recognized escapes are `\n`, `\t`, `\\`, `\'` and `\"`; any other
/// escaped character is kept as itself.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// The unescaped contents of the literal.
fn unescape_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some(other) => value.push(other),
                None => {},
            }
        } else {
            value.push(c);
        }
    }

    value
}

/// Tokenizes a complete source string into `(token, line)` pairs.
///
/// Tokens are produced in source order; the paired line number is the
/// 1-based line the token starts on. Whitespace and comments are skipped.
/// The returned vector is what the parser iterates over, cloning its
/// position for lookahead.
///
/// # Errors
/// Returns a [`ParseError`] for an unknown byte or an unterminated string
/// literal, carrying the line of the offending input.
///
/// # Example
/// ```
/// use quill::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x = 1;").unwrap();
///
/// assert_eq!(tokens[0], (Token::Let, 1));
/// assert_eq!(tokens[3], (Token::Integer(1), 1));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            let slice = lexer.slice();
            let line = lexer.extras.line;

            return Err(if slice.starts_with('"') || slice.starts_with('\'') {
                ParseError::UnterminatedString { line }
            } else {
                ParseError::UnexpectedToken { token: slice.to_string(),
                                              line }
            });
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::{Token, tokenize};

    #[test]
    fn keywords_beat_identifiers() {
        let tokens = tokenize("while whilst").unwrap();
        assert_eq!(tokens[0].0, Token::While);
        assert_eq!(tokens[1].0, Token::Identifier("whilst".to_string()));
    }

    #[test]
    fn two_character_operators_beat_prefixes() {
        let tokens = tokenize("<= << <<< <").unwrap();
        let kinds: Vec<_> = tokens.into_iter().map(|(t, _)| t).collect();
        assert_eq!(kinds,
                   vec![Token::LessEqual, Token::Shl, Token::ShlLogical, Token::Less]);
    }

    #[test]
    fn lines_count_newlines_before_the_token() {
        let tokens = tokenize("let a = 1;\nlet b = 2;\n\nlet c = 3;").unwrap();
        let lines: Vec<_> = tokens.iter()
                                  .filter(|(t, _)| *t == Token::Let)
                                  .map(|(_, l)| *l)
                                  .collect();
        assert_eq!(lines, vec![1, 2, 4]);
    }

    #[test]
    fn string_escapes_resolve() {
        let tokens = tokenize(r#"write("a\tb\n\"c\"");"#).unwrap();
        assert_eq!(tokens[2].0, Token::Str("a\tb\n\"c\"".to_string()));
    }

    #[test]
    fn single_quoted_strings() {
        let tokens = tokenize(r"'it\'s'").unwrap();
        assert_eq!(tokens[0].0, Token::Str("it's".to_string()));
    }

    #[test]
    fn unterminated_string_reports_opening_line() {
        let err = tokenize("let s = \"abc").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn high_bit_bytes_are_identifier_material() {
        let tokens = tokenize("let größe = 1;").unwrap();
        assert_eq!(tokens[1].0, Token::Identifier("größe".to_string()));
    }

    #[test]
    fn float_needs_a_leading_digit() {
        let tokens = tokenize("1.5 2. .5").unwrap();
        assert_eq!(tokens[0].0, Token::Real(1.5));
        assert_eq!(tokens[1].0, Token::Real(2.0));
        // ".5" splits into a dot symbol and an integer.
        assert_eq!(tokens[2].0, Token::Dot);
        assert_eq!(tokens[3].0, Token::Integer(5));
    }

    #[test]
    fn identical_inputs_tokenize_identically() {
        let source = "function f(n) { return n * 2; } write(f(21));";
        assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
    }
}
