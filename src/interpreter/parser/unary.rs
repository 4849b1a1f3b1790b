use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::parse_comma_separated,
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
/// - `~`  (bitwise not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed
/// as `!(-x)`.
///
/// If no prefix operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// `parse_postfix`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!" | "~") unary
///            | primary postfix*
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::Unary`] or a primary expression possibly followed by
/// postfixes.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let prefix = match tokens.peek() {
        Some((Token::Minus, line)) => Some((UnaryOperator::Negate, *line)),
        Some((Token::Bang, line)) => Some((UnaryOperator::Not, *line)),
        Some((Token::Tilde, line)) => Some((UnaryOperator::BitNot, *line)),
        _ => None,
    };

    if let Some((op, line)) = prefix {
        tokens.next();
        let operand = parse_unary(tokens)?;

        return Ok(Expr::Unary { op,
                                operand: Box::new(operand),
                                line });
    }

    let primary = parse_primary(tokens)?;
    parse_postfix(tokens, primary)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, string and boolean literals
/// - identifiers
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
/// - console reads (`read(...)`)
///
/// This function does not handle unary operators or postfix operators; call
/// chains and indexing are folded in by `parse_postfix`.
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | "(" expression ")"
///              | "[" elements "]"
///              | "read" "(" [expression] ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary
///   expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match peeked {
        (Token::Integer(..) | Token::Real(..) | Token::Bool(..) | Token::Str(..), _) => {
            parse_literal(tokens)
        },
        (Token::Identifier(_), _) => parse_variable(tokens),
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::LBracket, _) => parse_array_literal(tokens),
        (Token::Read, _) => parse_read_expression(tokens),
        (tok, line) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                         line:  *line, }),
    }
}

/// Parses postfix operators applied to an expression.
///
/// This function is called after parsing a primary expression and handles
/// three kinds of postfix constructs:
///
/// 1. **Array indexing**: `expr[index]`, with chaining (`a[0][1]`).
/// 2. **Function calls**: `name(arg1, arg2, ...)`. The callee must be a
///    plain name; there are no first-class function values.
/// 3. **Increment and decrement**: `x++`, `x--`.
///
/// Parsing continues until no further postfix operator is found.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "[" expression "]"
///              | postfix "(" arguments ")"
///              | postfix ("++" | "--")
/// ```
/// # Parameters
/// - `tokens`: Token iterator after a primary expression.
/// - `node`: The expression to which postfix operators will be applied.
///
/// # Returns
/// An updated [`Expr`] with all postfix operators folded in.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an `[` is not properly closed with `]`,
/// - a call is applied to something that is not a name,
/// - an index or argument expression fails to parse.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    loop {
        match tokens.peek() {
            Some((Token::LBracket, index_line)) => {
                let index_line = *index_line;
                tokens.next();

                let index = parse_expression(tokens)?;
                match tokens.next() {
                    Some((Token::RBracket, _)) => {
                        node = Expr::Index { array: Box::new(node),
                                             index: Box::new(index),
                                             line:  index_line, };
                    },
                    _ => {
                        return Err(ParseError::UnexpectedToken {
                            token: "Expected ']' after array index".to_string(),
                            line: index_line,
                        });
                    },
                }
            },

            Some((Token::LParen, call_line)) => {
                let call_line = *call_line;

                let Expr::Variable { name, line } = node else {
                    return Err(ParseError::UnexpectedToken {
                        token: "Expected a function name before '('".to_string(),
                        line: call_line,
                    });
                };
                tokens.next();

                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                node = Expr::Call { name,
                                    arguments,
                                    line };
            },

            Some((Token::PlusPlus, line)) => {
                let line = *line;
                tokens.next();

                node = Expr::Unary { op:      UnaryOperator::Increment,
                                     operand: Box::new(node),
                                     line };
            },

            Some((Token::MinusMinus, line)) => {
                let line = *line;
                tokens.next();

                node = Expr::Unary { op:      UnaryOperator::Decrement,
                                     operand: Box::new(node),
                                     line };
            },

            _ => break,
        }
    }

    Ok(node)
}

/// Parses a literal token into a literal expression.
///
/// Supported forms: integer, real, boolean and string literals.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at a literal.
///
/// # Returns
/// An [`Expr::Literal`] containing the parsed value.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (tok, line) = tokens.next().unwrap();

    let value = match tok {
        Token::Integer(n) => (*n).into(),
        Token::Real(r) => (*r).into(),
        Token::Bool(b) => (*b).into(),
        Token::Str(s) => s.as_str().into(),
        _ => unreachable!(),
    };

    Ok(Expr::Literal { value,
                       line: *line })
}

/// Parses an identifier into a variable reference.
///
/// Calls are not decided here: `parse_postfix` turns a variable followed by
/// `(` into an [`Expr::Call`].
fn parse_variable<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Identifier(name), line)) => Ok(Expr::Variable { name: name.clone(),
                                                                     line: *line, }),
        _ => unreachable!(),
    }
}

/// Parses a parenthesized expression.
///
/// Expected form `( expression )`
///
/// The function consumes the opening parenthesis, parses the enclosed
/// expression, and then requires a closing `)`. Failure to find the closing
/// parenthesis yields `ParseError::ExpectedClosingParen`.
///
/// Grammar: `grouping := "(" expression ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `(`.
///
/// # Returns
/// The inner expression as-is (no wrapper node).
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();
    let expr = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses an array literal of the form `[expr1, expr2, ..., exprN]`.
///
/// Elements are parsed using `parse_expression`, separated by commas. An
/// empty array `[]` is accepted.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `[`.
///
/// # Returns
/// An [`Expr::Array`] node containing the parsed elements.
///
/// # Errors
/// Returns a `ParseError` if:
/// - elements cannot be parsed,
/// - the closing `]` is missing.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = tokens.next().unwrap();
    let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
    Ok(Expr::Array { elements,
                     line: *line })
}

/// Parses a console read in expression position.
///
/// Expected form: `read ( [prompt] )`. The prompt is an arbitrary
/// expression; when present it is printed (without a newline) before input
/// is consumed.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the `read` keyword.
///
/// # Returns
/// An [`Expr::Read`] node.
///
/// # Errors
/// Returns a `ParseError` if the parentheses are missing or the prompt
/// fails to parse.
pub(in crate::interpreter::parser) fn parse_read_expression<'a, I>(tokens: &mut Peekable<I>)
                                                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    crate::interpreter::parser::utils::expect_token(tokens, &Token::LParen, "'('", line)?;

    let prompt = match tokens.peek() {
        Some((Token::RParen, _)) => None,
        _ => Some(Box::new(parse_expression(tokens)?)),
    };

    match tokens.next() {
        Some((Token::RParen, _)) => Ok(Expr::Read { prompt, line }),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}
