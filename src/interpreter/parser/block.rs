use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement},
    },
};

/// Parses a control-flow body: either a braced block or a single statement.
///
/// Braced form: `{ statement* }`. Without a brace, exactly one statement is
/// parsed and returned directly, which is what makes `else if` chains
/// compose without special handling.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the body.
///
/// # Returns
/// A `Statement::Block` for the braced form, or the single statement.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::LBrace, _)) => parse_braced_block(tokens),
        Some(_) => parse_statement(tokens),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a braced block of statements.
///
/// The opening `{` must be the current token; statements are parsed until
/// the matching `}` is found and consumed.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `{`.
///
/// # Returns
/// A `Statement::Block` containing all parsed statements.
pub fn parse_braced_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = match tokens.next() {
        Some((Token::LBrace, line)) => *line,
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '{{', found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some(_) => statements.push(parse_statement(tokens)?),
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    Ok(Statement::Block { statements, line })
}
