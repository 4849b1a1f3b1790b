use std::iter::Peekable;

use crate::{
    ast::{DeclarationKind, Expr, FunctionDef, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::{parse_block, parse_braced_block},
            core::{ParseResult, parse_expression},
            unary::parse_read_expression,
            utils::{expect_semicolon, expect_token, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// Dispatches on the current token:
/// - statement keywords (`write`, `read`, `let`, `const`, `if`, `while`,
///   `for`, `include`, `function`, `return`) go to their dedicated parsers,
/// - `{` starts a bare block,
/// - anything else is parsed as an expression statement terminated by `;`.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// Returns a `ParseError` when no statement form matches or a dedicated
/// parser fails; the error carries the line of the first unexpected token.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Write, _)) => parse_write_statement(tokens),
        Some((Token::Read, _)) => parse_read_statement(tokens),
        Some((Token::Let | Token::Const, _)) => parse_variable_declaration(tokens),
        Some((Token::If, _)) => parse_if_statement(tokens),
        Some((Token::While, _)) => parse_while_statement(tokens),
        Some((Token::For, _)) => parse_for_statement(tokens),
        Some((Token::Include, _)) => parse_include_statement(tokens),
        Some((Token::Function, _)) => parse_function_declaration(tokens),
        Some((Token::Return, _)) => parse_return_statement(tokens),
        Some((Token::LBrace, _)) => parse_braced_block(tokens),
        Some(_) => parse_expression_statement(tokens),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses an expression used as a statement, including assignments.
///
/// Grammar: `expression_statement := expression ";"`
fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.peek().map_or(0, |(_, l)| *l);
    let expr = parse_expression(tokens)?;
    expect_semicolon(tokens, line)?;

    Ok(Statement::Expression { expr, line })
}

/// Parses a `write` statement.
///
/// Grammar: `write_statement := "write" "(" expression ")" ";"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `write` keyword.
///
/// # Returns
/// A `Statement::Write` node.
fn parse_write_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    expect_token(tokens, &Token::LParen, "'(' after 'write'", line)?;
    let message = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => {},
        _ => return Err(ParseError::ExpectedClosingParen { line }),
    }
    expect_semicolon(tokens, line)?;

    Ok(Statement::Write { message, line })
}

/// Parses a `read` statement or the expression-statement form of `read`.
///
/// Grammar: `read_statement := "read" "(" [expression] ")" [identifier] ";"`
///
/// With a trailing identifier the parsed input is bound to that variable;
/// without one the read is an expression whose value is discarded.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `read` keyword.
///
/// # Returns
/// A `Statement::Read` or a `Statement::Expression` wrapping `Expr::Read`.
fn parse_read_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_read_expression(tokens)?;
    let Expr::Read { prompt, line } = expr else {
        unreachable!()
    };

    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let target = parse_identifier(tokens)?;
        expect_semicolon(tokens, line)?;

        return Ok(Statement::Read { target,
                                    prompt: prompt.map(|p| *p),
                                    line });
    }

    expect_semicolon(tokens, line)?;

    Ok(Statement::Expression { expr: Expr::Read { prompt, line },
                               line })
}

/// Parses a `let` or `const` declaration.
///
/// Grammar:
/// ```text
///     declaration := "let" identifier ["=" expression] ";"
///                  | "const" identifier "=" expression ";"
/// ```
/// A `let` without an initializer defaults to integer zero at evaluation
/// time; a `const` without one is a parse error.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `let` or `const`.
///
/// # Returns
/// A `Statement::VariableDeclaration` node.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the name is missing,
/// - a `const` has no initializer,
/// - the initializer expression is malformed,
/// - the terminating `;` is missing.
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (keyword, line) = tokens.next().unwrap();
    let line = *line;
    let kind = match keyword {
        Token::Let => DeclarationKind::Let,
        Token::Const => DeclarationKind::Const,
        _ => unreachable!(),
    };

    let name = parse_identifier(tokens)?;

    let initializer = if let Some((Token::Equals, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    if kind == DeclarationKind::Const && initializer.is_none() {
        return Err(ParseError::MissingInitializer { name, line });
    }

    expect_semicolon(tokens, line)?;

    Ok(Statement::VariableDeclaration { kind,
                                        name,
                                        initializer,
                                        line })
}

/// Parses an `if` statement with an optional `else` branch.
///
/// Grammar: `if_statement := "if" "(" expression ")" block ["else" block]`
///
/// Each branch is a braced block or a single statement; since `if` is
/// itself a statement, `else if` chains need no special handling.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `if` keyword.
///
/// # Returns
/// A `Statement::If` node.
fn parse_if_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    expect_token(tokens, &Token::LParen, "'(' after 'if'", line)?;
    let condition = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => {},
        _ => return Err(ParseError::ExpectedClosingParen { line }),
    }

    let then_branch = Box::new(parse_block(tokens)?);

    let else_branch = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(Box::new(parse_block(tokens)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       line })
}

/// Parses a `while` statement.
///
/// Grammar: `while_statement := "while" "(" expression ")" block`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `while` keyword.
///
/// # Returns
/// A `Statement::While` node.
fn parse_while_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    expect_token(tokens, &Token::LParen, "'(' after 'while'", line)?;
    let condition = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => {},
        _ => return Err(ParseError::ExpectedClosingParen { line }),
    }

    let body = Box::new(parse_block(tokens)?);

    Ok(Statement::While { condition, body, line })
}

/// Parses a `for` statement, in either its three-clause or for-each form.
///
/// Grammar:
/// ```text
///     for_statement := "for" "(" init ";" expression ";" expression ")" block
///                    | "for" "(" identifier "in" expression ")" block
/// ```
/// The init clause is a `let` declaration or an expression statement. The
/// for-each form is recognized by an identifier immediately followed by the
/// `in` keyword.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `for` keyword.
///
/// # Returns
/// A `Statement::For` or `Statement::ForEach` node.
fn parse_for_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    expect_token(tokens, &Token::LParen, "'(' after 'for'", line)?;

    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some((Token::In, _)) = lookahead.peek() {
            let variable = parse_identifier(tokens)?;
            tokens.next(); // consume 'in'

            let iterable = parse_expression(tokens)?;
            match tokens.next() {
                Some((Token::RParen, _)) => {},
                _ => return Err(ParseError::ExpectedClosingParen { line }),
            }

            let body = Box::new(parse_block(tokens)?);

            return Ok(Statement::ForEach { variable,
                                           iterable,
                                           body,
                                           line });
        }
    }

    let init = if let Some((Token::Let, _)) = tokens.peek() {
        Box::new(parse_variable_declaration(tokens)?)
    } else {
        let init_line = tokens.peek().map_or(line, |(_, l)| *l);
        let expr = parse_expression(tokens)?;
        expect_semicolon(tokens, init_line)?;
        Box::new(Statement::Expression { expr,
                                         line: init_line })
    };

    let condition = parse_expression(tokens)?;
    expect_semicolon(tokens, line)?;

    let increment = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => {},
        _ => return Err(ParseError::ExpectedClosingParen { line }),
    }

    let body = Box::new(parse_block(tokens)?);

    Ok(Statement::For { init,
                        condition,
                        increment,
                        body,
                        line })
}

/// Parses an `include` statement.
///
/// Grammar: `include_statement := "include" [identifier ("." identifier)*] "from" STRING ";"`
///
/// The optional dotted target is recorded verbatim; the file named by the
/// string literal is loaded and interpreted in the current environment when
/// the statement executes.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `include` keyword.
///
/// # Returns
/// A `Statement::Include` node.
fn parse_include_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    let target = if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut name = parse_identifier(tokens)?;

        while let Some((Token::Dot, _)) = tokens.peek() {
            tokens.next();
            name.push('.');
            name.push_str(&parse_identifier(tokens)?);
        }

        Some(name)
    } else {
        None
    };

    expect_token(tokens, &Token::From, "'from' in include statement", line)?;

    let path = match tokens.next() {
        Some((Token::Str(path), _)) => path.clone(),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected file path after 'from', found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    expect_semicolon(tokens, line)?;

    Ok(Statement::Include { path, target, line })
}

/// Parses a function declaration.
///
/// Grammar: `function_declaration := "function" identifier "(" [params] ")" block`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `function` keyword.
///
/// # Returns
/// A `Statement::Function` node.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the name or parameter list is malformed,
/// - parentheses do not balance,
/// - the body fails to parse.
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    let name = parse_identifier(tokens)?;
    expect_token(tokens, &Token::LParen, "'(' after function name", line)?;

    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;
    let body = parse_block(tokens)?;

    Ok(Statement::Function(FunctionDef { name,
                                         params,
                                         body: Box::new(body),
                                         line }))
}

/// Parses a `return` statement.
///
/// Grammar: `return_statement := "return" [expression] [";"]`
///
/// The operand is omitted when the next token is `;`, `}` or the end of
/// input. The terminating semicolon is tolerated as missing immediately
/// before a closing brace or at the end of input.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `return` keyword.
///
/// # Returns
/// A `Statement::Return` node.
fn parse_return_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (_, line) = *tokens.next().unwrap();

    let value = match tokens.peek() {
        Some((Token::Semicolon | Token::RBrace, _)) | None => None,
        _ => Some(parse_expression(tokens)?),
    };

    match tokens.peek() {
        Some((Token::Semicolon, _)) => {
            tokens.next();
        },
        Some((Token::RBrace, _)) | None => {},
        Some((_, line)) => return Err(ParseError::ExpectedSemicolon { line: *line }),
    }

    Ok(Statement::Return { value, line })
}
