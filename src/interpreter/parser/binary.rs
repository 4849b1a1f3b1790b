use std::iter::Peekable;

use crate::{
    ast::{AssignOperator, BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            unary::parse_unary,
        },
    },
};

/// Parses an assignment expression.
///
/// This is the lowest precedence level. Assignment is right-associative, so
/// `a = b = 1` parses as `a = (b = 1)`. Whether the target is actually
/// assignable is checked at evaluation time, where the failure carries the
/// source line.
///
/// Grammar: `assignment := ternary (assign_op assignment)?`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// An `Expr::Assign` node, or the ternary-level expression unchanged.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_ternary(tokens)?;

    if let Some((token, line)) = tokens.peek()
       && let Some(op) = token_to_assign_operator(token)
    {
        let line = *line;
        tokens.next();

        let value = parse_assignment(tokens)?;

        return Ok(Expr::Assign { target: Box::new(left),
                                 op,
                                 value: Box::new(value),
                                 line });
    }

    Ok(left)
}

/// Parses the conditional operator.
///
/// Handles both the full form `c ? a : b` and the short form `c ?: b`.
/// Right-associative: the else branch re-enters the assignment level, so
/// `a ? b : c ? d : e` nests to the right.
///
/// Grammar: `ternary := nullish ("?" expression ":" assignment | "?:" assignment)?`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An `Expr::Ternary` node, or the nullish-level expression unchanged.
pub fn parse_ternary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_nullish(tokens)?;

    match tokens.peek() {
        Some((Token::Question, line)) => {
            let line = *line;
            tokens.next();

            let then_branch = parse_expression(tokens)?;
            crate::interpreter::parser::utils::expect_token(tokens, &Token::Colon, "':'", line)?;
            let else_branch = parse_assignment(tokens)?;

            Ok(Expr::Ternary { condition:   Box::new(condition),
                               then_branch: Some(Box::new(then_branch)),
                               else_branch: Box::new(else_branch),
                               line })
        },

        Some((Token::Elvis, line)) => {
            let line = *line;
            tokens.next();

            let else_branch = parse_assignment(tokens)?;

            Ok(Expr::Ternary { condition: Box::new(condition),
                               then_branch: None,
                               else_branch: Box::new(else_branch),
                               line })
        },

        _ => Ok(condition),
    }
}

/// Parses nullish-fallback expressions.
///
/// `??` is right-associative: `a ?? b ?? c` parses as `a ?? (b ?? c)`.
///
/// Grammar: `nullish := logical_or ("??" nullish)?`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A binary expression tree using `BinaryOperator::Nullish`.
pub fn parse_nullish<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_logical_or(tokens)?;

    if let Some((Token::NullishCoalesce, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let right = parse_nullish(tokens)?;

        return Ok(Expr::Binary { left: Box::new(left),
                                 op: BinaryOperator::Nullish,
                                 right: Box::new(right),
                                 line });
    }

    Ok(left)
}

/// Parses logical OR expressions.
///
/// Handles left-associative chains of `||`. Precedence is just below
/// logical AND.
///
/// Grammar: `logical_or := logical_and ("||" logical_and)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A binary expression tree using `BinaryOperator::Or`.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_and(tokens)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Or)
        {
            let line = *line;
            tokens.next();

            let right = parse_logical_and(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses logical AND expressions.
///
/// Handles left-associative chains of `&&`. Precedence is above `||` and
/// below the bitwise operators.
///
/// Grammar: `logical_and := bit_or ("&&" bit_or)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// A binary expression tree with `BinaryOperator::And` nodes.
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_bit_or(tokens)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::And)
        {
            let line = *line;
            tokens.next();

            let right = parse_bit_or(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses bitwise OR expressions (left-associative `|`).
///
/// Grammar: `bit_or := bit_xor ("|" bit_xor)*`
pub fn parse_bit_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_bit_xor(tokens)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::BitOr)
        {
            let line = *line;
            tokens.next();

            let right = parse_bit_xor(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses bitwise XOR expressions (left-associative `^^`).
///
/// Grammar: `bit_xor := bit_and ("^^" bit_and)*`
pub fn parse_bit_xor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_bit_and(tokens)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::BitXor)
        {
            let line = *line;
            tokens.next();

            let right = parse_bit_and(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses bitwise AND expressions (left-associative `&`).
///
/// Grammar: `bit_and := equality ("&" equality)*`
pub fn parse_bit_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_equality(tokens)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::BitAnd)
        {
            let line = *line;
            tokens.next();

            let right = parse_equality(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses equality expressions (left-associative `==` and `!=`).
///
/// Grammar: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_relational(tokens)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual)
        {
            let line = *line;
            tokens.next();

            let right = parse_relational(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses relational and membership expressions.
///
/// Handles the left-associative operators `<`, `<=`, `>`, `>=`, `in` and
/// `not in`. The negated membership form is the identifier `not`
/// immediately followed by the `in` keyword; a lone `not` stays an ordinary
/// identifier.
///
/// Grammar: `relational := shift (("<" | "<=" | ">" | ">=" | "in" | "not" "in") shift)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A binary expression tree of relational operators.
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_shift(tokens)?;

    loop {
        if let Some((Token::Identifier(name), line)) = tokens.peek()
           && name == "not"
        {
            let line = *line;
            let mut lookahead = tokens.clone();
            lookahead.next();

            if let Some((Token::In, _)) = lookahead.peek() {
                tokens.next();
                tokens.next();

                let right = parse_shift(tokens)?;

                left = Expr::Binary { left: Box::new(left),
                                      op: BinaryOperator::NotIn,
                                      right: Box::new(right),
                                      line };
                continue;
            }
        }

        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Less
                       | BinaryOperator::Greater
                       | BinaryOperator::LessEqual
                       | BinaryOperator::GreaterEqual
                       | BinaryOperator::In)
        {
            let line = *line;
            tokens.next();

            let right = parse_shift(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses shift expressions.
///
/// Handles the left-associative arithmetic shifts `<<` and `>>` and the
/// logical shifts `<<<` and `>>>`.
///
/// Grammar: `shift := additive (("<<" | ">>" | "<<<" | ">>>") additive)*`
pub fn parse_shift<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_additive(tokens)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Shl
                       | BinaryOperator::Shr
                       | BinaryOperator::ShlLogical
                       | BinaryOperator::ShrLogical)
        {
            let line = *line;
            tokens.next();

            let right = parse_additive(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::Binary` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            let line = *line;
            tokens.next();

            let right = parse_multiplicative(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*`, `/` and `%`.
///
/// Grammar: `multiplicative := exponent (("*" | "/" | "%") exponent)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A binary expression tree combining exponent-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_exponent(tokens)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
        {
            let line = *line;
            tokens.next();

            let right = parse_exponent(tokens)?;

            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses exponentiation and root expressions.
///
/// Handles `^` and `^/` with right-associativity: `a ^ b ^ c` parses as
/// `a ^ (b ^ c)`.
///
/// Grammar: `exponent := unary (("^" | "^/") exponent)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_unary(tokens)?;

    if let Some((token, line)) = tokens.peek()
       && let Some(op) = token_to_binary_operator(token)
       && matches!(op, BinaryOperator::Pow | BinaryOperator::Root)
    {
        let line = *line;
        tokens.next();

        let right = parse_exponent(tokens)?;

        return Ok(Expr::Binary { left: Box::new(left),
                                 op,
                                 right: Box::new(right),
                                 line });
    }

    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents a binary
/// operator (arithmetic, comparison, logical, bitwise, shift, nullish or
/// membership). Returns `None` for all other tokens.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token corresponds to a binary operator,
/// otherwise `None`.
///
/// # Example
/// ```
/// use quill::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::RootOf => Some(BinaryOperator::Root),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::AndAnd => Some(BinaryOperator::And),
        Token::OrOr => Some(BinaryOperator::Or),
        Token::Ampersand => Some(BinaryOperator::BitAnd),
        Token::Pipe => Some(BinaryOperator::BitOr),
        Token::CaretCaret => Some(BinaryOperator::BitXor),
        Token::Shl => Some(BinaryOperator::Shl),
        Token::Shr => Some(BinaryOperator::Shr),
        Token::ShlLogical => Some(BinaryOperator::ShlLogical),
        Token::ShrLogical => Some(BinaryOperator::ShrLogical),
        Token::NullishCoalesce => Some(BinaryOperator::Nullish),
        Token::In => Some(BinaryOperator::In),
        _ => None,
    }
}

/// Maps a token to its corresponding assignment operator.
///
/// Returns `Some(AssignOperator)` for `=`, the arithmetic compound forms,
/// the bitwise compound forms, `^=` and `??=`. Returns `None` for all other
/// tokens.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(AssignOperator)` if the token is an assignment operator, otherwise
/// `None`.
#[must_use]
pub const fn token_to_assign_operator(token: &Token) -> Option<AssignOperator> {
    match token {
        Token::Equals => Some(AssignOperator::Assign),
        Token::PlusAssign => Some(AssignOperator::Add),
        Token::MinusAssign => Some(AssignOperator::Sub),
        Token::StarAssign => Some(AssignOperator::Mul),
        Token::SlashAssign => Some(AssignOperator::Div),
        Token::PercentAssign => Some(AssignOperator::Mod),
        Token::AmpersandAssign => Some(AssignOperator::BitAnd),
        Token::PipeAssign => Some(AssignOperator::BitOr),
        Token::CaretAssign => Some(AssignOperator::Pow),
        Token::NullishAssign => Some(AssignOperator::Nullish),
        _ => None,
    }
}
