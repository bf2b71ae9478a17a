use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated, unexpected},
        },
    },
    util::position::Position,
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (arithmetic negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | primary
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a primary expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned>
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Bang, _)) => UnaryOperator::Not,
        _ => return parse_primary(tokens),
    };

    let Some((_, position)) = tokens.next() else {
        return Err(unexpected("an expression", None));
    };
    let expr = parse_unary(tokens)?;

    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       position: *position })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - integer, character and string literals
/// - variable references
/// - function calls
/// - parenthesized expressions
///
/// Grammar:
/// ```text
///     primary := INTEGER | CHAR | STRING
///              | identifier ("(" arguments ")")?
///              | "(" expression ")"
/// ```
/// # Errors
/// Returns a `SyntaxError` if the next token cannot start an expression or a
/// call or grouping is not closed.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((Token::Integer(n), position)) => Ok(Expr::Literal { value:    LiteralValue::Integer(*n),
                                                                  position: *position, }),
        Some((Token::Char(c), position)) => Ok(Expr::Literal { value:    LiteralValue::Char(*c),
                                                               position: *position, }),
        Some((Token::Str(s), position)) => Ok(Expr::Literal { value:    LiteralValue::Str(s.clone()),
                                                              position: *position, }),
        Some((Token::Identifier(name), position)) => {
            parse_identifier_or_call(tokens, name.clone(), *position)
        },
        Some((Token::LParen, _)) => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, "')' to close the parenthesized expression")?;
            Ok(expr)
        },
        other => Err(unexpected("an expression", other)),
    }
}

/// Parses what follows an identifier: an argument list makes it a call,
/// anything else leaves a variable reference.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>,
                                   name: String,
                                   position: Position)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned>
{
    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
        return Ok(Expr::Call { name,
                               arguments,
                               position });
    }

    Ok(Expr::Identifier { name, position })
}
