use std::iter::Peekable;

use crate::{
    ast::Type,
    error::SyntaxError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::core::ParseResult,
    },
    util::position::Position,
};

/// Builds the error for finding `found` where `expected` was required.
///
/// The end-of-input token, or running off the stream, produces
/// `UnexpectedEndOfInput`; anything else produces `UnexpectedToken`.
pub(in crate::interpreter::parser) fn unexpected(expected: &str,
                                                 found: Option<&Spanned>)
                                                 -> SyntaxError {
    match found {
        Some((Token::Eof, position)) => {
            SyntaxError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                position: *position, }
        },
        Some((token, position)) => SyntaxError::UnexpectedToken { expected: expected.to_string(),
                                                                  found:    format!("'{token}'"),
                                                                  position: *position, },
        None => SyntaxError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                    position: Position::default(), },
    }
}

/// Consumes the next token if it equals `expected`.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `expected`: The token required next.
/// - `description`: How to describe the requirement in an error message.
///
/// # Returns
/// The position of the consumed token.
///
/// # Errors
/// Returns a `SyntaxError` without consuming anything if the next token
/// differs.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    description: &str)
                                                    -> ParseResult<Position>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.peek() {
        Some((token, position)) if token == expected => {
            let position = *position;
            tokens.next();
            Ok(position)
        },
        other => Err(unexpected(description, other.copied())),
    }
}

/// Position of the next token, for nodes that start there.
pub(in crate::interpreter::parser) fn peek_position<'a, I>(tokens: &mut Peekable<I>) -> Position
    where I: Iterator<Item = &'a Spanned>
{
    tokens.peek().map_or_else(Position::default, |(_, position)| *position)
}

/// Parses a comma-separated list of items up to and including a closing
/// token.
///
/// This utility is shared by parameter lists and call argument lists. An
/// immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Errors
/// Returns a `SyntaxError` if an item fails to parse or a token other than a
/// comma or `closing` follows an item.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Spanned>
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            other => return Err(unexpected(&format!("',' or '{closing}'"), other.copied())),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name and position.
///
/// # Errors
/// Returns a `SyntaxError` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              description: &str)
                                                              -> ParseResult<(String, Position)>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.peek() {
        Some((Token::Identifier(name), position)) => {
            let parsed = (name.clone(), *position);
            tokens.next();
            Ok(parsed)
        },
        other => Err(unexpected(description, other.copied())),
    }
}

/// Parses one of the type keywords `int`, `char`, `string` or `void`.
///
/// # Errors
/// Returns a `SyntaxError` if the next token is not a type keyword.
pub(in crate::interpreter::parser) fn parse_type<'a, I>(tokens: &mut Peekable<I>)
                                                        -> ParseResult<(Type, Position)>
    where I: Iterator<Item = &'a Spanned>
{
    if let Some((token, position)) = tokens.peek()
       && let Some(ty) = token.as_type()
    {
        let position = *position;
        tokens.next();
        return Ok((ty, position));
    }
    Err(unexpected("a type", tokens.peek().copied()))
}

/// Whether the next token starts a declaration.
pub(in crate::interpreter::parser) fn at_type<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a Spanned>
{
    tokens.peek().is_some_and(|(token, _)| token.as_type().is_some())
}
