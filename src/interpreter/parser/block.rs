use std::iter::Peekable;

use crate::{
    ast::Block,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{core::ParseResult, statement::parse_block_item, utils::unexpected},
    },
    util::position::Position,
};

/// Parses a block delimited by braces.
///
/// A block consists of zero or more block items (declarations or
/// statements). Parsing continues until a closing `}` token is consumed.
///
/// Grammar: `block := "{" block_item* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening brace.
/// - `position`: Position of the opening brace.
///
/// # Errors
/// Returns a `SyntaxError` if the input ends before the closing brace or an
/// item fails to parse.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Block>
    where I: Iterator<Item = &'a Spanned>
{
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            found @ (Some((Token::Eof, _)) | None) => {
                return Err(unexpected("'}' to close the block", found.copied()));
            },
            Some(_) => statements.push(parse_block_item(tokens)?),
        }
    }

    Ok(Block { statements, position })
}
