use std::iter::Peekable;

use crate::{
    ast::{Expr, FunctionDecl, Item, Parameter, Program, Type, VarDecl},
    error::SyntaxError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            binary::parse_logical_or,
            block::parse_block,
            statement::parse_declaration_rest,
            utils::{expect, parse_comma_separated, parse_identifier, parse_type},
        },
    },
    util::position::Position,
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := logical_or ("=" expression)?`
///
/// Assignment is right associative, so `a = b = 1` assigns `1` to `b` and
/// then to `a`. Its target must be a plain identifier.
///
/// # Errors
/// - `InvalidAssignmentTarget` if the left side of `=` is not an identifier.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned>
{
    let target = parse_logical_or(tokens)?;

    if let Some((Token::Equals, position)) = tokens.peek() {
        let position = *position;
        tokens.next();

        let value = parse_expression(tokens)?;
        return match target {
            Expr::Identifier { name, .. } => Ok(Expr::Assignment { name,
                                                                   value: Box::new(value),
                                                                   position }),
            _ => Err(SyntaxError::InvalidAssignmentTarget { position }),
        };
    }

    Ok(target)
}

/// Parses a whole program.
///
/// Grammar:
/// ```text
/// program := "Program" identifier ";" item* EOF
/// item    := type identifier "(" parameters ")" block
///          | type identifier ("=" expression)? ";"
/// ```
///
/// The header name is kept as metadata. Functions and global variables may
/// appear in any order after it.
///
/// # Errors
/// Returns a `SyntaxError` if the header is missing or malformed, or any
/// item fails to parse.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a Spanned>
{
    let position = expect(tokens, &Token::Program, "'Program' header")?;
    let (name, _) = parse_identifier(tokens, "program name")?;
    expect(tokens, &Token::Semicolon, "';' after program name")?;

    let mut items = Vec::new();
    while let Some((token, _)) = tokens.peek()
          && *token != Token::Eof
    {
        items.push(parse_item(tokens)?);
    }

    Ok(Program { name,
                 items,
                 position })
}

/// Parses one top-level function definition or global declaration.
///
/// Both start with `type identifier`; a following `(` selects a function.
fn parse_item<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Item>
    where I: Iterator<Item = &'a Spanned>
{
    let (ty, position) = parse_type(tokens)?;
    let (name, _) = parse_identifier(tokens, "function or variable name")?;

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(Item::Function(parse_function_rest(tokens, ty, name, position)?));
    }

    let global: VarDecl = parse_declaration_rest(tokens, ty, name, position)?;
    expect(tokens, &Token::Semicolon, "';' after declaration")?;
    Ok(Item::Global(global))
}

/// Parses a function's parameter list and body after its opening `(`.
fn parse_function_rest<'a, I>(tokens: &mut Peekable<I>,
                              return_type: Type,
                              name: String,
                              position: Position)
                              -> ParseResult<FunctionDecl>
    where I: Iterator<Item = &'a Spanned>
{
    let params = parse_comma_separated(tokens, parse_parameter, &Token::RParen)?;
    let brace = expect(tokens, &Token::LBrace, "'{' to start the function body")?;
    let body = parse_block(tokens, brace)?;

    Ok(FunctionDecl { name,
                      params,
                      return_type,
                      body,
                      position })
}

/// Parses `type identifier` in a parameter list.
fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Parameter>
    where I: Iterator<Item = &'a Spanned>
{
    let (ty, position) = parse_type(tokens)?;
    let (name, _) = parse_identifier(tokens, "parameter name")?;
    Ok(Parameter { name, ty, position })
}
