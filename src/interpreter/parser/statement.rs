use std::iter::Peekable;

use crate::{
    ast::{CaseLabel, Expr, ForInit, Statement, SwitchCase, Type, VarDecl},
    error::SyntaxError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{at_type, expect, parse_identifier, parse_type, peek_position, unexpected},
        },
    },
    util::position::Position,
};

/// Parses one item of a block: a declaration or a statement.
///
/// Declarations are only allowed here, in a `for` initializer and at the top
/// level. Everywhere else [`parse_statement`] rejects them.
///
/// Grammar: `block_item := declaration ";" | statement`
pub fn parse_block_item<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned>
{
    if at_type(tokens) {
        let declaration = parse_declaration(tokens)?;
        expect(tokens, &Token::Semicolon, "';' after declaration")?;
        return Ok(Statement::VariableDeclaration(declaration));
    }

    parse_statement(tokens)
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - a block,
/// - an `if`, `while`, `for` or `switch` statement,
/// - a `return` or `break` statement,
/// - an expression followed by `;`.
///
/// The construct is selected by the first token; anything that does not start
/// with a keyword or `{` is parsed as an expression statement.
///
/// # Errors
/// - `DeclarationNotAllowed` if a declaration appears where only a statement
///   may, such as the body of an `if`.
/// - Propagates errors from the selected construct.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned>
{
    let position = peek_position(tokens);

    match tokens.peek() {
        Some((token, _)) if token.as_type().is_some() => {
            Err(SyntaxError::DeclarationNotAllowed { position })
        },
        Some((Token::LBrace, _)) => {
            tokens.next();
            Ok(Statement::Block(parse_block(tokens, position)?))
        },
        Some((Token::If, _)) => {
            tokens.next();
            parse_if(tokens, position)
        },
        Some((Token::While, _)) => {
            tokens.next();
            parse_while(tokens, position)
        },
        Some((Token::For, _)) => {
            tokens.next();
            parse_for(tokens, position)
        },
        Some((Token::Switch, _)) => {
            tokens.next();
            parse_switch(tokens, position)
        },
        Some((Token::Return, _)) => {
            tokens.next();
            let value = match tokens.peek() {
                Some((Token::Semicolon, _)) => None,
                _ => Some(parse_expression(tokens)?),
            };
            expect(tokens, &Token::Semicolon, "';' after return")?;
            Ok(Statement::Return { value, position })
        },
        Some((Token::Break, _)) => {
            tokens.next();
            expect(tokens, &Token::Semicolon, "';' after break")?;
            Ok(Statement::Break { position })
        },
        _ => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::Semicolon, "';' after expression")?;
            Ok(Statement::Expression { expr, position })
        },
    }
}

/// Parses a declaration without its terminating `;`.
///
/// Grammar: `declaration := type identifier ("=" expression)?`
pub fn parse_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<VarDecl>
    where I: Iterator<Item = &'a Spanned>
{
    let (ty, position) = parse_type(tokens)?;
    let (name, _) = parse_identifier(tokens, "variable name")?;
    parse_declaration_rest(tokens, ty, name, position)
}

/// Parses the optional initializer of a declaration whose type and name have
/// already been consumed.
pub fn parse_declaration_rest<'a, I>(tokens: &mut Peekable<I>,
                                     ty: Type,
                                     name: String,
                                     position: Position)
                                     -> ParseResult<VarDecl>
    where I: Iterator<Item = &'a Spanned>
{
    let initializer = if let Some((Token::Equals, _)) = tokens.peek() {
        tokens.next();
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    Ok(VarDecl { ty,
                 name,
                 initializer,
                 position })
}

/// Parses a parenthesized condition, `"(" expression ")"`.
fn parse_condition<'a, I>(tokens: &mut Peekable<I>, keyword: &str) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned>
{
    expect(tokens, &Token::LParen, &format!("'(' after '{keyword}'"))?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, &format!("')' after the {keyword} condition"))?;
    Ok(condition)
}

/// Parses an `if` statement with an optional `else`.
///
/// Syntax:
/// ```text
///     if (<condition>) <statement>
///     if (<condition>) <statement> else <statement>
/// ```
/// An `else` binds to the nearest unmatched `if`: the inner `parse_statement`
/// call for the then-branch claims it first.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `position`: Position of the `if` token.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned>
{
    let condition = parse_condition(tokens, "if")?;
    let then_branch = Box::new(parse_statement(tokens)?);

    let else_branch = match tokens.peek() {
        Some((Token::Else, _)) => {
            tokens.next();
            Some(Box::new(parse_statement(tokens)?))
        },
        _ => None,
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       position })
}

/// Parses `while (<condition>) <statement>` after the keyword.
fn parse_while<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned>
{
    let condition = parse_condition(tokens, "while")?;
    let body = Box::new(parse_statement(tokens)?);

    Ok(Statement::While { condition,
                          body,
                          position })
}

/// Parses a C-style `for` statement after the keyword.
///
/// Syntax: `for (<init>?; <condition>?; <step>?) <statement>`
///
/// The initializer may be a declaration (scoped to the loop) or an
/// expression. Every clause may be empty; an empty condition loops until a
/// `break` or `return`.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned>
{
    expect(tokens, &Token::LParen, "'(' after 'for'")?;

    let init = if at_type(tokens) {
        Some(ForInit::Declaration(parse_declaration(tokens)?))
    } else if let Some((Token::Semicolon, _)) = tokens.peek() {
        None
    } else {
        Some(ForInit::Expression(parse_expression(tokens)?))
    };
    expect(tokens, &Token::Semicolon, "';' after the for initializer")?;

    let condition = match tokens.peek() {
        Some((Token::Semicolon, _)) => None,
        _ => Some(parse_expression(tokens)?),
    };
    expect(tokens, &Token::Semicolon, "';' after the for condition")?;

    let step = match tokens.peek() {
        Some((Token::RParen, _)) => None,
        _ => Some(parse_expression(tokens)?),
    };
    expect(tokens, &Token::RParen, "')' after the for clauses")?;

    let body = Box::new(parse_statement(tokens)?);

    Ok(Statement::For { init,
                        condition,
                        step,
                        body,
                        position })
}

/// Parses a `switch` statement after the keyword.
///
/// Syntax:
/// ```text
///     switch (<expression>) {
///         case <constant>: <statement>*
///         default: <statement>*
///     }
/// ```
/// Each label starts a new case group holding the statements up to the next
/// label. A label with no statements of its own produces an empty group, so
/// `case 1: case 2: x;` falls from the first group into the second.
fn parse_switch<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Spanned>
{
    let scrutinee = parse_condition(tokens, "switch")?;
    expect(tokens, &Token::LBrace, "'{' to start the switch body")?;

    let mut cases = Vec::new();
    loop {
        let label_position = peek_position(tokens);
        let label = match tokens.peek() {
            Some((Token::Case, _)) => {
                tokens.next();
                Some(parse_case_label(tokens)?)
            },
            Some((Token::Default, _)) => {
                tokens.next();
                None
            },
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            other => {
                return Err(unexpected("'case', 'default' or '}'", other.copied()));
            },
        };
        expect(tokens, &Token::Colon, "':' after the case label")?;

        let mut statements = Vec::new();
        while let Some((token, _)) = tokens.peek()
              && !matches!(token, Token::Case | Token::Default | Token::RBrace | Token::Eof)
        {
            statements.push(parse_statement(tokens)?);
        }

        cases.push(SwitchCase { label,
                                statements,
                                position: label_position });
    }

    Ok(Statement::Switch { scrutinee,
                           cases,
                           position })
}

/// Parses the constant after `case`: an integer (optionally negated) or a
/// character literal.
fn parse_case_label<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<CaseLabel>
    where I: Iterator<Item = &'a Spanned>
{
    match tokens.next() {
        Some((Token::Integer(n), _)) => Ok(CaseLabel::Integer(*n)),
        Some((Token::Char(c), _)) => Ok(CaseLabel::Char(*c)),
        Some((Token::Minus, _)) => match tokens.next() {
            Some((Token::Integer(n), _)) => Ok(CaseLabel::Integer(-n)),
            other => Err(unexpected("an integer after '-'", other)),
        },
        other => Err(unexpected("an integer or character constant", other)),
    }
}
