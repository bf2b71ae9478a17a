use crate::{
    ast::Program,
    interpreter::{
        lexer::Spanned,
        parser::core::{ParseResult, parse_program},
    },
};

/// Binary operator parsing.
///
/// One function per precedence level, from logical OR down to
/// multiplication, all left associative.
pub mod binary;
/// Block parsing.
///
/// Parses brace-delimited statement lists, which may contain declarations.
pub mod block;
/// Core parsing entry points.
///
/// Contains the parse result type, the expression entry point with
/// assignment handling, and the top-level program grammar.
pub mod core;
/// Statement parsing.
///
/// Declarations, control flow (`if`, `while`, `for`, `switch`), `return`,
/// `break` and expression statements.
pub mod statement;
/// Unary and primary expression parsing.
///
/// Prefix operators, literals, variable references, calls and parenthesized
/// expressions.
pub mod unary;
/// Shared helpers for the parser submodules.
pub mod utils;

/// Parses a complete token stream into a [`Program`].
///
/// The stream must end with the end-of-input token produced by
/// [`tokenize`](crate::interpreter::lexer::tokenize).
///
/// # Errors
/// Returns the first [`SyntaxError`](crate::error::SyntaxError) found.
///
/// ## Example
/// ```
/// use subc::interpreter::{lexer::tokenize, parser::parse};
///
/// let tokens = tokenize("Program hello; void main() { print(\"hi\\n\"); }").unwrap();
/// let program = parse(&tokens).unwrap();
///
/// assert_eq!(program.name, "hello");
/// assert_eq!(program.functions().count(), 1);
/// ```
pub fn parse(tokens: &[Spanned]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let program = parse_program(&mut iter)?;
    tracing::debug!(program = %program.name, items = program.items.len(), "parsed program");
    Ok(program)
}
