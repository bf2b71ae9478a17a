/// The checker module validates a parsed program before it runs.
///
/// The checker walks the AST once and collects every semantic error instead
/// of stopping at the first: undeclared names, arity and type mismatches,
/// missing returns and misplaced `break`s. A program that passes comes out
/// as a [`CheckedProgram`](checker::CheckedProgram) with its
/// cross-reference table.
///
/// # Responsibilities
/// - Resolves every identifier against the scopes visible at its use.
/// - Types every expression under the `int`/`char`/`string` rules.
/// - Records declarations and references for the cross-reference listing.
pub mod checker;
/// Runtime variable storage: globals plus a stack of call frames, each a
/// stack of block scopes.
pub mod environment;
/// The evaluator module executes checked programs.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// performs arithmetic and logical operations, manages variable state, and
/// writes `print` output. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, and control flow.
/// - Reports runtime errors such as division by zero or exceeding the call
///   depth limit.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// literals, identifiers, operators, delimiters, and keywords. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their source
///   position.
/// - Decodes escape sequences in character and string literals.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of the program. This
/// enables later phases to analyze and execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (items, statements,
///   expressions).
/// - Validates correct grammar and syntax, reporting errors with location
///   info.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Runtime values are `int`, `char` and `string`, plus the void result of
/// calling a `void` function, together with the defaults and coercions
/// used when storing them.
pub mod value;
