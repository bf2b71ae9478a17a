use logos::{Lexer, Logos, Skip};

use crate::{ast::Type, error::LexError, util::position::Position};

/// Result type used by the lexer.
pub type LexResult<T> = Result<T, LexError>;

/// A token paired with the position of its first character.
pub type Spanned = (Token, Position);

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Its `Display` form is the token's source text.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Character literal tokens, such as `'a'` or `'\n'`.
    #[regex(r"'([^'\\\n]|\\.)*'", parse_char, allow_greedy = true)]
    Char(u8),
    /// String literal tokens, such as `"hello\n"`.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string, allow_greedy = true)]
    Str(String),
    /// `Program`
    #[token("Program")]
    Program,
    /// `void`
    #[token("void")]
    Void,
    /// `int`
    #[token("int")]
    Int,
    /// `char`
    #[token("char")]
    CharType,
    /// `string`
    #[token("string")]
    StringType,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `switch`
    #[token("switch")]
    Switch,
    /// `case`
    #[token("case")]
    Case,
    /// `default`
    #[token("default")]
    Default,
    /// `break`
    #[token("break")]
    Break,
    /// `return`
    #[token("return")]
    Return,
    /// Identifier tokens; variable or function names such as `x` or
    /// `getchar`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `/* Block comments. */`
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", block_comment, allow_greedy = true)]
    BlockComment,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `!`
    #[token("!")]
    Bang,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// Line breaks; tracked for positions, never emitted.
    #[token("\n", newline)]
    NewLine,
    /// End-of-input sentinel appended by [`Tokens`].
    Eof,
}

impl Token {
    /// The type named by a type keyword, if this token is one.
    ///
    /// ## Example
    /// ```
    /// use subc::{ast::Type, interpreter::lexer::Token};
    ///
    /// assert_eq!(Token::CharType.as_type(), Some(Type::Char));
    /// assert_eq!(Token::If.as_type(), None);
    /// ```
    #[must_use]
    pub const fn as_type(&self) -> Option<Type> {
        match self {
            Self::Void => Some(Type::Void),
            Self::Int => Some(Type::Int),
            Self::CharType => Some(Type::Char),
            Self::StringType => Some(Type::String),
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Integer(n) => return write!(f, "{n}"),
            Self::Char(c) => return write!(f, "'{}'", escape_char(*c)),
            Self::Str(s) => return write!(f, "\"{}\"", escape_str(s)),
            Self::Identifier(name) => return write!(f, "{name}"),
            Self::Program => "Program",
            Self::Void => "void",
            Self::Int => "int",
            Self::CharType => "char",
            Self::StringType => "string",
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::Switch => "switch",
            Self::Case => "case",
            Self::Default => "default",
            Self::Break => "break",
            Self::Return => "return",
            Self::Comment | Self::BlockComment => "comment",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Equals => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::AndAnd => "&&",
            Self::OrOr => "||",
            Self::Bang => "!",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::NewLine => "newline",
            Self::Eof => "end of input",
        };
        write!(f, "{text}")
    }
}

/// Error classification produced inside the logos state machine.
///
/// The lexer turns it into a positioned [`LexError`] once the failing slice
/// is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LexErrorKind {
    /// No token starts with this character.
    #[default]
    UnexpectedCharacter,
    /// A char or string literal with a bad body.
    MalformedLiteral,
    /// An integer literal outside the `i64` range.
    IntegerOutOfRange,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and where it starts so every token can be given a
/// line and column.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset at which the current line starts.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// A lazy token stream over a source string.
///
/// Yields positioned tokens, then a single [`Token::Eof`], then stops. The
/// first lexical error ends the stream.
///
/// ## Example
/// ```
/// use subc::interpreter::lexer::{Token, Tokens};
///
/// let kinds: Vec<Token> = Tokens::new("x = 1;").map(|t| t.unwrap().0).collect();
///
/// assert_eq!(kinds,
///            vec![Token::Identifier("x".into()),
///                 Token::Equals,
///                 Token::Integer(1),
///                 Token::Semicolon,
///                 Token::Eof]);
/// ```
pub struct Tokens<'s> {
    lexer:    Lexer<'s, Token>,
    finished: bool,
}

impl<'s> Tokens<'s> {
    /// Starts tokenizing `source` at line 1, column 1.
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self { lexer:    Token::lexer_with_extras(source, LexerExtras::default()),
               finished: false, }
    }

    fn position_of(&self, offset: usize) -> Position {
        Position::new(self.lexer.extras.line,
                      offset.saturating_sub(self.lexer.extras.line_start) + 1)
    }
}

impl Iterator for Tokens<'_> {
    type Item = LexResult<Spanned>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.lexer.next() {
            Some(Ok(token)) => Some(Ok((token, self.position_of(self.lexer.span().start)))),
            Some(Err(kind)) => {
                self.finished = true;
                let position = self.position_of(self.lexer.span().start);
                Some(Err(LexError::from_kind(&kind, self.lexer.slice(), position)))
            },
            None => {
                self.finished = true;
                let end = self.lexer.source().len();
                Some(Ok((Token::Eof, self.position_of(end))))
            },
        }
    }
}

/// Tokenizes a complete source string.
///
/// Whitespace and comments are discarded; the returned vector always ends
/// with [`Token::Eof`].
///
/// # Errors
/// Returns the first [`LexError`] encountered.
///
/// ## Example
/// ```
/// use subc::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("Program demo; // header\n").unwrap();
///
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[1].0, Token::Identifier("demo".into()));
/// assert_eq!(tokens[1].1.column, 9);
/// assert_eq!(tokens[3].0, Token::Eof);
/// ```
pub fn tokenize(source: &str) -> LexResult<Vec<Spanned>> {
    let tokens = Tokens::new(source).collect::<LexResult<Vec<_>>>()?;
    tracing::debug!(count = tokens.len(), "lexed source");
    Ok(tokens)
}

/// Renders a byte as it would appear between single quotes.
#[must_use]
pub fn escape_char(c: u8) -> String {
    match c {
        b'\n' => "\\n".to_string(),
        b'\t' => "\\t".to_string(),
        b'\r' => "\\r".to_string(),
        b'\0' => "\\0".to_string(),
        b'\\' => "\\\\".to_string(),
        b'\'' => "\\'".to_string(),
        _ => char::from(c).to_string(),
    }
}

/// Renders text as it would appear between double quotes.
#[must_use]
pub fn escape_str(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\0' => escaped.push_str("\\0"),
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Decodes the body of a char or string literal (without its quotes).
///
/// Supported escapes: `\n`, `\t`, `\r`, `\0`, `\\`, `\'` and `\"`.
fn unescape(body: &str) -> Result<String, LexErrorKind> {
    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some('\'') => '\'',
            Some('"') => '"',
            _ => return Err(LexErrorKind::MalformedLiteral),
        };
        decoded.push(escaped);
    }

    Ok(decoded)
}

/// Strips the surrounding quotes from a literal slice.
fn literal_body<'s>(lex: &Lexer<'s, Token>) -> &'s str {
    let slice = lex.slice();
    &slice[1..slice.len() - 1]
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &Lexer<Token>) -> Result<i64, LexErrorKind> {
    lex.slice()
       .parse()
       .map_err(|_| LexErrorKind::IntegerOutOfRange)
}

/// Parses a character literal; the decoded body must be exactly one ASCII
/// character.
fn parse_char(lex: &Lexer<Token>) -> Result<u8, LexErrorKind> {
    let decoded = unescape(literal_body(lex))?;
    let mut bytes = decoded.bytes();
    match (bytes.next(), bytes.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(LexErrorKind::MalformedLiteral),
    }
}

/// Parses a string literal, decoding its escapes.
fn parse_string(lex: &Lexer<Token>) -> Result<String, LexErrorKind> {
    unescape(literal_body(lex))
}

/// Advances the line counter past a line break.
fn newline(lex: &mut Lexer<Token>) -> Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    Skip
}

/// Skips a block comment, counting the line breaks inside it.
fn block_comment(lex: &mut Lexer<Token>) -> Skip {
    let comment = lex.slice();
    let start = lex.span().start;
    if let Some(last) = comment.rfind('\n') {
        lex.extras.line += comment.matches('\n').count();
        lex.extras.line_start = start + last + 1;
    }
    Skip
}
