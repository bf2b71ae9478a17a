use thiserror::Error;

use crate::{interpreter::lexer::LexErrorKind, util::position::Position};

/// Represents all errors that can occur while tokenizing source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that starts no token.
    #[error("Error at {position}: Unexpected character '{character}'.")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Where it appeared.
        position:  Position,
    },
    /// A char or string literal that is empty, unterminated, non-ASCII or
    /// uses an unknown escape sequence.
    #[error("Error at {position}: Malformed literal {lexeme}.")]
    MalformedLiteral {
        /// The source text of the literal.
        lexeme:   String,
        /// Where the literal starts.
        position: Position,
    },
    /// An integer literal too large for a signed 64-bit integer.
    #[error("Error at {position}: Integer literal {lexeme} is too large.")]
    IntegerOutOfRange {
        /// The digits as written.
        lexeme:   String,
        /// Where the literal starts.
        position: Position,
    },
}

impl LexError {
    /// Builds the error for a slice the lexer could not turn into a token.
    ///
    /// A slice starting with a quote is always reported as a malformed
    /// literal, whatever kind the lexer assigned, since the quote opened one.
    #[must_use]
    pub fn from_kind(kind: &LexErrorKind, slice: &str, position: Position) -> Self {
        if slice.starts_with(['"', '\'']) {
            return Self::MalformedLiteral { lexeme: slice.to_string(),
                                            position };
        }
        match kind {
            LexErrorKind::IntegerOutOfRange => Self::IntegerOutOfRange { lexeme: slice.to_string(),
                                                                         position },
            LexErrorKind::MalformedLiteral => Self::MalformedLiteral { lexeme: slice.to_string(),
                                                                       position },
            LexErrorKind::UnexpectedCharacter => {
                Self::UnexpectedCharacter { character: slice.chars().next().unwrap_or('\0'),
                                            position }
            },
        }
    }

    /// The position the error points at.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedCharacter { position, .. }
            | Self::MalformedLiteral { position, .. }
            | Self::IntegerOutOfRange { position, .. } => *position,
        }
    }
}
