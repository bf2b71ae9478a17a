use thiserror::Error;

use crate::util::position::Position;

/// Represents all errors that can occur while parsing a token stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Found a token the grammar does not allow here.
    #[error("Error at {position}: Expected {expected}, found {found}.")]
    UnexpectedToken {
        /// Description of what the parser was looking for.
        expected: String,
        /// The token actually found, in source form.
        found:    String,
        /// Where the token starts.
        position: Position,
    },
    /// The input ended in the middle of a construct.
    #[error("Error at {position}: Expected {expected}, found end of input.")]
    UnexpectedEndOfInput {
        /// Description of what the parser was looking for.
        expected: String,
        /// Position of the end-of-input marker.
        position: Position,
    },
    /// The left side of `=` is not a plain variable name.
    #[error("Error at {position}: Invalid assignment target. Only variables can be assigned.")]
    InvalidAssignmentTarget {
        /// Where the assignment operator appears.
        position: Position,
    },
    /// A declaration appeared where only a statement is allowed, for example
    /// as the body of an `if` or inside a `case`.
    #[error("Error at {position}: A declaration is not allowed here. Wrap it in a block.")]
    DeclarationNotAllowed {
        /// Where the declaration starts.
        position: Position,
    },
}

impl SyntaxError {
    /// The position the error points at.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position, .. }
            | Self::InvalidAssignmentTarget { position }
            | Self::DeclarationNotAllowed { position } => *position,
        }
    }
}
