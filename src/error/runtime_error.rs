use thiserror::Error;

use crate::{ast::Type, util::position::Position};

/// Represents all errors that can occur during evaluation.
///
/// Several variants cannot happen for a program that passed the checker
/// (unknown names, arity mismatches, operand type errors); the evaluator still
/// reports them as errors instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to read or assign an undefined variable.
    #[error("Error at {position}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name:     String,
        /// Where it was referenced.
        position: Position,
    },
    /// Called an unknown function.
    #[error("Error at {position}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name:     String,
        /// Where it was called.
        position: Position,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error at {position}: Function '{name}' expects {expected} argument(s) but {found} were supplied.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Number of parameters.
        expected: usize,
        /// Number of arguments.
        found:    usize,
        /// Where it was called.
        position: Position,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error at {position}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details:  String,
        /// Where the operation happened.
        position: Position,
    },
    /// Attempted division or modulo by zero.
    #[error("Error at {position}: Division by zero.")]
    DivisionByZero {
        /// Where the division happened.
        position: Position,
    },
    /// Arithmetic operation overflowed.
    #[error("Error at {position}: Integer overflow while trying to compute result.")]
    Overflow {
        /// Where the operation happened.
        position: Position,
    },
    /// The call stack grew past the configured maximum depth.
    #[error("Error at {position}: Stack overflow, call depth exceeded {limit}.")]
    StackOverflow {
        /// The configured maximum depth.
        limit:    usize,
        /// The call that would have exceeded it.
        position: Position,
    },
    /// The program declares no `main` function.
    #[error("Error: Program '{program}' has no 'main' function.")]
    MissingMain {
        /// The name from the program header.
        program: String,
    },
    /// `main` was declared with parameters, which nothing can supply.
    #[error("Error at {position}: 'main' must not take parameters.")]
    InvalidMain {
        /// Where `main` is declared.
        position: Position,
    },
    /// A value-returning function finished without executing a `return`.
    #[error("Error at {position}: Function '{name}' ended without returning a value.")]
    MissingReturnValue {
        /// The name of the function.
        name:     String,
        /// Where the function is declared.
        position: Position,
    },
    /// A `%` verb in a `print` format has no argument left to consume.
    #[error("Error at {position}: Format verb '%{verb}' has no matching argument.")]
    MissingFormatArgument {
        /// The verb character.
        verb:     char,
        /// Where `print` was called.
        position: Position,
    },
    /// A `print` argument does not match the type its verb requires.
    #[error("Error at {position}: Format verb '%{verb}' expects {expected}, found {found}.")]
    FormatTypeMismatch {
        /// The verb character.
        verb:     char,
        /// Type the verb formats.
        expected: Type,
        /// Type of the supplied argument.
        found:    Type,
        /// Where `print` was called.
        position: Position,
    },
    /// A `%` followed by a character that is not a known verb.
    #[error("Error at {position}: Unknown format verb '%{verb}'.")]
    UnknownFormatVerb {
        /// The character after `%`.
        verb:     char,
        /// Where `print` was called.
        position: Position,
    },
    /// A format string ending in a lone `%`.
    #[error("Error at {position}: Format string ends with a lone '%'.")]
    DanglingPercent {
        /// Where `print` was called.
        position: Position,
    },
    /// More arguments than the format string has verbs.
    #[error("Error at {position}: {count} argument(s) left over after formatting.")]
    UnusedFormatArguments {
        /// How many arguments were not consumed.
        count:    usize,
        /// Where `print` was called.
        position: Position,
    },
    /// Writing to the output sink failed.
    #[error("Error at {position}: Failed to write output: {message}.")]
    Output {
        /// The I/O error message.
        message:  String,
        /// Where `print` was called.
        position: Position,
    },
    /// The thread that evaluates the program could not be started.
    #[error("Error: Failed to start the evaluator thread with a {stack_size} byte stack: {message}.")]
    EvaluatorThread {
        /// The requested stack size in bytes.
        stack_size: usize,
        /// The I/O error message.
        message:    String,
    },
}

impl RuntimeError {
    /// The position the error points at, if it has one.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::UnknownVariable { position, .. }
            | Self::UnknownFunction { position, .. }
            | Self::ArgumentCountMismatch { position, .. }
            | Self::TypeError { position, .. }
            | Self::DivisionByZero { position }
            | Self::Overflow { position }
            | Self::StackOverflow { position, .. }
            | Self::InvalidMain { position }
            | Self::MissingReturnValue { position, .. }
            | Self::MissingFormatArgument { position, .. }
            | Self::FormatTypeMismatch { position, .. }
            | Self::UnknownFormatVerb { position, .. }
            | Self::DanglingPercent { position }
            | Self::UnusedFormatArguments { position, .. }
            | Self::Output { position, .. } => Some(*position),
            Self::MissingMain { .. } | Self::EvaluatorThread { .. } => None,
        }
    }
}
