use thiserror::Error;

/// Lexical errors.
///
/// Raised while turning source text into tokens: characters outside the
/// language's alphabet, malformed char or string literals and integer
/// literals that do not fit in 64 bits.
pub mod lex_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// division by zero, format-verb mismatches in `print` and exceeding the
/// maximum call depth.
pub mod runtime_error;
/// Semantic errors.
///
/// Produced by the checker. Unlike the other stages the checker does not stop
/// at the first problem, so its errors travel together in
/// [`SemanticErrors`].
pub mod semantic_error;
/// Syntax errors.
///
/// Defines the errors raised when a token sequence does not match the
/// grammar, including the expected construct and the token actually found.
pub mod syntax_error;

pub use lex_error::LexError;
pub use runtime_error::RuntimeError;
pub use semantic_error::{SemanticError, SemanticErrorKind, SemanticErrors};
pub use syntax_error::SyntaxError;

/// Any failure of the source-to-output pipeline.
///
/// Each stage keeps its own error type; this enum only tags which stage
/// failed so callers can tell parse failures from runtime failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The lexer rejected the source text.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The parser rejected the token stream.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The checker found one or more semantic errors.
    #[error(transparent)]
    Semantic(#[from] SemanticErrors),
    /// Evaluation stopped at a runtime error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Process exit status for this failure.
    ///
    /// `0` is success and `1` is reserved for failing to read the input, so
    /// the stages start at `2`.
    ///
    /// ## Example
    /// ```
    /// use subc::run_source;
    ///
    /// let mut out = Vec::new();
    /// let err = run_source("Program p; int main() { print(\"%d\", 1 / 0); }",
    ///                      &mut out,
    ///                      &subc::config::InterpreterConfig::default()).unwrap_err();
    ///
    /// assert_eq!(err.exit_code(), 5);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Lex(_) => 2,
            Self::Syntax(_) => 3,
            Self::Semantic(_) => 4,
            Self::Runtime(_) => 5,
        }
    }

    /// Short name of the stage that failed, used in logs.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Lex(_) => "lexer",
            Self::Syntax(_) => "parser",
            Self::Semantic(_) => "checker",
            Self::Runtime(_) => "evaluator",
        }
    }
}
