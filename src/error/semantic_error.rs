use thiserror::Error;

use crate::{ast::Type, util::position::Position};

/// A single problem found by the semantic checker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error at {position}: {kind}.")]
pub struct SemanticError {
    /// What went wrong.
    pub kind:     SemanticErrorKind,
    /// Where it went wrong.
    pub position: Position,
}

impl SemanticError {
    #[must_use]
    pub const fn new(kind: SemanticErrorKind, position: Position) -> Self {
        Self { kind, position }
    }
}

/// The kinds of semantic error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticErrorKind {
    /// A variable was used or assigned without an enclosing declaration.
    #[error("Unknown variable '{name}'")]
    UnknownVariable {
        /// The variable name.
        name: String,
    },
    /// A call names no declared function and no built-in.
    #[error("Unknown function '{name}'")]
    UnknownFunction {
        /// The function name.
        name: String,
    },
    /// A call passes the wrong number of arguments.
    #[error("Function '{name}' expects {expected} argument(s) but {found} were supplied")]
    ArgumentCountMismatch {
        /// The function name.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of arguments at the call site.
        found:    usize,
    },
    /// A name was declared twice in the same scope.
    #[error("'{name}' is already declared in this scope")]
    Redeclared {
        /// The repeated name.
        name: String,
    },
    /// Two top-level functions share a name.
    #[error("Function '{name}' is already defined")]
    FunctionAlreadyDefined {
        /// The repeated name.
        name: String,
    },
    /// A user function uses the name of a built-in.
    #[error("Cannot redefine built-in function '{name}'")]
    BuiltinFunctionRedefinition {
        /// The built-in's name.
        name: String,
    },
    /// A value-returning function has no reachable `return <expr>`.
    #[error("Function '{name}' returns {return_type} but has no reachable return statement")]
    MissingReturn {
        /// The function name.
        name:        String,
        /// Its declared return type.
        return_type: Type,
    },
    /// A bare `return;` inside a value-returning function.
    #[error("Function '{name}' returns {expected} but this return statement has no value")]
    MissingReturnValue {
        /// The function name.
        name:     String,
        /// Its declared return type.
        expected: Type,
    },
    /// A `return <expr>` inside a `void` function.
    #[error("Void function '{name}' cannot return a value")]
    UnexpectedReturnValue {
        /// The function name.
        name: String,
    },
    /// `break` outside of any loop or switch body.
    #[error("'break' outside of a loop or switch")]
    BreakOutsideLoop,
    /// A value of one type was used where another is required.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The required type.
        expected: Type,
        /// The type supplied.
        found:    Type,
    },
    /// An operator was applied to an operand type it does not support, for
    /// example comparing two strings.
    #[error("Operator '{operator}' cannot be applied to {operand}")]
    InvalidOperand {
        /// The operator in source form.
        operator: String,
        /// The offending operand type.
        operand:  Type,
    },
    /// An `if`, `while` or `for` condition that is not `int` or `char`.
    #[error("Condition must be int or char, found {found}")]
    InvalidCondition {
        /// The condition's type.
        found: Type,
    },
    /// The result of a `void` call used as a value.
    #[error("Function '{name}' returns void and cannot be used as a value")]
    VoidValue {
        /// The called function.
        name: String,
    },
    /// A variable or parameter declared as `void`.
    #[error("Variable '{name}' cannot have type void")]
    VoidVariable {
        /// The variable name.
        name: String,
    },
    /// A switch on something other than `int` or `char`.
    #[error("Switch expression must be int or char, found {found}")]
    InvalidSwitchType {
        /// The scrutinee's type.
        found: Type,
    },
    /// Two `case` labels with the same constant in one switch.
    #[error("Duplicate case label {label}")]
    DuplicateCase {
        /// The repeated label in source form.
        label: String,
    },
    /// More than one `default` in one switch.
    #[error("Multiple default labels in one switch")]
    DuplicateDefault,
    /// `print` called without arguments.
    #[error("'print' requires a format string as its first argument")]
    MissingFormatString,
}

/// Every semantic error found in one checker run, in discovery order.
///
/// Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SemanticErrors(pub Vec<SemanticError>);

impl SemanticErrors {
    /// Number of errors found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the errors in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, SemanticError> {
        self.0.iter()
    }

    /// Iterates over just the error kinds; convenient in tests.
    pub fn kinds(&self) -> impl Iterator<Item = &SemanticErrorKind> {
        self.0.iter().map(|error| &error.kind)
    }
}

impl<'a> IntoIterator for &'a SemanticErrors {
    type Item = &'a SemanticError;
    type IntoIter = std::slice::Iter<'a, SemanticError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for SemanticErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SemanticErrors {}
