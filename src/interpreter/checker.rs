use crate::{
    ast::Program,
    error::SemanticErrors,
    interpreter::checker::{core::Checker, xref::CrossReference},
};

/// Checker state and scope handling.
///
/// Holds the scope stack, function signatures and the error list shared by
/// the statement and expression passes.
pub mod core;
/// Expression typing.
///
/// Computes the static type of every expression and reports operand,
/// assignment and call errors.
pub mod expression;
/// Statement checking.
///
/// Declarations, control flow, `return` and `break` rules, plus the
/// reachability analysis behind the missing-return check.
pub mod statement;
/// Cross-reference table.
///
/// Every declared identifier with its kind, type, scope nesting level and
/// the lines where it is declared and used.
pub mod xref;

/// A program that passed semantic checking, together with its
/// cross-reference table.
///
/// Only [`check`] creates one, so the evaluator can rely on the checker's
/// guarantees.
#[derive(Debug, Clone)]
pub struct CheckedProgram {
    program: Program,
    xref:    CrossReference,
}

impl CheckedProgram {
    /// The validated syntax tree.
    #[must_use]
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// The identifiers the program declares and where they are used.
    #[must_use]
    pub const fn cross_reference(&self) -> &CrossReference {
        &self.xref
    }

    /// Gives back the syntax tree.
    #[must_use]
    pub fn into_program(self) -> Program {
        self.program
    }
}

/// Checks a parsed program for semantic errors.
///
/// The whole program is walked once and every error is collected; checking
/// does not stop at the first one.
///
/// # Errors
/// Returns every [`SemanticError`](crate::error::SemanticError) found, in
/// source order.
///
/// ## Example
/// ```
/// use subc::{error::SemanticErrorKind, interpreter::checker::check, parse_source};
///
/// let program = parse_source("Program p; int main() { x = 1; y = 2; }").unwrap();
/// let errors = check(program).unwrap_err();
///
/// assert_eq!(errors.len(), 2);
/// assert!(errors.kinds()
///               .all(|kind| matches!(kind, SemanticErrorKind::UnknownVariable { .. })));
/// ```
pub fn check(program: Program) -> Result<CheckedProgram, SemanticErrors> {
    let mut checker = Checker::new(&program.name);
    checker.check_program(&program);

    let (errors, xref) = checker.finish();
    tracing::debug!(errors = errors.len(), "checked program");

    if errors.is_empty() {
        Ok(CheckedProgram { program, xref })
    } else {
        Err(errors)
    }
}
