/// Binary operator evaluation logic.
///
/// Checked integer arithmetic, comparisons and the short-circuiting logical
/// operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, the program entry point, expression
/// dispatch and value coercion.
pub mod core;

/// Statement execution.
///
/// Declarations, blocks, `if`, `return` and `break`, and the control signal
/// statements hand back to their enclosing construct.
pub mod statement;

/// Evaluation of `while` and `for` loops.
pub mod loops;

/// Evaluation of `switch` statements, including fallthrough between case
/// groups.
pub mod switch;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, call depth limits and
/// return value handling.
pub mod function;
