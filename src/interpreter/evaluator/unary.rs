use std::io::Write;

use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
    util::position::Position,
};

impl<W: Write> Context<'_, W> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: checked integer negation.
    /// - `Not`: `1` for zero, `0` for anything else.
    ///
    /// A `char` operand takes part as its code point; the result is always
    /// an `int`.
    ///
    /// # Errors
    /// - `Overflow` when negating the smallest `int`.
    /// - `TypeError` for string or void operands.
    ///
    /// # Example
    /// ```
    /// use subc::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::Value},
    ///     util::position::Position,
    /// };
    ///
    /// let at = Position::new(1, 1);
    ///
    /// let v = Context::<Vec<u8>>::eval_unary(UnaryOperator::Negate, &Value::Int(5), at).unwrap();
    /// assert_eq!(v, Value::Int(-5));
    ///
    /// let v = Context::<Vec<u8>>::eval_unary(UnaryOperator::Not, &Value::Int(0), at).unwrap();
    /// assert_eq!(v, Value::Int(1));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, position: Position) -> EvalResult<Value> {
        let Some(n) = value.as_integer() else {
            return Err(RuntimeError::TypeError { details: format!("operator '{op}' cannot be applied to {}",
                                                                  value.ty()),
                                                 position });
        };

        match op {
            UnaryOperator::Negate => n.checked_neg()
                                      .map(Value::Int)
                                      .ok_or(RuntimeError::Overflow { position }),
            UnaryOperator::Not => Ok(Value::from(n == 0)),
        }
    }
}
