use std::io::Write;

use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
    util::position::Position,
};

impl<W: Write> Context<'_, W> {
    /// Evaluates a binary operation node.
    ///
    /// `&&` and `||` evaluate their right operand only when the left one
    /// does not already decide the result. Every other operator evaluates
    /// both operands, left first, and hands them to [`Self::eval_binary`].
    ///
    /// # Parameters
    /// - `left`: Left-hand side expression.
    /// - `op`: Binary operator.
    /// - `right`: Right-hand side expression.
    /// - `position`: Position of the operator for error reporting.
    pub fn eval_binary_op(&mut self,
                          left: &Expr,
                          op: BinaryOperator,
                          right: &Expr,
                          position: Position)
                          -> EvalResult<Value> {
        match op {
            BinaryOperator::And => {
                if !self.eval_condition(left)? {
                    return Ok(Value::Int(0));
                }
                Ok(Value::from(self.eval_condition(right)?))
            },
            BinaryOperator::Or => {
                if self.eval_condition(left)? {
                    return Ok(Value::Int(1));
                }
                Ok(Value::from(self.eval_condition(right)?))
            },
            _ => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                Self::eval_binary(op, &lhs, &rhs, position)
            },
        }
    }

    /// Applies a non-short-circuiting binary operator to two values.
    ///
    /// Both operands must be `int` or `char`; a `char` takes part as its
    /// code point. Arithmetic is checked 64-bit signed with truncating
    /// division, and comparisons yield `1` or `0`.
    ///
    /// # Errors
    /// - `DivisionByZero` for `/` or `%` with a zero divisor.
    /// - `Overflow` when the result does not fit in 64 bits.
    /// - `TypeError` for string or void operands.
    ///
    /// # Example
    /// ```
    /// use subc::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::Value},
    ///     util::position::Position,
    /// };
    ///
    /// let at = Position::new(1, 1);
    /// let v = Context::<Vec<u8>>::eval_binary(BinaryOperator::Div,
    ///                                         &Value::Int(-7),
    ///                                         &Value::Int(2),
    ///                                         at).unwrap();
    /// assert_eq!(v, Value::Int(-3));
    ///
    /// let v = Context::<Vec<u8>>::eval_binary(BinaryOperator::Less,
    ///                                         &Value::Char(b'a'),
    ///                                         &Value::Char(b'b'),
    ///                                         at).unwrap();
    /// assert_eq!(v, Value::Int(1));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       lhs: &Value,
                       rhs: &Value,
                       position: Position)
                       -> EvalResult<Value> {
        let (Some(a), Some(b)) = (lhs.as_integer(), rhs.as_integer()) else {
            return Err(RuntimeError::TypeError { details: format!("operator '{op}' cannot be applied to {} and {}",
                                                                  lhs.ty(),
                                                                  rhs.ty()),
                                                 position });
        };

        let overflow = || RuntimeError::Overflow { position };
        match op {
            BinaryOperator::Add => a.checked_add(b).map(Value::Int).ok_or_else(overflow),
            BinaryOperator::Sub => a.checked_sub(b).map(Value::Int).ok_or_else(overflow),
            BinaryOperator::Mul => a.checked_mul(b).map(Value::Int).ok_or_else(overflow),
            BinaryOperator::Div | BinaryOperator::Mod if b == 0 => {
                Err(RuntimeError::DivisionByZero { position })
            },
            BinaryOperator::Div => a.checked_div(b).map(Value::Int).ok_or_else(overflow),
            BinaryOperator::Mod => a.checked_rem(b).map(Value::Int).ok_or_else(overflow),
            BinaryOperator::Less => Ok(Value::from(a < b)),
            BinaryOperator::Greater => Ok(Value::from(a > b)),
            BinaryOperator::LessEqual => Ok(Value::from(a <= b)),
            BinaryOperator::GreaterEqual => Ok(Value::from(a >= b)),
            BinaryOperator::Equal => Ok(Value::from(a == b)),
            BinaryOperator::NotEqual => Ok(Value::from(a != b)),
            BinaryOperator::And => Ok(Value::from(a != 0 && b != 0)),
            BinaryOperator::Or => Ok(Value::from(a != 0 || b != 0)),
        }
    }
}
