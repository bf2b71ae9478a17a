use std::io::Write;

use crate::{
    ast::{CaseLabel, Expr, SwitchCase},
    error::RuntimeError,
    interpreter::evaluator::core::{Context, EvalResult, Flow},
};

impl<W: Write> Context<'_, W> {
    /// Evaluates a `switch` statement.
    ///
    /// The case groups are scanned in order for the first label equal to the
    /// scrutinee; without a match execution starts at `default`, wherever it
    /// is placed, and without a `default` nothing runs. From the starting
    /// group, statements run on through the following groups until a
    /// `break`, a `return` or the end of the switch.
    ///
    /// # Errors
    /// Returns `TypeError` if the scrutinee is not an `int` or `char`.
    pub fn exec_switch(&mut self, scrutinee: &Expr, cases: &[SwitchCase]) -> EvalResult<Flow> {
        let value = self.eval(scrutinee)?;
        let key = value.as_integer()
                       .ok_or_else(|| RuntimeError::TypeError { details:  format!("switch on {}",
                                                                                  value.ty()),
                                                                position: scrutinee.position(), })?;

        let start = cases.iter()
                         .position(|case| case.label.is_some_and(|label| label_value(label) == key))
                         .or_else(|| cases.iter().position(|case| case.label.is_none()));

        let Some(start) = start else {
            return Ok(Flow::Normal);
        };

        for case in &cases[start..] {
            match self.exec_statements(&case.statements)? {
                Flow::Normal => {},
                Flow::Break => break,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }

        Ok(Flow::Normal)
    }
}

fn label_value(label: CaseLabel) -> i64 {
    match label {
        CaseLabel::Integer(n) => n,
        CaseLabel::Char(c) => i64::from(c),
    }
}
