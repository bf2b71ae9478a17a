use std::io::Write;

use crate::{
    ast::{Expr, ForInit, Statement},
    interpreter::evaluator::core::{Context, EvalResult, Flow},
};

impl<W: Write> Context<'_, W> {
    /// Evaluates a `while` loop.
    ///
    /// The condition is tested before every iteration. A `break` in the body
    /// ends the loop normally; a `return` propagates out of it.
    pub fn exec_while(&mut self, condition: &Expr, body: &Statement) -> EvalResult<Flow> {
        while self.eval_condition(condition)? {
            match self.exec(body)? {
                Flow::Normal => {},
                Flow::Break => break,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    /// Evaluates a C-style `for` loop.
    ///
    /// The loop gets its own scope, so a variable declared in the
    /// initializer is visible to the condition, step and body but not after
    /// the loop. A missing condition counts as true.
    ///
    /// # Parameters
    /// - `init`: Optional declaration or expression run once.
    /// - `condition`: Optional test run before each iteration.
    /// - `step`: Optional expression run after each iteration.
    /// - `body`: The loop body.
    pub fn exec_for(&mut self,
                    init: Option<&ForInit>,
                    condition: Option<&Expr>,
                    step: Option<&Expr>,
                    body: &Statement)
                    -> EvalResult<Flow> {
        self.env.push_scope();
        let flow = self.run_for(init, condition, step, body);
        self.env.pop_scope();
        flow
    }

    fn run_for(&mut self,
               init: Option<&ForInit>,
               condition: Option<&Expr>,
               step: Option<&Expr>,
               body: &Statement)
               -> EvalResult<Flow> {
        match init {
            Some(ForInit::Declaration(decl)) => self.exec_var_decl(decl)?,
            Some(ForInit::Expression(expr)) => {
                self.eval(expr)?;
            },
            None => {},
        }

        loop {
            if let Some(condition) = condition
               && !self.eval_condition(condition)?
            {
                break;
            }

            match self.exec(body)? {
                Flow::Normal => {},
                Flow::Break => break,
                flow @ Flow::Return(_) => return Ok(flow),
            }

            if let Some(step) = step {
                self.eval(step)?;
            }
        }

        Ok(Flow::Normal)
    }
}
