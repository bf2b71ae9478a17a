use std::io::Write;

use crate::{
    ast::{Statement, VarDecl},
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow, coerce},
        value::Value,
    },
};

impl<W: Write> Context<'_, W> {
    /// Executes a single statement.
    ///
    /// Declarations bind in the innermost scope, blocks get a scope of their
    /// own and control statements delegate to their dedicated evaluators.
    ///
    /// # Returns
    /// The control signal for the enclosing construct: [`Flow::Normal`] to
    /// carry on, [`Flow::Return`] to unwind to the call or [`Flow::Break`]
    /// to leave the nearest loop or switch.
    pub fn exec(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::VariableDeclaration(decl) => {
                self.exec_var_decl(decl)?;
                Ok(Flow::Normal)
            },
            Statement::Expression { expr, .. } => {
                self.eval(expr)?;
                Ok(Flow::Normal)
            },
            Statement::Block(block) => self.exec_scoped(&block.statements),
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                if self.eval_condition(condition)? {
                    self.exec(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Statement::While { condition, body, .. } => self.exec_while(condition, body),
            Statement::For { init,
                             condition,
                             step,
                             body,
                             .. } => self.exec_for(init.as_ref(), condition.as_ref(), step.as_ref(), body),
            Statement::Switch { scrutinee, cases, .. } => self.exec_switch(scrutinee, cases),
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(value) => self.eval(value)?,
                    None => Value::Void,
                };
                Ok(Flow::Return(value))
            },
            Statement::Break { .. } => Ok(Flow::Break),
        }
    }

    /// Executes statements in order until one of them does not finish
    /// normally.
    pub fn exec_statements(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        for statement in statements {
            let flow = self.exec(statement)?;
            if flow != Flow::Normal {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes statements inside a fresh scope, which is closed again on
    /// every exit path, errors included.
    pub fn exec_scoped(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        self.env.push_scope();
        let flow = self.exec_statements(statements);
        self.env.pop_scope();
        flow
    }

    /// Binds a declared variable in the innermost scope.
    ///
    /// Without an initializer the variable starts at its type's default:
    /// `0`, `'#'` or `"#"`.
    pub fn exec_var_decl(&mut self, decl: &VarDecl) -> EvalResult<()> {
        let value = match &decl.initializer {
            Some(initializer) => coerce(self.eval(initializer)?, decl.ty, initializer.position())?,
            None => Value::default_for(decl.ty),
        };
        self.env.define(&decl.name, decl.ty, value);
        Ok(())
    }
}
