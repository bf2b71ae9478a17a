use std::collections::HashSet;

use crate::{
    ast::{Block, CaseLabel, Expr, ForInit, FunctionDecl, Statement, SwitchCase, Type, VarDecl},
    error::SemanticErrorKind,
    interpreter::checker::{
        core::{Checker, FunctionScope},
        xref::SymbolKind,
    },
    util::position::Position,
};

/// How control leaves a statement, as far as the checker can tell without
/// evaluating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Control may continue with the next statement.
    Continues,
    /// Every path ends in a `return`.
    Returns,
    /// Control leaves through a `break`.
    Breaks,
}

impl Checker {
    /// Checks one function: its parameters, its body and, for value
    /// returning functions other than `main`, that a reachable
    /// `return <expr>` exists.
    pub(crate) fn check_function(&mut self, function: &FunctionDecl) {
        self.enter_routine(&function.name);
        self.push_scope();

        for param in &function.params {
            if param.ty == Type::Void {
                self.error(SemanticErrorKind::VoidVariable { name: param.name.clone() },
                           param.position);
            }
            self.declare(&param.name, SymbolKind::Parameter, param.ty, param.position);
        }

        self.function = Some(FunctionScope { name:        function.name.clone(),
                                             return_type: function.return_type,
                                             has_return:  false, });
        self.check_statements(&function.body.statements, true);

        if let Some(scope) = self.function.take()
           && scope.return_type != Type::Void
           && scope.name != "main"
           && !scope.has_return
        {
            self.error(SemanticErrorKind::MissingReturn { name:        scope.name,
                                                          return_type: scope.return_type, },
                       function.position);
        }

        self.pop_scope();
        self.leave_routine();
    }

    /// Checks a declaration and brings its name into scope.
    ///
    /// The initializer is checked first, so it cannot refer to the variable
    /// being declared.
    pub(crate) fn check_var_decl(&mut self, decl: &VarDecl) {
        if decl.ty == Type::Void {
            self.error(SemanticErrorKind::VoidVariable { name: decl.name.clone() },
                       decl.position);
        }

        if let Some(initializer) = &decl.initializer
           && let Some(found) = self.check_value(initializer)
           && decl.ty != Type::Void
           && !decl.ty.accepts(found)
        {
            self.error(SemanticErrorKind::TypeMismatch { expected: decl.ty,
                                                         found },
                       initializer.position());
        }

        self.declare(&decl.name, SymbolKind::Variable, decl.ty, decl.position);
    }

    /// Checks a statement list in order.
    ///
    /// Once a statement cannot complete normally, the ones after it are
    /// still checked but are unreachable, so their returns do not count.
    ///
    /// # Returns
    /// How control leaves the list.
    pub(crate) fn check_statements(&mut self, statements: &[Statement], reachable: bool) -> Exit {
        let mut exit = Exit::Continues;
        for statement in statements {
            let live = reachable && exit == Exit::Continues;
            let statement_exit = self.check_statement(statement, live);
            if exit == Exit::Continues {
                exit = statement_exit;
            }
        }
        exit
    }

    fn check_block(&mut self, block: &Block, reachable: bool) -> Exit {
        self.push_scope();
        let exit = self.check_statements(&block.statements, reachable);
        self.pop_scope();
        exit
    }

    /// Checks a single statement.
    ///
    /// # Parameters
    /// - `statement`: The statement to check.
    /// - `reachable`: Whether control can reach it.
    pub(crate) fn check_statement(&mut self, statement: &Statement, reachable: bool) -> Exit {
        match statement {
            Statement::VariableDeclaration(decl) => {
                self.check_var_decl(decl);
                Exit::Continues
            },
            Statement::Expression { expr, .. } => {
                self.check_expr(expr);
                Exit::Continues
            },
            Statement::Block(block) => self.check_block(block, reachable),
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                self.check_condition(condition);
                let then_exit = self.check_statement(then_branch, reachable);
                match else_branch {
                    Some(else_branch) => {
                        let else_exit = self.check_statement(else_branch, reachable);
                        if then_exit == Exit::Returns && else_exit == Exit::Returns {
                            Exit::Returns
                        } else {
                            Exit::Continues
                        }
                    },
                    None => Exit::Continues,
                }
            },
            Statement::While { condition, body, .. } => {
                self.check_condition(condition);
                self.check_loop_body(body, reachable);
                Exit::Continues
            },
            Statement::For { init,
                             condition,
                             step,
                             body,
                             .. } => {
                self.push_scope();
                match init {
                    Some(ForInit::Declaration(decl)) => self.check_var_decl(decl),
                    Some(ForInit::Expression(expr)) => {
                        self.check_expr(expr);
                    },
                    None => {},
                }
                if let Some(condition) = condition {
                    self.check_condition(condition);
                }
                if let Some(step) = step {
                    self.check_expr(step);
                }
                self.check_loop_body(body, reachable);
                self.pop_scope();
                Exit::Continues
            },
            Statement::Switch { scrutinee, cases, .. } => {
                self.check_switch(scrutinee, cases, reachable);
                Exit::Continues
            },
            Statement::Return { value, position } => {
                self.check_return(value.as_ref(), *position, reachable);
                Exit::Returns
            },
            Statement::Break { position } => {
                if self.breakable == 0 {
                    self.error(SemanticErrorKind::BreakOutsideLoop, *position);
                }
                Exit::Breaks
            },
        }
    }

    fn check_loop_body(&mut self, body: &Statement, reachable: bool) {
        self.breakable += 1;
        self.check_statement(body, reachable);
        self.breakable -= 1;
    }

    /// Checks a `return` against the enclosing function's return type.
    fn check_return(&mut self,
                    value: Option<&Expr>,
                    position: Position,
                    reachable: bool) {
        let found = value.map(|value| (value.position(), self.check_value(value)));

        let Some(function) = &self.function else {
            return;
        };
        let name = function.name.clone();
        let return_type = function.return_type;

        match (return_type, found) {
            (Type::Void, Some(_)) => {
                self.error(SemanticErrorKind::UnexpectedReturnValue { name }, position);
            },
            (Type::Void, None) => {},
            (expected, None) => {
                self.error(SemanticErrorKind::MissingReturnValue { name, expected }, position);
            },
            (expected, Some((value_position, found))) => {
                if reachable && let Some(function) = &mut self.function {
                    function.has_return = true;
                }
                if let Some(found) = found
                   && !expected.accepts(found)
                {
                    self.error(SemanticErrorKind::TypeMismatch { expected, found },
                               value_position);
                }
            },
        }
    }

    /// Checks a `switch`: an `int` or `char` scrutinee, labels of the same
    /// type, no repeated labels and at most one `default`.
    fn check_switch(&mut self,
                    scrutinee: &Expr,
                    cases: &[SwitchCase],
                    reachable: bool) {
        let scrutinee_type = self.check_value(scrutinee);
        if let Some(found) = scrutinee_type
           && !found.is_integral()
        {
            self.error(SemanticErrorKind::InvalidSwitchType { found }, scrutinee.position());
        }

        let mut seen = HashSet::<CaseLabel>::new();
        let mut has_default = false;
        for case in cases {
            match case.label {
                Some(label) => {
                    if let Some(expected) = scrutinee_type
                       && expected.is_integral()
                       && label.ty() != expected
                    {
                        self.error(SemanticErrorKind::TypeMismatch { expected,
                                                                     found: label.ty() },
                                   case.position);
                    }
                    if !seen.insert(label) {
                        self.error(SemanticErrorKind::DuplicateCase { label: label.to_string() },
                                   case.position);
                    }
                },
                None if has_default => {
                    self.error(SemanticErrorKind::DuplicateDefault, case.position);
                },
                None => has_default = true,
            }
        }

        // Every label is an entry point, so each group starts reachable.
        self.breakable += 1;
        for case in cases {
            self.check_statements(&case.statements, reachable);
        }
        self.breakable -= 1;
    }
}
