use crate::{
    ast::{BinaryOperator, Expr, Type},
    error::SemanticErrorKind,
    interpreter::{checker::core::Checker, evaluator::function::core::PRINT},
    util::position::Position,
};

impl Checker {
    /// Computes the static type of an expression, reporting any errors in
    /// it.
    ///
    /// `None` means the type could not be determined because of an error
    /// already reported; callers skip their own checks on `None` so one
    /// mistake yields one error. A call to a `void` function has type
    /// [`Type::Void`], which only an expression statement may discard.
    pub(crate) fn check_expr(&mut self, expr: &Expr) -> Option<Type> {
        match expr {
            Expr::Literal { value, .. } => Some(value.ty()),
            Expr::Identifier { name, position } => self.resolve(name, *position),
            Expr::Assignment { name,
                               value,
                               position, } => {
                let found = self.check_value(value);
                let expected = self.resolve(name, *position)?;
                if let Some(found) = found
                   && !expected.accepts(found)
                {
                    self.error(SemanticErrorKind::TypeMismatch { expected, found },
                               value.position());
                }
                Some(expected)
            },
            Expr::UnaryOp { op, expr, .. } => {
                let operand = self.check_value(expr);
                self.require_integral(&op.to_string(), operand, expr);
                Some(Type::Int)
            },
            Expr::BinaryOp { left, op, right, .. } => self.check_binary(left, *op, right),
            Expr::Call { name,
                         arguments,
                         position, } => self.check_call(name, arguments, *position),
        }
    }

    /// Like [`Checker::check_expr`], for places that need a value: the
    /// result of a `void` call is rejected there.
    pub(crate) fn check_value(&mut self, expr: &Expr) -> Option<Type> {
        let ty = self.check_expr(expr)?;
        if ty == Type::Void {
            let name = match expr {
                Expr::Call { name, .. } => name.clone(),
                _ => expr.to_string(),
            };
            self.error(SemanticErrorKind::VoidValue { name }, expr.position());
            return None;
        }
        Some(ty)
    }

    /// Checks an `if`, `while` or `for` condition, which must be `int` or
    /// `char`.
    pub(crate) fn check_condition(&mut self, condition: &Expr) {
        if let Some(found) = self.check_value(condition)
           && !found.is_integral()
        {
            self.error(SemanticErrorKind::InvalidCondition { found }, condition.position());
        }
    }

    fn require_integral(&mut self, operator: &str, operand: Option<Type>, expr: &Expr) {
        if let Some(operand) = operand
           && !operand.is_integral()
        {
            self.error(SemanticErrorKind::InvalidOperand { operator: operator.to_string(),
                                                           operand },
                       expr.position());
        }
    }

    /// Every binary operator takes `int` or `char` operands (a `char` widens
    /// to `int`) and produces an `int`. Strings support none of them,
    /// comparisons included.
    fn check_binary(&mut self, left: &Expr, op: BinaryOperator, right: &Expr) -> Option<Type> {
        let left_type = self.check_value(left);
        let right_type = self.check_value(right);

        let operator = op.to_string();
        self.require_integral(&operator, left_type, left);
        self.require_integral(&operator, right_type, right);

        Some(Type::Int)
    }

    /// Checks a call to `print` or to a user function.
    ///
    /// Arguments are checked even when the callee is unknown, so errors
    /// inside them are still reported.
    fn check_call(&mut self,
                  name: &str,
                  arguments: &[Expr],
                  position: Position)
                  -> Option<Type> {
        if name == PRINT {
            return self.check_print(arguments, position);
        }

        let found_types = arguments.iter()
                                   .map(|argument| self.check_value(argument))
                                   .collect::<Vec<_>>();

        let Some(signature) = self.resolve_function(name, position) else {
            self.error(SemanticErrorKind::UnknownFunction { name: name.to_string() }, position);
            return None;
        };

        if signature.params.len() != arguments.len() {
            self.error(SemanticErrorKind::ArgumentCountMismatch { name:     name.to_string(),
                                                                  expected: signature.params
                                                                                     .len(),
                                                                  found:    arguments.len(), },
                       position);
        } else {
            for ((argument, found), expected) in
                arguments.iter().zip(found_types).zip(&signature.params)
            {
                if let Some(found) = found
                   && !expected.accepts(found)
                {
                    self.error(SemanticErrorKind::TypeMismatch { expected: *expected,
                                                                 found },
                               argument.position());
                }
            }
        }

        Some(signature.return_type)
    }

    /// `print` takes a `string` format followed by any number of values.
    /// Matching verbs to arguments happens when the format is scanned at
    /// run time.
    fn check_print(&mut self,
                   arguments: &[Expr],
                   position: Position)
                   -> Option<Type> {
        let Some((format, rest)) = arguments.split_first() else {
            self.error(SemanticErrorKind::MissingFormatString, position);
            return Some(Type::Void);
        };

        if let Some(found) = self.check_value(format)
           && found != Type::String
        {
            self.error(SemanticErrorKind::TypeMismatch { expected: Type::String,
                                                         found },
                       format.position());
        }
        for argument in rest {
            self.check_value(argument);
        }

        Some(Type::Void)
    }
}

