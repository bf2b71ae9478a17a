use std::io::Write;

use crate::{
    ast::{Expr, FunctionDecl, Type},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow, coerce},
            function::print,
        },
        value::Value,
    },
    util::position::Position,
};

/// Name of the `print` builtin.
pub const PRINT: &str = "print";

/// Names of the functions every program can call without declaring them.
/// User functions may not reuse these names.
pub const BUILTIN_FUNCTIONS: &[&str] = &[PRINT];

/// Whether `name` is a built-in function.
///
/// ## Example
/// ```
/// use subc::interpreter::evaluator::function::core::is_builtin;
///
/// assert!(is_builtin("print"));
/// assert!(!is_builtin("main"));
/// ```
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

impl<W: Write> Context<'_, W> {
    /// Evaluates a call expression.
    ///
    /// Arguments are evaluated left to right. `print` goes straight to the
    /// builtin; anything else is a user-defined function.
    ///
    /// # Errors
    /// - `UnknownFunction` if no function has this name.
    /// - `ArgumentCountMismatch` on an arity mismatch.
    /// - Any error raised while evaluating the arguments or the body.
    pub fn eval_function_call(&mut self,
                              name: &str,
                              arguments: &[Expr],
                              position: Position)
                              -> EvalResult<Value> {
        let arg_vals = arguments.iter()
                                .map(|argument| self.eval(argument))
                                .collect::<EvalResult<Vec<_>>>()?;

        if name == PRINT {
            return print::print(&arg_vals, &mut *self.out, position);
        }

        let function =
            self.functions
                .get(name)
                .copied()
                .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                               position })?;

        self.call_function(function, arg_vals, position)
    }

    /// Executes a user-defined function.
    ///
    /// A new call frame is pushed whose first scope holds the parameters,
    /// each coerced to its declared type. The body's top-level declarations
    /// share that scope. The frame is popped on every exit path.
    ///
    /// # Parameters
    /// - `function`: The function to run.
    /// - `arg_vals`: Evaluated arguments in parameter order.
    /// - `position`: The call site, for error reporting.
    ///
    /// # Returns
    /// The value of the first `return` executed, coerced to the return type;
    /// [`Value::Void`] when a `void` function finishes its body.
    ///
    /// # Errors
    /// - `StackOverflow` if the call would exceed the maximum call depth.
    /// - `ArgumentCountMismatch` on an arity mismatch.
    /// - `MissingReturnValue` if a value-returning function other than
    ///   `main` finishes its body without returning.
    pub fn call_function(&mut self,
                         function: &FunctionDecl,
                         arg_vals: Vec<Value>,
                         position: Position)
                         -> EvalResult<Value> {
        if self.env.depth() >= self.max_call_depth {
            return Err(RuntimeError::StackOverflow { limit: self.max_call_depth,
                                                     position });
        }
        if arg_vals.len() != function.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: function.name.clone(),
                                                             expected: function.params.len(),
                                                             found: arg_vals.len(),
                                                             position });
        }

        let mut bound = Vec::with_capacity(arg_vals.len());
        for (param, value) in function.params.iter().zip(arg_vals) {
            bound.push(coerce(value, param.ty, position)?);
        }

        self.env.push_frame();
        tracing::trace!(function = %function.name, depth = self.env.depth(), "call");
        for (param, value) in function.params.iter().zip(bound) {
            self.env.define(&param.name, param.ty, value);
        }

        let flow = self.exec_statements(&function.body.statements);
        self.env.pop_frame();

        match flow? {
            Flow::Return(_) if function.return_type == Type::Void => Ok(Value::Void),
            Flow::Return(value) => coerce(value, function.return_type, position),
            Flow::Normal | Flow::Break => match function.return_type {
                Type::Void => Ok(Value::Void),
                ty if function.name == "main" => Ok(Value::default_for(ty)),
                _ => Err(RuntimeError::MissingReturnValue { name:     function.name.clone(),
                                                            position: function.position, }),
            },
        }
    }
}
