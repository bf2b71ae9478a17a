use std::{collections::HashMap, io::Write, panic, thread};

use crate::{
    ast::{Expr, FunctionDecl, Program, Type},
    config::InterpreterConfig,
    error::RuntimeError,
    interpreter::{checker::CheckedProgram, environment::Environment, value::Value},
    util::position::Position,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished, telling its enclosing construct what to do
/// next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Continue with the next statement.
    Normal,
    /// Unwind to the current call, which yields the value.
    Return(Value),
    /// Leave the nearest loop or switch.
    Break,
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state for one run: the program's
/// functions, the variable environment, the output sink and the call depth
/// limit.
///
/// ## Usage
///
/// A `Context` is normally created by [`run`]. All evaluation methods
/// (`eval`, `exec`, `call_function`, ...) access this state to resolve
/// variables and functions and to write `print` output.
pub struct Context<'a, W: Write> {
    /// Function definitions by name. Every signature is known before any
    /// body runs, so forward and mutual recursion work.
    pub functions:      HashMap<&'a str, &'a FunctionDecl>,
    /// Globals and the call stack.
    pub env:            Environment,
    /// Where `print` writes.
    pub out:            &'a mut W,
    /// Maximum number of active user function calls.
    pub max_call_depth: usize,
}

impl<'a, W: Write> Context<'a, W> {
    /// Creates a context for `program` with an empty environment.
    #[must_use]
    pub fn new(program: &'a Program, out: &'a mut W, config: &InterpreterConfig) -> Self {
        Self { functions: program.functions()
                                 .map(|function| (function.name.as_str(), function))
                                 .collect(),
               env: Environment::new(),
               out,
               max_call_depth: config.max_call_depth }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant:
    /// literals, variables, assignments, unary and binary operations and
    /// function calls.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression; [`Value::Void`] for calls to `void`
    /// functions.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, position } => {
                self.env
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UnknownVariable { name:     name.clone(),
                                                                   position: *position, })
            },
            Expr::Assignment { name,
                               value,
                               position, } => {
                let value = self.eval(value)?;
                let ty = self.env
                             .declared_type(name)
                             .ok_or_else(|| RuntimeError::UnknownVariable { name:     name.clone(),
                                                                            position: *position, })?;
                let value = coerce(value, ty, *position)?;
                self.env.assign(name, value.clone());
                Ok(value)
            },
            Expr::UnaryOp { op, expr, position } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, &value, *position)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             position, } => self.eval_binary_op(left, *op, right, *position),
            Expr::Call { name,
                         arguments,
                         position, } => self.eval_function_call(name, arguments, *position),
        }
    }

    /// Evaluates a condition to its truth value: nonzero is true.
    pub(crate) fn eval_condition(&mut self, condition: &Expr) -> EvalResult<bool> {
        let value = self.eval(condition)?;
        value.as_integer()
             .map(|n| n != 0)
             .ok_or_else(|| RuntimeError::TypeError { details:  format!("condition must be int or char, found {}",
                                                                         value.ty()),
                                                      position: condition.position(), })
    }
}

/// Converts `value` for storage in a slot of type `ty`, widening `char` to
/// `int`.
///
/// # Errors
/// Returns `TypeError` when the value's type does not fit `ty`.
///
/// # Example
/// ```
/// use subc::{
///     ast::Type,
///     interpreter::{evaluator::core::coerce, value::Value},
///     util::position::Position,
/// };
///
/// let at = Position::new(1, 1);
/// assert_eq!(coerce(Value::Char(b'A'), Type::Int, at).unwrap(), Value::Int(65));
/// assert!(coerce(Value::String("x".into()), Type::Int, at).is_err());
/// ```
pub fn coerce(value: Value, ty: Type, position: Position) -> EvalResult<Value> {
    let found = value.ty();
    value.coerce_to(ty)
         .ok_or_else(|| RuntimeError::TypeError { details: format!("expected {ty}, found {found}"),
                                                  position })
}

/// Executes a checked program.
///
/// The program runs on its own thread whose stack is sized by
/// [`InterpreterConfig::evaluator_stack_size`], so a program recursing past
/// `max_call_depth` gets a `StackOverflow` error on any calling thread.
/// Globals are initialized in source order, then `main` is called with no
/// arguments. `print` output goes to `out`, which is flushed once the run
/// ends successfully.
///
/// # Errors
/// - `MissingMain` if the program declares no `main` function.
/// - `InvalidMain` if `main` takes parameters.
/// - `EvaluatorThread` if the evaluator thread cannot be spawned.
/// - Any runtime error raised while executing the program.
///
/// ## Example
/// ```
/// use subc::{
///     check_source,
///     config::InterpreterConfig,
///     interpreter::evaluator::core::run,
/// };
///
/// let checked = check_source("Program p; int main() { print(\"%d\", 6 * 7); }").unwrap();
/// let mut out = Vec::new();
/// run(&checked, &mut out, &InterpreterConfig::default()).unwrap();
///
/// assert_eq!(out, b"42");
/// ```
pub fn run<W: Write + Send>(checked: &CheckedProgram,
                            out: &mut W,
                            config: &InterpreterConfig)
                            -> EvalResult<()> {
    let stack_size = config.evaluator_stack_size();

    thread::scope(|scope| -> EvalResult<()> {
        let evaluator = thread::Builder::new().name("evaluator".to_string())
                                              .stack_size(stack_size)
                                              .spawn_scoped(scope, move || execute(checked, out, config))
                                              .map_err(|error| RuntimeError::EvaluatorThread { stack_size,
                                                                                               message: error.to_string() })?;

        evaluator.join()
                 .unwrap_or_else(|payload| panic::resume_unwind(payload))
    })
}

/// Initializes globals and calls `main` on the current thread.
fn execute<W: Write>(checked: &CheckedProgram,
                     out: &mut W,
                     config: &InterpreterConfig)
                     -> EvalResult<()> {
    let program = checked.program();
    let mut context = Context::new(program, out, config);

    for global in program.globals() {
        context.exec_var_decl(global)?;
    }

    let main = program.function("main")
                      .ok_or_else(|| RuntimeError::MissingMain { program: program.name.clone() })?;
    if !main.params.is_empty() {
        return Err(RuntimeError::InvalidMain { position: main.position });
    }

    let result = context.call_function(main, Vec::new(), main.position)?;
    tracing::debug!(%result, "main returned");

    context.out
           .flush()
           .map_err(|error| RuntimeError::Output { message:  error.to_string(),
                                                   position: main.position, })
}
