use std::collections::HashMap;

use crate::{ast::Type, interpreter::value::Value};

/// A declared variable: its declared type and current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// The type from the declaration; assignments are coerced to it.
    pub ty:    Type,
    /// The current value.
    pub value: Value,
}

type Scope = HashMap<String, Slot>;

/// Runtime variable storage.
///
/// Holds the global scope and a stack of call frames. Each frame is its own
/// stack of block scopes, so a function body sees its parameters, its
/// locals and the globals, never the caller's locals.
///
/// ## Example
/// ```
/// use subc::{
///     ast::Type,
///     interpreter::{environment::Environment, value::Value},
/// };
///
/// let mut env = Environment::new();
/// env.define("g", Type::Int, Value::Int(1));
///
/// env.push_frame();
/// env.define("g", Type::Int, Value::Int(2));
/// assert_eq!(env.get("g"), Some(&Value::Int(2)));
/// env.pop_frame();
///
/// assert_eq!(env.get("g"), Some(&Value::Int(1)));
/// ```
#[derive(Debug, Default)]
pub struct Environment {
    globals: Scope,
    frames:  Vec<Vec<Scope>>,
}

impl Environment {
    /// Creates an environment with an empty global scope and no frames.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active call frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Enters a function call with a single empty scope for its parameters.
    pub fn push_frame(&mut self) {
        self.frames.push(vec![Scope::new()]);
    }

    /// Leaves the current function call, dropping all its scopes.
    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// Opens a block scope in the current frame.
    ///
    /// Does nothing outside of any frame; global declarations have a single
    /// flat scope.
    pub fn push_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push(Scope::new());
        }
    }

    /// Closes the innermost block scope of the current frame.
    pub fn pop_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.pop();
        }
    }

    /// Declares `name` in the innermost scope, hiding any outer binding.
    ///
    /// Outside of any frame the declaration goes to the globals.
    pub fn define(&mut self, name: &str, ty: Type, value: Value) {
        let slot = Slot { ty, value };
        match self.frames.last_mut().and_then(|frame| frame.last_mut()) {
            Some(scope) => scope.insert(name.to_string(), slot),
            None => self.globals.insert(name.to_string(), slot),
        };
    }

    /// Finds the nearest binding of `name`: the current frame from the
    /// innermost scope outwards, then the globals.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Slot> {
        self.frames
            .last()
            .and_then(|frame| frame.iter().rev().find_map(|scope| scope.get(name)))
            .or_else(|| self.globals.get(name))
    }

    fn lookup_mut(&mut self, name: &str) -> Option<&mut Slot> {
        if let Some(frame) = self.frames.last_mut()
           && let Some(slot) = frame.iter_mut().rev().find_map(|scope| scope.get_mut(name))
        {
            return Some(slot);
        }
        self.globals.get_mut(name)
    }

    /// The current value of `name`, if it is bound.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.lookup(name).map(|slot| &slot.value)
    }

    /// Overwrites the nearest binding of `name`.
    ///
    /// Returns the slot's declared type, or `None` if `name` is unbound. The
    /// caller is responsible for coercing `value` to that type first; see
    /// [`Environment::declared_type`].
    pub fn assign(&mut self, name: &str, value: Value) -> Option<Type> {
        let slot = self.lookup_mut(name)?;
        slot.value = value;
        Some(slot.ty)
    }

    /// Declared type of the nearest binding of `name`.
    #[must_use]
    pub fn declared_type(&self, name: &str) -> Option<Type> {
        self.lookup(name).map(|slot| slot.ty)
    }
}
