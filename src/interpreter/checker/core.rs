use std::collections::HashMap;

use crate::{
    ast::{Item, Program, Type},
    error::{SemanticError, SemanticErrorKind, SemanticErrors},
    interpreter::{
        checker::xref::{CrossReference, Routine, SymbolKind, XrefEntry},
        evaluator::function::core::is_builtin,
    },
    util::position::Position,
};

/// Index of the program's own section in the cross-reference table.
const PROGRAM_ROUTINE: usize = 0;

/// Parameter and return types of a user function.
#[derive(Debug, Clone)]
pub struct Signature {
    /// Parameter types in declaration order.
    pub params:      Vec<Type>,
    /// Declared return type.
    pub return_type: Type,
    symbol:          usize,
}

/// Facts about the function whose body is being checked.
#[derive(Debug)]
pub struct FunctionScope {
    /// The function's name.
    pub name:        String,
    /// Its declared return type.
    pub return_type: Type,
    /// Whether a reachable `return <expr>` has been seen.
    pub has_return:  bool,
}

#[derive(Debug)]
struct Symbol {
    entry:   XrefEntry,
    routine: usize,
}

/// Walks a program once, collecting semantic errors and cross-reference
/// data.
///
/// Scope 0 holds the globals. A function body gets a scope for its
/// parameters, in which its top-level statements are also declared, and
/// each nested block or `for` statement adds another.
#[derive(Debug)]
pub struct Checker {
    errors:                 Vec<SemanticError>,
    scopes:                 Vec<HashMap<String, usize>>,
    symbols:                Vec<Symbol>,
    routines:               Vec<(String, bool)>,
    current_routine:        usize,
    pub(crate) functions:   HashMap<String, Signature>,
    pub(crate) function:    Option<FunctionScope>,
    pub(crate) breakable:   usize,
}

impl Checker {
    /// Creates a checker with an empty global scope.
    #[must_use]
    pub fn new(program_name: &str) -> Self {
        Self { errors:          Vec::new(),
               scopes:          vec![HashMap::new()],
               symbols:         Vec::new(),
               routines:        vec![(program_name.to_string(), true)],
               current_routine: PROGRAM_ROUTINE,
               functions:       HashMap::new(),
               function:        None,
               breakable:       0, }
    }

    /// Checks every item of `program`.
    ///
    /// All function signatures are registered before any body is checked,
    /// so calls may refer to functions declared further down. Globals become
    /// visible from their declaration onwards.
    pub fn check_program(&mut self, program: &Program) {
        for function in program.functions() {
            if is_builtin(&function.name) {
                self.error(SemanticErrorKind::BuiltinFunctionRedefinition { name: function.name
                                                                                  .clone(), },
                           function.position);
                continue;
            }
            if self.functions.contains_key(&function.name) {
                self.error(SemanticErrorKind::FunctionAlreadyDefined { name: function.name.clone() },
                           function.position);
                continue;
            }

            let symbol = self.add_symbol(&function.name,
                                         SymbolKind::Function,
                                         function.return_type,
                                         0,
                                         function.position);
            let signature = Signature { params: function.params.iter().map(|p| p.ty).collect(),
                                        return_type: function.return_type,
                                        symbol };
            self.functions.insert(function.name.clone(), signature);
        }

        for item in &program.items {
            match item {
                Item::Global(global) => self.check_var_decl(global),
                Item::Function(function) => self.check_function(function),
            }
        }
    }

    /// Consumes the checker, returning the errors found and the
    /// cross-reference table.
    #[must_use]
    pub fn finish(self) -> (SemanticErrors, CrossReference) {
        let mut routines = self.routines
                               .into_iter()
                               .map(|(name, program)| Routine { name,
                                                                program,
                                                                entries: Vec::new() })
                               .collect::<Vec<_>>();

        for symbol in self.symbols {
            if let Some(routine) = routines.get_mut(symbol.routine) {
                routine.entries.push(symbol.entry);
            }
        }

        (SemanticErrors(self.errors), CrossReference::new(routines))
    }

    /// Records an error; checking carries on.
    pub(crate) fn error(&mut self, kind: SemanticErrorKind, position: Position) {
        self.errors.push(SemanticError::new(kind, position));
    }

    /// Starts a new section of the cross-reference table for a function's
    /// parameters and locals.
    pub(crate) fn enter_routine(&mut self, name: &str) {
        self.routines.push((name.to_string(), false));
        self.current_routine = self.routines.len() - 1;
    }

    /// Returns to the program's own section.
    pub(crate) const fn leave_routine(&mut self) {
        self.current_routine = PROGRAM_ROUTINE;
    }

    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn add_symbol(&mut self,
                  name: &str,
                  kind: SymbolKind,
                  ty: Type,
                  level: usize,
                  position: Position)
                  -> usize {
        let routine = if kind == SymbolKind::Function {
            PROGRAM_ROUTINE
        } else {
            self.current_routine
        };
        self.symbols.push(Symbol { entry: XrefEntry { name: name.to_string(),
                                                      kind,
                                                      ty,
                                                      level,
                                                      lines: vec![position.line] },
                                   routine });
        self.symbols.len() - 1
    }

    /// Declares a variable or parameter in the innermost scope.
    ///
    /// A name already declared in that same scope is a `Redeclared` error
    /// and the earlier declaration stays in effect.
    pub(crate) fn declare(&mut self, name: &str, kind: SymbolKind, ty: Type, position: Position) {
        let level = self.scopes.len() - 1;
        if self.scopes.last().is_some_and(|scope| scope.contains_key(name)) {
            self.error(SemanticErrorKind::Redeclared { name: name.to_string() }, position);
            return;
        }

        let symbol = self.add_symbol(name, kind, ty, level, position);
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), symbol);
        }
    }

    /// Looks `name` up from the innermost scope outwards and records the
    /// reference. Reports `UnknownVariable` when nothing matches.
    pub(crate) fn resolve(&mut self, name: &str, position: Position) -> Option<Type> {
        let Some(symbol) = self.scopes.iter().rev().find_map(|scope| scope.get(name)).copied()
        else {
            self.error(SemanticErrorKind::UnknownVariable { name: name.to_string() }, position);
            return None;
        };

        let entry = &mut self.symbols[symbol].entry;
        entry.lines.push(position.line);
        Some(entry.ty)
    }

    /// Looks up a user function and records the call site.
    pub(crate) fn resolve_function(&mut self, name: &str, position: Position) -> Option<Signature> {
        let signature = self.functions.get(name).cloned()?;
        self.symbols[signature.symbol].entry.lines.push(position.line);
        Some(signature)
    }
}
