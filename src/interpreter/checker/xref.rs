use std::fmt::{self, Display, Formatter};

use crate::ast::Type;

const NAME_WIDTH: usize = 16;
const NUMBERS_LABEL: &str = " Line numbers    ";
const NUMBERS_UNDERLINE: &str = " ------------    ";

/// What a cross-referenced identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// A global or local variable.
    Variable,
    /// A function parameter.
    Parameter,
    /// A user-defined function.
    Function,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Variable => "variable",
            Self::Parameter => "parameter",
            Self::Function => "function",
        };
        write!(f, "{name}")
    }
}

/// One declared identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrefEntry {
    /// The identifier.
    pub name:  String,
    /// What it names.
    pub kind:  SymbolKind,
    /// Declared type; the return type for functions.
    pub ty:    Type,
    /// Scope nesting level: 0 for globals and functions, 1 for parameters
    /// and each enclosing block adds one.
    pub level: usize,
    /// The declaration line followed by every line that refers to it.
    pub lines: Vec<usize>,
}

/// The entries declared directly in the program or in one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routine {
    /// The program or function name.
    pub name:    String,
    /// `true` for the program's own table of globals and functions.
    pub program: bool,
    /// Entries sorted by name, then by declaration line.
    pub entries: Vec<XrefEntry>,
}

/// The cross-reference table of a checked program.
///
/// Printing it produces the listing shown by `--xref`: one section for the
/// program's globals and functions, then one per function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReference {
    routines: Vec<Routine>,
}

impl CrossReference {
    pub(crate) fn new(mut routines: Vec<Routine>) -> Self {
        for routine in &mut routines {
            routine.entries.sort_by(|a, b| {
                               a.name
                                .cmp(&b.name)
                                .then_with(|| a.lines.first().cmp(&b.lines.first()))
                           });
        }
        Self { routines }
    }

    /// All sections, the program first.
    #[must_use]
    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }

    /// Finds the first entry named `name` in the section for `routine`.
    #[must_use]
    pub fn lookup(&self, routine: &str, name: &str) -> Option<&XrefEntry> {
        self.routines
            .iter()
            .find(|r| r.name == routine)
            .and_then(|r| r.entries.iter().find(|entry| entry.name == name))
    }
}

fn write_headings(f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{:<NAME_WIDTH$}{NUMBERS_LABEL}Type specification", "Identifier")?;
    writeln!(f, "{:<NAME_WIDTH$}{NUMBERS_UNDERLINE}------------------", "----------")
}

fn write_entry(f: &mut Formatter<'_>, entry: &XrefEntry) -> fmt::Result {
    let indent = " ".repeat(NAME_WIDTH + NUMBERS_LABEL.len());

    write!(f, "{:<NAME_WIDTH$}", entry.name)?;
    for line in &entry.lines {
        write!(f, " {line:03}")?;
    }
    writeln!(f)?;
    writeln!(f, "{indent}Kind: {}", entry.kind)?;
    writeln!(f, "{indent}Scope nesting level: {}", entry.level)?;
    writeln!(f, "{indent}Type: {}", entry.ty)
}

impl Display for CrossReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== CROSS-REFERENCE TABLE =====")?;
        for routine in &self.routines {
            let label = if routine.program { "PROGRAM" } else { "FUNCTION" };
            writeln!(f)?;
            writeln!(f, "*** {label} {} ***", routine.name)?;
            write_headings(f)?;
            for entry in &routine.entries {
                write_entry(f, entry)?;
            }
        }
        Ok(())
    }
}
