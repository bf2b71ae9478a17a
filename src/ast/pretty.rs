use std::fmt::{self, Display, Formatter, Write};

use crate::{
    ast::{
        Block, CaseLabel, Expr, ForInit, FunctionDecl, Item, LiteralValue, Program, Statement,
        SwitchCase, VarDecl,
    },
    interpreter::lexer::{escape_char, escape_str},
};

const INDENT: &str = "    ";

/// Precedence of assignment, the loosest expression level.
const ASSIGNMENT_PRECEDENCE: u8 = 1;
/// Precedence of prefix operators.
const UNARY_PRECEDENCE: u8 = 8;
/// Precedence of literals, names, calls and parenthesized expressions.
const PRIMARY_PRECEDENCE: u8 = 9;

impl Expr {
    /// How tightly this expression binds when printed without parentheses.
    const fn precedence(&self) -> u8 {
        match self {
            Self::Assignment { .. } => ASSIGNMENT_PRECEDENCE,
            Self::BinaryOp { op, .. } => op.precedence(),
            Self::UnaryOp { .. } => UNARY_PRECEDENCE,
            Self::Literal { .. } | Self::Identifier { .. } | Self::Call { .. } => PRIMARY_PRECEDENCE,
        }
    }
}

/// Writes `expr`, parenthesized if it binds looser than `min_precedence`.
fn write_operand(f: &mut impl Write, expr: &Expr, min_precedence: u8) -> fmt::Result {
    if expr.precedence() < min_precedence {
        write!(f, "(")?;
        write_expr(f, expr)?;
        write!(f, ")")
    } else {
        write_expr(f, expr)
    }
}

fn write_expr(f: &mut impl Write, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Literal { value, .. } => write!(f, "{value}"),
        Expr::Identifier { name, .. } => write!(f, "{name}"),
        Expr::Assignment { name, value, .. } => {
            write!(f, "{name} = ")?;
            write_operand(f, value, ASSIGNMENT_PRECEDENCE)
        },
        Expr::UnaryOp { op, expr, .. } => {
            write!(f, "{op}")?;
            write_operand(f, expr, UNARY_PRECEDENCE)
        },
        Expr::BinaryOp { left, op, right, .. } => {
            // Left associative: an equal-precedence right operand needs parentheses.
            write_operand(f, left, op.precedence())?;
            write!(f, " {op} ")?;
            write_operand(f, right, op.precedence() + 1)
        },
        Expr::Call { name, arguments, .. } => {
            write!(f, "{name}(")?;
            for (index, argument) in arguments.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write_operand(f, argument, ASSIGNMENT_PRECEDENCE)?;
            }
            write!(f, ")")
        },
    }
}

fn write_indent(f: &mut impl Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn write_var_decl(f: &mut impl Write, decl: &VarDecl) -> fmt::Result {
    write!(f, "{} {}", decl.ty, decl.name)?;
    if let Some(initializer) = &decl.initializer {
        write!(f, " = {initializer}")?;
    }
    Ok(())
}

/// Writes `{`, the statements one level deeper, and the closing `}` at
/// `depth`. The caller has already placed the cursor where `{` belongs.
fn write_block(f: &mut impl Write, block: &Block, depth: usize) -> fmt::Result {
    writeln!(f, "{{")?;
    for statement in &block.statements {
        write_statement(f, statement, depth + 1)?;
    }
    write_indent(f, depth)?;
    write!(f, "}}")
}

/// Writes the body of a control statement after its header.
///
/// Blocks stay on the header line; any other statement goes on its own line
/// one level deeper. Returns whether the body was a block, which decides
/// where a following `else` goes.
fn write_body(f: &mut impl Write, body: &Statement, depth: usize) -> Result<bool, fmt::Error> {
    if let Statement::Block(block) = body {
        write!(f, " ")?;
        write_block(f, block, depth)?;
        Ok(true)
    } else {
        writeln!(f)?;
        write_statement_inline(f, body, depth + 1)?;
        Ok(false)
    }
}

/// Writes a statement starting at the current cursor, indenting nested lines
/// relative to `depth`, without a trailing newline.
fn write_statement_inline(f: &mut impl Write, statement: &Statement, depth: usize) -> fmt::Result {
    write_indent(f, depth)?;
    match statement {
        Statement::VariableDeclaration(decl) => {
            write_var_decl(f, decl)?;
            write!(f, ";")
        },
        Statement::Expression { expr, .. } => write!(f, "{expr};"),
        Statement::Block(block) => write_block(f, block, depth),
        Statement::If { condition,
                        then_branch,
                        else_branch,
                        .. } => write_if(f, condition, then_branch, else_branch.as_deref(), depth),
        Statement::While { condition, body, .. } => {
            write!(f, "while ({condition})")?;
            write_body(f, body, depth).map(|_| ())
        },
        Statement::For { init,
                         condition,
                         step,
                         body,
                         .. } => {
            write!(f, "for (")?;
            match init {
                Some(ForInit::Declaration(decl)) => write_var_decl(f, decl)?,
                Some(ForInit::Expression(expr)) => write!(f, "{expr}")?,
                None => {},
            }
            write!(f, ";")?;
            if let Some(condition) = condition {
                write!(f, " {condition}")?;
            }
            write!(f, ";")?;
            if let Some(step) = step {
                write!(f, " {step}")?;
            }
            write!(f, ")")?;
            write_body(f, body, depth).map(|_| ())
        },
        Statement::Switch { scrutinee, cases, .. } => {
            writeln!(f, "switch ({scrutinee}) {{")?;
            for case in cases {
                write_case(f, case, depth + 1)?;
            }
            write_indent(f, depth)?;
            write!(f, "}}")
        },
        Statement::Return { value: Some(value), .. } => write!(f, "return {value};"),
        Statement::Return { value: None, .. } => write!(f, "return;"),
        Statement::Break { .. } => write!(f, "break;"),
    }
}

fn write_if(f: &mut impl Write,
            condition: &Expr,
            then_branch: &Statement,
            else_branch: Option<&Statement>,
            depth: usize)
            -> fmt::Result {
    write!(f, "if ({condition})")?;
    let then_was_block = write_body(f, then_branch, depth)?;

    let Some(else_branch) = else_branch else {
        return Ok(());
    };

    if then_was_block {
        write!(f, " else")?;
    } else {
        writeln!(f)?;
        write_indent(f, depth)?;
        write!(f, "else")?;
    }

    if let Statement::If { condition,
                           then_branch,
                           else_branch,
                           .. } = else_branch
    {
        write!(f, " ")?;
        write_if(f, condition, then_branch, else_branch.as_deref(), depth)
    } else {
        write_body(f, else_branch, depth).map(|_| ())
    }
}

fn write_case(f: &mut impl Write, case: &SwitchCase, depth: usize) -> fmt::Result {
    write_indent(f, depth)?;
    match case.label {
        Some(label) => writeln!(f, "case {label}:")?,
        None => writeln!(f, "default:")?,
    }
    for statement in &case.statements {
        write_statement(f, statement, depth + 1)?;
    }
    Ok(())
}

fn write_statement(f: &mut impl Write, statement: &Statement, depth: usize) -> fmt::Result {
    write_statement_inline(f, statement, depth)?;
    writeln!(f)
}

fn write_function(f: &mut impl Write, function: &FunctionDecl) -> fmt::Result {
    write!(f, "{} {}(", function.return_type, function.name)?;
    for (index, param) in function.params.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{} {}", param.ty, param.name)?;
    }
    write!(f, ") ")?;
    write_block(f, &function.body, 0)?;
    writeln!(f)
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Char(c) => write!(f, "'{}'", escape_char(*c)),
            Self::Str(s) => write!(f, "\"{}\"", escape_str(s)),
        }
    }
}

impl Display for CaseLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Char(c) => write!(f, "'{}'", escape_char(*c)),
        }
    }
}

/// Prints with the fewest parentheses that keep the tree's shape.
///
/// ## Example
/// ```
/// use subc::parse_source;
///
/// let program = parse_source("Program p; int f() { return (1 + 2) * 3 - (4 - 5); }").unwrap();
/// let subc::ast::Item::Function(f) = &program.items[0] else { unreachable!() };
/// let subc::ast::Statement::Return { value: Some(expr), .. } = &f.body.statements[0] else {
///     unreachable!()
/// };
///
/// assert_eq!(expr.to_string(), "(1 + 2) * 3 - (4 - 5)");
/// ```
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_expr(f, self)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_statement_inline(f, self, 0)
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program {};", self.name)?;
        for item in &self.items {
            writeln!(f)?;
            match item {
                Item::Function(function) => write_function(f, function)?,
                Item::Global(global) => {
                    write_var_decl(f, global)?;
                    writeln!(f, ";")?;
                },
            }
        }
        Ok(())
    }
}
