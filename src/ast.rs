use crate::util::position::Position;

/// Renders AST nodes back to canonical source text.
///
/// The output re-parses to a structurally identical tree, which is what the
/// `--dump-ast` flag shows and what the round-trip tests rely on.
pub mod pretty;

/// The closed set of types in the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// 64-bit signed integer (`int`).
    Int,
    /// Single ASCII character (`char`).
    Char,
    /// Owned text (`string`).
    String,
    /// No value (`void`); only valid as a return type.
    Void,
}

impl Type {
    /// Whether a value of type `found` may be stored where `self` is
    /// expected.
    ///
    /// Types are compatible with themselves, and `char` widens to `int`.
    /// Nothing narrows implicitly.
    ///
    /// ## Example
    /// ```
    /// use subc::ast::Type;
    ///
    /// assert!(Type::Int.accepts(Type::Char));
    /// assert!(!Type::Char.accepts(Type::Int));
    /// assert!(!Type::String.accepts(Type::Int));
    /// ```
    #[must_use]
    pub fn accepts(self, found: Self) -> bool {
        self == found || (self == Self::Int && found == Self::Char)
    }

    /// Whether the type takes part in arithmetic and comparisons.
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Int | Self::Char)
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Char => "char",
            Self::String => "string",
            Self::Void => "void",
        };
        write!(f, "{name}")
    }
}

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code: integers, character literals and string literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A character literal, stored as its ASCII code.
    Char(u8),
    /// A string literal with escapes already decoded.
    Str(String),
}

impl LiteralValue {
    /// The static type of the literal.
    #[must_use]
    pub const fn ty(&self) -> Type {
        match self {
            Self::Integer(_) => Type::Int,
            Self::Char(_) => Type::Char,
            Self::Str(_) => Type::String,
        }
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Each variant carries the position of the token that introduced it; for
/// operators that is the operator token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value:    LiteralValue,
        /// Source position.
        position: Position,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name:     String,
        /// Source position.
        position: Position,
    },
    /// Assignment to a variable; evaluates to the assigned value.
    Assignment {
        /// The variable being assigned.
        name:     String,
        /// The new value.
        value:    Box<Self>,
        /// Position of the `=`.
        position: Position,
    },
    /// A unary operation.
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Source position.
        position: Position,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator.
        position: Position,
    },
    /// Function call expression (e.g. `max(1, 2, 3)`).
    Call {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function, in call order.
        arguments: Vec<Self>,
        /// Position of the function name.
        position:  Position,
    },
}

impl Expr {
    /// Gets the position from `self`.
    /// ## Example
    /// ```
    /// use subc::{ast::Expr, util::position::Position};
    ///
    /// let expr = Expr::Identifier { name:     "x".to_string(),
    ///                               position: Position::new(5, 2), };
    ///
    /// assert_eq!(expr.position().line, 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Literal { position, .. }
            | Self::Identifier { position, .. }
            | Self::Assignment { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::Call { position, .. } => *position,
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons and the short-circuiting
/// logical operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

impl BinaryOperator {
    /// Binding strength, higher binds tighter.
    ///
    /// Assignment is 1 and unary operators are 8; binary operators sit
    /// between them.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 2,
            Self::And => 3,
            Self::Equal | Self::NotEqual => 4,
            Self::Less | Self::Greater | Self::LessEqual | Self::GreaterEqual => 5,
            Self::Add | Self::Sub => 6,
            Self::Mul | Self::Div | Self::Mod => 7,
        }
    }

    /// Whether the operator compares its operands.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::Equal
                 | Self::NotEqual)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

/// A variable declaration, `type name [= initializer];`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    /// Declared type.
    pub ty:          Type,
    /// Variable name.
    pub name:        String,
    /// Optional initial value; without one the type's default is used.
    pub initializer: Option<Expr>,
    /// Position of the type keyword.
    pub position:    Position,
}

/// A brace-delimited statement list with its own scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Statements inside the block.
    pub statements: Vec<Statement>,
    /// Position of the opening brace.
    pub position:   Position,
}

/// The first clause of a `for` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForInit {
    /// `for (int i = 0; ...)`, scoped to the loop.
    Declaration(VarDecl),
    /// `for (i = 0; ...)`
    Expression(Expr),
}

/// A constant after `case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseLabel {
    /// An integer constant, possibly negated.
    Integer(i64),
    /// A character constant.
    Char(u8),
}

impl CaseLabel {
    /// The static type of the label.
    #[must_use]
    pub const fn ty(self) -> Type {
        match self {
            Self::Integer(_) => Type::Int,
            Self::Char(_) => Type::Char,
        }
    }
}

/// One `case L:` or `default:` group and the statements after it.
///
/// Groups are kept in source order; fallthrough runs from the matching group
/// into the ones after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchCase {
    /// The label, or `None` for `default`.
    pub label:      Option<CaseLabel>,
    /// Statements up to the next label.
    pub statements: Vec<Statement>,
    /// Position of the `case` or `default` keyword.
    pub position:   Position,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A local variable declaration.
    VariableDeclaration(VarDecl),
    /// An expression evaluated for its side effects.
    Expression {
        /// The expression to evaluate.
        expr:     Expr,
        /// Source position.
        position: Position,
    },
    /// A nested block.
    Block(Block),
    /// `if (condition) then_branch [else else_branch]`
    If {
        /// The condition expression.
        condition:   Expr,
        /// Statement run when the condition is non-zero.
        then_branch: Box<Self>,
        /// Statement run otherwise.
        else_branch: Option<Box<Self>>,
        /// Position of the `if` keyword.
        position:    Position,
    },
    /// `while (condition) body`
    While {
        /// The loop condition.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
        /// Position of the `while` keyword.
        position:  Position,
    },
    /// `for (init; condition; step) body`
    For {
        /// Optional initializer clause.
        init:      Option<ForInit>,
        /// Optional condition; absent means always true.
        condition: Option<Expr>,
        /// Optional step expression.
        step:      Option<Expr>,
        /// The loop body.
        body:      Box<Self>,
        /// Position of the `for` keyword.
        position:  Position,
    },
    /// `switch (scrutinee) { case ...: ... default: ... }`
    Switch {
        /// The value being matched.
        scrutinee: Expr,
        /// Case groups in source order.
        cases:     Vec<SwitchCase>,
        /// Position of the `switch` keyword.
        position:  Position,
    },
    /// `return [value];`
    Return {
        /// The returned value, if any.
        value:    Option<Expr>,
        /// Position of the `return` keyword.
        position: Position,
    },
    /// `break;`
    Break {
        /// Position of the `break` keyword.
        position: Position,
    },
}

impl Statement {
    /// Gets the position from `self`.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::VariableDeclaration(VarDecl { position, .. })
            | Self::Block(Block { position, .. })
            | Self::Expression { position, .. }
            | Self::If { position, .. }
            | Self::While { position, .. }
            | Self::For { position, .. }
            | Self::Switch { position, .. }
            | Self::Return { position, .. }
            | Self::Break { position } => *position,
        }
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name.
    pub name:     String,
    /// Declared type.
    pub ty:       Type,
    /// Position of the type keyword.
    pub position: Position,
}

/// Represents a user-defined function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    /// The name of the function.
    pub name:        String,
    /// Parameters in declaration order.
    pub params:      Vec<Parameter>,
    /// Declared return type.
    pub return_type: Type,
    /// The function body.
    pub body:        Block,
    /// Position of the return type keyword.
    pub position:    Position,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// A function definition.
    Function(FunctionDecl),
    /// A global variable.
    Global(VarDecl),
}

/// A whole source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The name from the `Program <name>;` header. Metadata only.
    pub name:     String,
    /// Top-level declarations in source order.
    pub items:    Vec<Item>,
    /// Position of the `Program` keyword.
    pub position: Position,
}

impl Program {
    /// Iterates over the function definitions in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.items.iter().filter_map(|item| match item {
                             Item::Function(function) => Some(function),
                             Item::Global(_) => None,
                         })
    }

    /// Iterates over the global variable declarations in source order.
    pub fn globals(&self) -> impl Iterator<Item = &VarDecl> {
        self.items.iter().filter_map(|item| match item {
                             Item::Global(global) => Some(global),
                             Item::Function(_) => None,
                         })
    }

    /// Finds a function by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions().find(|function| function.name == name)
    }
}
