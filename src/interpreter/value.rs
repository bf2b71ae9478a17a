use std::fmt::{self, Display, Formatter};

use crate::ast::{LiteralValue, Type};

/// A runtime value.
///
/// Values are owned and copied on assignment and argument passing; nothing
/// aliases. `Void` is what a `void` function call evaluates to and never
/// lives in a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Signed 64-bit integer.
    Int(i64),
    /// Single ASCII character.
    Char(u8),
    /// Owned text.
    String(String),
    /// The absence of a value.
    Void,
}

/// Initial value of an uninitialized `char` variable.
pub const DEFAULT_CHAR: u8 = b'#';
/// Initial value of an uninitialized `string` variable.
pub const DEFAULT_STRING: &str = "#";

impl Value {
    /// Runtime type of the value.
    #[must_use]
    pub const fn ty(&self) -> Type {
        match self {
            Self::Int(_) => Type::Int,
            Self::Char(_) => Type::Char,
            Self::String(_) => Type::String,
            Self::Void => Type::Void,
        }
    }

    /// The value a declaration of type `ty` holds when it has no
    /// initializer.
    ///
    /// ## Example
    /// ```
    /// use subc::{ast::Type, interpreter::value::Value};
    ///
    /// assert_eq!(Value::default_for(Type::Int), Value::Int(0));
    /// assert_eq!(Value::default_for(Type::Char), Value::Char(b'#'));
    /// assert_eq!(Value::default_for(Type::String).to_string(), "#");
    /// ```
    #[must_use]
    pub fn default_for(ty: Type) -> Self {
        match ty {
            Type::Int => Self::Int(0),
            Type::Char => Self::Char(DEFAULT_CHAR),
            Type::String => Self::String(DEFAULT_STRING.to_string()),
            Type::Void => Self::Void,
        }
    }

    /// Converts the value for storage in a slot of type `target`.
    ///
    /// A `char` widens to `int`; every other pairing must match exactly.
    /// Returns `None` when the value does not fit the target.
    ///
    /// ## Example
    /// ```
    /// use subc::{ast::Type, interpreter::value::Value};
    ///
    /// assert_eq!(Value::Char(b'a').coerce_to(Type::Int), Some(Value::Int(97)));
    /// assert_eq!(Value::Int(97).coerce_to(Type::Char), None);
    /// ```
    #[must_use]
    pub fn coerce_to(self, target: Type) -> Option<Self> {
        match (self, target) {
            (Self::Char(c), Type::Int) => Some(Self::Int(i64::from(c))),
            (value, target) if value.ty() == target => Some(value),
            _ => None,
        }
    }

    /// The integer view of an `int` or `char`, used by arithmetic,
    /// comparisons and conditions.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Char(c) => Some(i64::from(*c)),
            Self::String(_) | Self::Void => None,
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(n) => Self::Int(*n),
            LiteralValue::Char(c) => Self::Char(*c),
            LiteralValue::Str(s) => Self::String(s.clone()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Int(i64::from(b))
    }
}

/// Formats the value the way `print` shows it: integers in decimal,
/// characters and strings as their raw text.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Char(c) => write!(f, "{}", char::from(*c)),
            Self::String(s) => write!(f, "{s}"),
            Self::Void => write!(f, "void"),
        }
    }
}
