use std::{cmp::Ordering, fmt, str::FromStr};

use crate::error::LlllError;

/// Binary operators understood by the broadcasting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Arithmetic
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Exact division (`/`)
    Divide,
    /// Exponentiation (`**`)
    Power,
    /// Floored modulo (`%`)
    Modulo,

    // Comparison
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

impl BinOp {
    pub const ALL: [BinOp; 12] = [
        BinOp::Add,
        BinOp::Subtract,
        BinOp::Multiply,
        BinOp::Divide,
        BinOp::Power,
        BinOp::Modulo,
        BinOp::Equal,
        BinOp::NotEqual,
        BinOp::LessThan,
        BinOp::LessEqual,
        BinOp::GreaterThan,
        BinOp::GreaterEqual,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Power => "**",
            BinOp::Modulo => "%",
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::LessThan => "<",
            BinOp::LessEqual => "<=",
            BinOp::GreaterThan => ">",
            BinOp::GreaterEqual => ">=",
        }
    }

    /// `<`, `<=`, `>`, `>=`: these reduce a whole tree to one boolean
    /// instead of producing a tree of booleans.
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            BinOp::LessThan | BinOp::LessEqual | BinOp::GreaterThan | BinOp::GreaterEqual
        )
    }

    /// Whether `ordering` (of left against right) satisfies this operator.
    pub(crate) fn holds(self, ordering: Ordering) -> bool {
        match self {
            BinOp::LessThan => ordering == Ordering::Less,
            BinOp::LessEqual => ordering != Ordering::Greater,
            BinOp::GreaterThan => ordering == Ordering::Greater,
            BinOp::GreaterEqual => ordering != Ordering::Less,
            BinOp::Equal => ordering == Ordering::Equal,
            BinOp::NotEqual => ordering != Ordering::Equal,
            _ => false,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BinOp {
    type Err = LlllError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BinOp::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| LlllError::Type(format!("Unknown operator: {}", s)))
    }
}
