//! Expression nodes, literals and operators.
//!
//! All children are indices, not boxes.

use std::fmt;

use crate::{ExprId, ExprRange, Name, Span};

/// Binary arithmetic operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// `/`: truncating division (rounds toward zero).
    Div,
    /// `//`: floor division (rounds toward negative infinity).
    FloorDiv,
    /// `%`: remainder with the sign of the divisor.
    Mod,
}

impl BinaryOp {
    /// Every operator, in declaration order.
    pub const ALL: [BinaryOp; 6] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::FloorDiv,
        Self::Mod,
    ];

    /// Returns the source-level symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Literal carried by a constant node.
///
/// Floats are stored as raw bits so the node stays `Eq + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub enum Literal {
    Int(i64),
    Float(u64),
    /// String literal, stored in the arena's string table.
    Str(Name),
    Bool(bool),
    None,
}

impl Literal {
    #[inline]
    pub fn float(value: f64) -> Self {
        Literal::Float(value.to_bits())
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "Int({n})"),
            Literal::Float(bits) => write!(f, "Float({})", f64::from_bits(*bits)),
            Literal::Str(name) => write!(f, "Str({name:?})"),
            Literal::Bool(b) => write!(f, "Bool({b})"),
            Literal::None => write!(f, "None"),
        }
    }
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Literal value.
    Constant(Literal),

    /// Binary operation: `left op right`.
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// Call: `callee(args...)`.
    Call { callee: ExprId, args: ExprRange },

    /// Bare name reference.
    Ident(Name),
}

/// Expression node: kind plus source location.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}
