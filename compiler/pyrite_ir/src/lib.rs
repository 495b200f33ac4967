//! Pyrite IR - AST types shared by the interpreter and the bytecode compiler.
//!
//! The parser builds an [`ExprArena`] once; after that the tree is
//! read-only. Children are addressed by [`ExprId`] rather than boxed, so a
//! whole tree is a handful of flat vectors that drop together.
//!
//! # Node kinds
//!
//! - [`ExprKind::Constant`]: literal (`42`, `3.5`, `"hi"`, `True`, `None`)
//! - [`ExprKind::Binary`]: arithmetic operator over two children
//! - [`ExprKind::Call`]: call of a callee node with an argument range
//! - [`ExprKind::Ident`]: bare name reference

mod arena;
mod ast;
mod expr_id;
mod span;
pub mod stack;

pub use arena::{ExprArena, Name, ParsedExpr};
pub use ast::{BinaryOp, Expr, ExprKind, Literal};
pub use expr_id::{ExprId, ExprRange};
pub use span::{Span, SpanError};
