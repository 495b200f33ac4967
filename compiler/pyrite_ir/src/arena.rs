//! Arena storage for a parsed expression tree.
//!
//! - Contiguous storage for all nodes
//! - Child references are `ExprId` indices
//! - Call argument lists are `ExprRange` slices of one shared id list
//! - Identifiers and string literals live in a per-arena string table
//!
//! The arena is append-only: nodes are allocated bottom-up by the parser
//! and never mutated afterwards, so a child always has a smaller id than
//! its parent and the tree can hold no cycles.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{Expr, ExprId, ExprRange};

/// Index into an arena's string table.
///
/// Only meaningful together with the arena that produced it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// Contiguous storage for all expressions of one parse.
#[derive(Clone, Default)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,
    /// Flattened expression lists (call arguments).
    expr_lists: Vec<ExprId>,
    /// Interned identifier and string-literal text (indexed by `Name`).
    strings: Vec<Box<str>>,
    string_ids: FxHashMap<Box<str>, Name>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with estimated capacity based on source size.
    /// Heuristic: ~1 expression per 4 bytes of expression source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 4;
        ExprArena {
            exprs: Vec::with_capacity(estimated),
            expr_lists: Vec::new(),
            strings: Vec::new(),
            string_ids: FxHashMap::default(),
        }
    }

    /// Allocate expression, return ID.
    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "node count is bounded by source length, which spans cap at u32"
    )]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Allocate expression list, return range.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "argument lists are bounded by the parser's u16 argument limit"
    )]
    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len();
        self.expr_lists.extend(exprs);
        let len = self.expr_lists.len() - start;
        if len == 0 {
            return ExprRange::EMPTY;
        }
        ExprRange::new(start as u32, len as u16)
    }

    /// Get expression list by range.
    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    /// Intern `text`, returning the same `Name` for equal strings.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "string table is bounded by source length"
    )]
    pub fn intern(&mut self, text: &str) -> Name {
        if let Some(&name) = self.string_ids.get(text) {
            return name;
        }
        let name = Name(self.strings.len() as u32);
        self.strings.push(text.into());
        self.string_ids.insert(text.into(), name);
        name
    }

    /// Resolve an interned name back to its text.
    ///
    /// # Panics
    /// Panics if `name` was not interned by this arena.
    #[inline]
    #[track_caller]
    pub fn name(&self, name: Name) -> &str {
        &self.strings[name.0 as usize]
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprArena")
            .field("exprs", &self.exprs.len())
            .field("expr_lists", &self.expr_lists.len())
            .field("strings", &self.strings.len())
            .finish()
    }
}

/// Output of a parse: the arena plus its root node.
#[derive(Clone, Debug)]
pub struct ParsedExpr {
    arena: ExprArena,
    root: ExprId,
}

impl ParsedExpr {
    pub fn new(arena: ExprArena, root: ExprId) -> Self {
        ParsedExpr { arena, root }
    }

    #[inline]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    #[inline]
    pub fn root(&self) -> ExprId {
        self.root
    }
}

#[cfg(test)]
mod tests;
