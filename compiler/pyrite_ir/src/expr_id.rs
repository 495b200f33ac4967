//! Expression IDs and ranges for the flat AST.
//!
//! - `ExprId(u32)` instead of `Box<Expr>`
//! - `ExprRange` for call argument lists (start + len into a shared list)

use std::fmt;

/// Index into [`ExprArena`](crate::ExprArena).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Invalid expression ID (sentinel value).
    pub const INVALID: ExprId = ExprId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Index into the arena's node vector.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "ExprId({})", self.0)
        } else {
            write!(f, "ExprId::INVALID")
        }
    }
}

impl Default for ExprId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Range of expression ids in the arena's flattened id list.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ExprRange {
    pub start: u32,
    pub len: u16,
}

impl ExprRange {
    pub const EMPTY: ExprRange = ExprRange { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        ExprRange { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl fmt::Debug for ExprRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExprRange({}..{})",
            self.start,
            u64::from(self.start) + u64::from(self.len)
        )
    }
}

impl Default for ExprRange {
    fn default() -> Self {
        Self::EMPTY
    }
}
