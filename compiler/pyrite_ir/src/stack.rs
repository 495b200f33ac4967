//! Stack safety for the recursive passes over an AST.
//!
//! The parser, the tree interpreter and the bytecode compiler all recurse
//! once per nesting level. Generated sources can nest thousands of levels
//! deep (`((((1 + 1) + 1) + 1) ...)`), so each recursive step goes through
//! [`ensure_sufficient_stack`], which grows the stack on demand.
//!
//! - **Native targets**: `stacker::maybe_grow`
//! - **WASM targets**: passthrough

/// Remaining stack below which we grow (100KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
