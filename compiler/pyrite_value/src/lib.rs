//! Pyrite Value - the dynamic value model shared by every execution path.
//!
//! - [`Value`]: reference-counted, tagged runtime datum
//! - [`EvalError`] / [`EvalErrorKind`]: the error taxonomy
//! - [`ops`]: arithmetic helpers with defined zero-divisor and overflow
//!   behavior, used by both the interpreter and the VM

pub mod errors;
pub mod ops;
mod value;

pub use errors::{
    // Parse
    syntax_error,
    // Type/operator
    arity_mismatch, binary_type_mismatch, type_mismatch,
    // Arithmetic
    division_by_zero, integer_overflow, modulo_by_zero,
    // Unsupported constructs
    not_implemented,
    // VM invariants
    empty_stack, no_return_value, unsupported_op,
    // Resources
    out_of_memory,
    ErrorCategory, EvalError, EvalErrorKind, EvalResult,
};
pub use value::{live_values, Payload, Tag, Value};
