//! Error taxonomy shared by every stage of the dynamic execution core.
//!
//! `EvalErrorKind` carries the structured data for each failure; factory
//! functions (e.g. `division_by_zero()`) build the error and fill in the
//! message from the kind's `Display` impl. Callers match on
//! [`EvalError::category`] rather than on message text.
//!
//! Errors pass through every stage unwrapped: whatever stage failed first
//! decides the category the caller sees.

use std::fmt;

use pyrite_ir::{BinaryOp, Span};

use crate::{Tag, Value};

/// Result of any operation that produces a value.
pub type EvalResult = Result<Value, EvalError>;

/// Python-facing error class of a failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Parse failure reported by the parser.
    SyntaxError,
    /// Operand tag mismatch, wrong argument count.
    TypeError,
    /// Construct outside the supported AST/bytecode subset.
    NotImplemented,
    /// Zero divisor.
    ZeroDivisionError,
    /// Integer result outside the `i64` range.
    OverflowError,
    /// VM popped from an empty operand stack.
    EmptyStack,
    /// VM ran past the last instruction without a `Return`.
    NoReturnValue,
    /// VM met an operand or instruction it cannot execute.
    UnsupportedOp,
    /// Allocation or table-size limit exceeded.
    OutOfMemory,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SyntaxError => "SyntaxError",
            Self::TypeError => "TypeError",
            Self::NotImplemented => "NotImplementedError",
            Self::ZeroDivisionError => "ZeroDivisionError",
            Self::OverflowError => "OverflowError",
            Self::EmptyStack => "EmptyStack",
            Self::NoReturnValue => "NoReturnValue",
            Self::UnsupportedOp => "UnsupportedOp",
            Self::OutOfMemory => "MemoryError",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed error category with structured data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Parse
    Syntax {
        message: String,
    },

    // Type/Operator
    TypeMismatch {
        expected: String,
        got: Tag,
    },
    BinaryTypeMismatch {
        op: BinaryOp,
        left: Tag,
        right: Tag,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    // Arithmetic
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow {
        operation: String,
    },

    // Unsupported constructs
    NotImplemented {
        feature: String,
    },

    // VM invariants
    EmptyStack,
    NoReturnValue,
    UnsupportedOp {
        detail: String,
    },

    // Resources
    OutOfMemory {
        resource: String,
    },
}

impl EvalErrorKind {
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Syntax { .. } => ErrorCategory::SyntaxError,
            Self::TypeMismatch { .. }
            | Self::BinaryTypeMismatch { .. }
            | Self::ArityMismatch { .. } => ErrorCategory::TypeError,
            Self::DivisionByZero | Self::ModuloByZero => ErrorCategory::ZeroDivisionError,
            Self::IntegerOverflow { .. } => ErrorCategory::OverflowError,
            Self::NotImplemented { .. } => ErrorCategory::NotImplemented,
            Self::EmptyStack => ErrorCategory::EmptyStack,
            Self::NoReturnValue => ErrorCategory::NoReturnValue,
            Self::UnsupportedOp { .. } => ErrorCategory::UnsupportedOp,
            Self::OutOfMemory { .. } => ErrorCategory::OutOfMemory,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { message } => f.write_str(message),

            Self::TypeMismatch { expected, got } => {
                write!(f, "expected {expected}, got {got}")
            }
            Self::BinaryTypeMismatch { op, left, right } => write!(
                f,
                "unsupported operand type(s) for {}: '{left}' and '{right}'",
                op.as_symbol()
            ),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name}() takes {expected} {arg_word} ({got} given)")
            }

            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }

            Self::NotImplemented { feature } => write!(f, "{feature} is not supported"),

            Self::EmptyStack => write!(f, "operand stack is empty"),
            Self::NoReturnValue => write!(f, "program ended without a return instruction"),
            Self::UnsupportedOp { detail } => f.write_str(detail),

            Self::OutOfMemory { resource } => write!(f, "out of memory: {resource}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Source location, when the failing stage knows it.
    pub span: Option<Span>,
}

impl EvalError {
    /// Create an error from a structured kind.
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
        }
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Attach a source location, keeping one that is already set.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

// Factory functions

#[cold]
pub fn syntax_error(message: impl Into<String>, span: Span) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Syntax {
        message: message.into(),
    })
    .with_span(span)
}

#[cold]
pub fn type_mismatch(expected: impl Into<String>, got: Tag) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.into(),
        got,
    })
}

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: Tag, right: Tag) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch { op, left, right })
}

#[cold]
pub fn arity_mismatch(name: impl Into<String>, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.into(),
        expected,
        got,
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.into(),
    })
}

#[cold]
pub fn not_implemented(feature: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotImplemented {
        feature: feature.into(),
    })
}

#[cold]
pub fn empty_stack() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyStack)
}

#[cold]
pub fn no_return_value() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoReturnValue)
}

#[cold]
pub fn unsupported_op(detail: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOp {
        detail: detail.into(),
    })
}

#[cold]
pub fn out_of_memory(resource: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OutOfMemory {
        resource: resource.into(),
    })
}

#[cfg(test)]
mod tests;
