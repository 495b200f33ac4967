//! Closed table of callable builtins.
//!
//! Calls resolve by name against this table only; there is no user-defined
//! function or variable lookup. Each builtin has a fixed arity which is
//! checked before any argument is evaluated.

use pyrite_ir::BinaryOp;
use pyrite_value::ops::{abs_value, binary_op, length};
use pyrite_value::{arity_mismatch, integer_overflow, EvalResult, Value};

use crate::print_handler::PrintHandlerImpl;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `print(x)`: writes `str(x)` and a newline, returns `None`.
    Print,
    /// `len(x)`: characters of a string or elements of a list.
    Len,
    /// `abs(x)` on an int or float.
    Abs,
    /// `floordiv(a, b)`, same as `a // b`.
    FloorDiv,
    /// `mod(a, b)`, same as `a % b`.
    Mod,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::Print,
        Builtin::Len,
        Builtin::Abs,
        Builtin::FloorDiv,
        Builtin::Mod,
    ];

    pub fn lookup(name: &str) -> Option<Builtin> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Len => "len",
            Builtin::Abs => "abs",
            Builtin::FloorDiv => "floordiv",
            Builtin::Mod => "mod",
        }
    }

    pub const fn arity(self) -> usize {
        match self {
            Builtin::Print | Builtin::Len | Builtin::Abs => 1,
            Builtin::FloorDiv | Builtin::Mod => 2,
        }
    }

    /// Apply the builtin to already-evaluated arguments.
    ///
    /// `args.len()` must equal [`Builtin::arity`]; the caller checks it.
    pub(crate) fn call(self, args: &[Value], out: &PrintHandlerImpl) -> EvalResult {
        match (self, args) {
            (Builtin::Print, [value]) => {
                out.println(&value.to_string());
                Ok(Value::none())
            }
            (Builtin::Len, [value]) => {
                let len = length(value)?;
                i64::try_from(len)
                    .map(Value::int)
                    .map_err(|_| integer_overflow("len"))
            }
            (Builtin::Abs, [value]) => abs_value(value),
            (Builtin::FloorDiv, [left, right]) => binary_op(BinaryOp::FloorDiv, left, right),
            (Builtin::Mod, [left, right]) => binary_op(BinaryOp::Mod, left, right),
            _ => Err(arity_mismatch(self.name(), self.arity(), args.len())),
        }
    }
}

#[cfg(test)]
mod tests;
