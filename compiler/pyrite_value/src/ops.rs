//! Arithmetic on dynamic values.
//!
//! This module is the single source of numeric semantics: the tree
//! interpreter and the bytecode VM both call into it, so the two paths
//! cannot drift apart.
//!
//! - No implicit promotion: `int op int` and `float op float` only.
//! - `/` on ints truncates toward zero; `//` floors toward negative
//!   infinity; `%` takes the sign of the divisor, consistent with `//`
//!   (`a == (a // b) * b + a % b`).
//! - A zero divisor is a `ZeroDivisionError` for ints and floats alike.
//! - Int results outside `i64` are an `OverflowError`.
//!
//! All helpers borrow their operands; the caller keeps ownership and
//! releases them.

use pyrite_ir::BinaryOp;

use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, modulo_by_zero, type_mismatch,
    EvalError, EvalResult,
};
use crate::{Payload, Value};

/// Checked arithmetic where the only failure is overflow.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> Result<i64, EvalError> {
    result.ok_or_else(|| integer_overflow(op_name))
}

/// Truncating division: `7 / 2 == 3`, `-7 / 2 == -3`.
pub fn trunc_div(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(division_by_zero());
    }
    checked_arith(a.checked_div(b), "division")
}

/// Floor division: `7 // 2 == 3`, `-7 // 2 == -4`.
pub fn floor_div(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(division_by_zero());
    }
    let div = checked_arith(a.checked_div(b), "floor division")?;
    let rem = a.wrapping_rem(b);
    if rem != 0 && (rem < 0) != (b < 0) {
        checked_arith(div.checked_sub(1), "floor division")
    } else {
        Ok(div)
    }
}

/// Modulo with the sign of the divisor: `-7 % 2 == 1`, `7 % -2 == -1`.
pub fn modulo(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(modulo_by_zero());
    }
    // `i64::MIN % -1` overflows in hardware but is mathematically 0.
    let rem = a.wrapping_rem(b);
    if rem != 0 && (rem < 0) != (b < 0) {
        checked_arith(rem.checked_add(b), "modulo")
    } else {
        Ok(rem)
    }
}

/// Float modulo with the sign of the divisor.
pub fn float_modulo(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        return Err(modulo_by_zero());
    }
    let rem = a % b;
    if rem != 0.0 && (rem < 0.0) != (b < 0.0) {
        Ok(rem + b)
    } else {
        Ok(rem)
    }
}

/// Float floor division, consistent with [`float_modulo`].
pub fn float_floor_div(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        return Err(division_by_zero());
    }
    // A finite dividend over an infinite divisor floors to 0 or -1.
    if b.is_infinite() && a.is_finite() {
        return Ok(if a == 0.0 || (a < 0.0) == (b < 0.0) {
            a / b
        } else {
            -1.0
        });
    }
    let rem = float_modulo(a, b)?;
    Ok(((a - rem) / b).round())
}

/// Integer binary operation.
pub fn int_binary(op: BinaryOp, a: i64, b: i64) -> Result<i64, EvalError> {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => trunc_div(a, b),
        BinaryOp::FloorDiv => floor_div(a, b),
        BinaryOp::Mod => modulo(a, b),
    }
}

/// Float binary operation.
pub fn float_binary(op: BinaryOp, a: f64, b: f64) -> Result<f64, EvalError> {
    match op {
        BinaryOp::Add => Ok(a + b),
        BinaryOp::Sub => Ok(a - b),
        BinaryOp::Mul => Ok(a * b),
        BinaryOp::Div if b == 0.0 => Err(division_by_zero()),
        BinaryOp::Div => Ok(a / b),
        BinaryOp::FloorDiv => float_floor_div(a, b),
        BinaryOp::Mod => float_modulo(a, b),
    }
}

/// Apply `op` to two borrowed values, returning a new owned result.
pub fn binary_op(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match (left.payload(), right.payload()) {
        (Payload::Int(a), Payload::Int(b)) => int_binary(op, *a, *b).map(Value::int),
        (Payload::Float(a), Payload::Float(b)) => float_binary(op, *a, *b).map(Value::float),
        _ => Err(binary_type_mismatch(op, left.tag(), right.tag())),
    }
}

/// Absolute value of an int or float.
pub fn abs_value(value: &Value) -> EvalResult {
    match value.payload() {
        Payload::Int(n) => n
            .checked_abs()
            .map(Value::int)
            .ok_or_else(|| integer_overflow("abs")),
        Payload::Float(x) => Ok(Value::float(x.abs())),
        _ => Err(type_mismatch("int or float", value.tag())),
    }
}

/// Length of a string (in characters) or a list.
pub fn length(value: &Value) -> Result<usize, EvalError> {
    match value.payload() {
        Payload::Str(s) => Ok(s.chars().count()),
        Payload::List(items) => Ok(items.len()),
        _ => Err(type_mismatch("str or list", value.tag())),
    }
}

#[cfg(test)]
mod tests;
