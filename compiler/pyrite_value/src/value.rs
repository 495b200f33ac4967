//! Reference-counted dynamic values.
//!
//! # Ownership
//!
//! A [`Value`] is one owning handle to a shared object. The object's
//! reference count is the number of live handles:
//!
//! - constructors (`Value::int`, `Value::string`, ...) return a handle with
//!   count 1;
//! - [`Value::incref`] (or `clone`) returns another handle, count + 1;
//! - [`Value::decref`] (or dropping the handle) gives one up, count - 1.
//!   At zero the payload is released, including any values it owns.
//!
//! Functions that only look at a value take `&Value` (borrow). Functions
//! that keep or consume it take `Value` (ownership moves in). Returned
//! values always transfer one unit of ownership to the caller.
//!
//! # Thread model
//!
//! Counts are plain, non-atomic `Rc` counts, so `Value` is `!Send`. Each
//! execution owns its values on one thread. The live-object counter used
//! for leak audits is therefore per thread and exact.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::errors::{type_mismatch, EvalError};

thread_local! {
    /// Number of value objects alive on this thread.
    static LIVE_VALUES: Cell<usize> = const { Cell::new(0) };
}

/// Number of value objects currently alive on the calling thread.
///
/// Used to audit that an operation released every intermediate value:
/// take a baseline, run the operation, drop the result, compare.
pub fn live_values() -> usize {
    LIVE_VALUES.with(Cell::get)
}

/// Runtime type of a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    None,
    Bool,
    Int,
    Float,
    Str,
    List,
}

impl Tag {
    /// Python-facing type name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::None => "NoneType",
            Tag::Bool => "bool",
            Tag::Int => "int",
            Tag::Float => "float",
            Tag::Str => "str",
            Tag::List => "list",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag-specific owned data of a value.
#[derive(Debug)]
pub enum Payload {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Box<str>),
    /// Owns one reference to each element.
    List(Vec<Value>),
}

impl Payload {
    pub const fn tag(&self) -> Tag {
        match self {
            Payload::None => Tag::None,
            Payload::Bool(_) => Tag::Bool,
            Payload::Int(_) => Tag::Int,
            Payload::Float(_) => Tag::Float,
            Payload::Str(_) => Tag::Str,
            Payload::List(_) => Tag::List,
        }
    }
}

/// Heap object behind a handle. Counted in `LIVE_VALUES` from creation to
/// release.
struct Object {
    payload: Payload,
}

impl Object {
    fn new(payload: Payload) -> Self {
        LIVE_VALUES.with(|live| live.set(live.get() + 1));
        Object { payload }
    }
}

impl Drop for Object {
    fn drop(&mut self) {
        // Thread-local storage may already be gone during thread teardown.
        let _ = LIVE_VALUES.try_with(|live| live.set(live.get().saturating_sub(1)));
    }
}

/// Owning handle to a reference-counted dynamic value.
pub struct Value(Rc<Object>);

impl Value {
    /// Create a value with reference count 1.
    pub fn new(payload: Payload) -> Self {
        Value(Rc::new(Object::new(payload)))
    }

    #[inline]
    pub fn none() -> Self {
        Self::new(Payload::None)
    }

    #[inline]
    pub fn bool(value: bool) -> Self {
        Self::new(Payload::Bool(value))
    }

    #[inline]
    pub fn int(value: i64) -> Self {
        Self::new(Payload::Int(value))
    }

    #[inline]
    pub fn float(value: f64) -> Self {
        Self::new(Payload::Float(value))
    }

    #[inline]
    pub fn string(value: impl Into<Box<str>>) -> Self {
        Self::new(Payload::Str(value.into()))
    }

    /// Create a list, taking ownership of the element handles.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Self::new(Payload::List(items))
    }

    /// Add an owning reference. Same as `clone`.
    #[inline]
    #[must_use]
    pub fn incref(&self) -> Value {
        Value(Rc::clone(&self.0))
    }

    /// Give up this owning reference. Same as dropping the handle; when it
    /// was the last one, the payload and everything it owns is released.
    #[inline]
    pub fn decref(self) {
        drop(self);
    }

    /// Number of live owning handles.
    #[inline]
    pub fn refcount(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Whether two handles refer to the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.0.payload.tag()
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.0.payload
    }

    /// Borrow the payload, requiring a specific tag.
    pub fn payload_as(&self, tag: Tag) -> Result<&Payload, EvalError> {
        if self.tag() == tag {
            Ok(self.payload())
        } else {
            Err(type_mismatch(tag.name(), self.tag()))
        }
    }

    pub fn as_int(&self) -> Result<i64, EvalError> {
        match self.payload() {
            Payload::Int(n) => Ok(*n),
            _ => Err(type_mismatch(Tag::Int.name(), self.tag())),
        }
    }

    pub fn as_float(&self) -> Result<f64, EvalError> {
        match self.payload() {
            Payload::Float(x) => Ok(*x),
            _ => Err(type_mismatch(Tag::Float.name(), self.tag())),
        }
    }

    pub fn as_bool(&self) -> Result<bool, EvalError> {
        match self.payload() {
            Payload::Bool(b) => Ok(*b),
            _ => Err(type_mismatch(Tag::Bool.name(), self.tag())),
        }
    }

    pub fn as_str(&self) -> Result<&str, EvalError> {
        match self.payload() {
            Payload::Str(s) => Ok(s),
            _ => Err(type_mismatch(Tag::Str.name(), self.tag())),
        }
    }

    pub fn as_list(&self) -> Result<&[Value], EvalError> {
        match self.payload() {
            Payload::List(items) => Ok(items),
            _ => Err(type_mismatch(Tag::List.name(), self.tag())),
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self.payload(), Payload::None)
    }
}

impl Clone for Value {
    #[inline]
    fn clone(&self) -> Self {
        self.incref()
    }
}

/// Structural equality. Floats compare with IEEE semantics (`NaN != NaN`).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self.payload(), other.payload()) {
            (Payload::None, Payload::None) => true,
            (Payload::Bool(a), Payload::Bool(b)) => a == b,
            (Payload::Int(a), Payload::Int(b)) => a == b,
            (Payload::Float(a), Payload::Float(b)) => a == b,
            (Payload::Str(a), Payload::Str(b)) => a == b,
            (Payload::List(a), Payload::List(b)) => a == b,
            _ => false,
        }
    }
}

/// Format a float the way Python's `repr(float)` does: shortest
/// round-trip digits, exponent form outside `1e-4 <= |x| < 1e16`.
fn fmt_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "inf" } else { "-inf" });
    }

    // `{:e}` yields the shortest round-trip mantissa, e.g. `-1.5e300`.
    let sci = format!("{x:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if x != 0.0 && !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    let plain = x.to_string();
    if plain.contains('.') {
        f.write_str(&plain)
    } else {
        write!(f, "{plain}.0")
    }
}

/// Python `repr()` of a string: single quotes unless the text contains one.
fn fmt_str_repr(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    write!(f, "{quote}")?;
    for c in s.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\\' => f.write_str("\\\\")?,
            c if c == quote => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

/// `str()` rendering: strings are printed bare.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload() {
            Payload::Str(s) => f.write_str(s),
            _ => fmt::Debug::fmt(self, f),
        }
    }
}

/// `repr()` rendering.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload() {
            Payload::None => f.write_str("None"),
            Payload::Bool(true) => f.write_str("True"),
            Payload::Bool(false) => f.write_str("False"),
            Payload::Int(n) => write!(f, "{n}"),
            Payload::Float(x) => fmt_float(f, *x),
            Payload::Str(s) => fmt_str_repr(f, s),
            Payload::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Debug::fmt(item, f)?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests;
