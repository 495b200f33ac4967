//! Compiled programs.
//!
//! A [`BytecodeProgram`] is immutable once built and contains no reference
//! counted values, only plain [`Constant`]s. That makes it `Send + Sync`:
//! one program can be shared through an `Arc` and executed by any number of
//! VMs on any number of threads. Each execution materializes its own
//! values from the constant pool.

use std::fmt;

use pyrite_ir::Span;
use pyrite_value::{out_of_memory, EvalError, Value};

use crate::opcode::Instruction;

/// Constant pool entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Int(i64),
    Float(f64),
    Str(Box<str>),
    Bool(bool),
    None,
}

impl Constant {
    /// A fresh value (refcount 1) holding this constant.
    pub fn to_value(&self) -> Value {
        match self {
            Constant::Int(n) => Value::int(*n),
            Constant::Float(x) => Value::float(*x),
            Constant::Str(s) => Value::string(&**s),
            Constant::Bool(b) => Value::bool(*b),
            Constant::None => Value::none(),
        }
    }
}

impl fmt::Display for Constant {
    /// Repr-style rendering, as in the disassembly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Value's Debug impl is the repr() form; going through it keeps
        // float and string rendering identical to runtime values.
        write!(f, "{:?}", self.to_value())
    }
}

/// Instruction sequence plus constant pool.
///
/// `spans[i]` is the source location of the node `instructions[i]` was
/// compiled from; it only feeds error positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BytecodeProgram {
    instructions: Vec<Instruction>,
    constants: Vec<Constant>,
    spans: Vec<Span>,
}

impl BytecodeProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a program directly from its parts, with no span information.
    ///
    /// Nothing checks that the result is well formed; the VM reports
    /// malformed programs as errors.
    pub fn from_parts(instructions: Vec<Instruction>, constants: Vec<Constant>) -> Self {
        let spans = vec![Span::DUMMY; instructions.len()];
        BytecodeProgram {
            instructions,
            constants,
            spans,
        }
    }

    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    #[inline]
    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    /// Source span of the instruction at `ip`.
    pub fn span_at(&self, ip: usize) -> Option<Span> {
        self.spans
            .get(ip)
            .copied()
            .filter(|span| *span != Span::DUMMY)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Append a constant and return its pool index.
    pub(crate) fn add_constant(&mut self, constant: Constant) -> Result<u32, EvalError> {
        let index = u32::try_from(self.constants.len())
            .map_err(|_| out_of_memory("constant pool exceeds u32 indices"))?;
        self.constants.push(constant);
        Ok(index)
    }

    pub(crate) fn emit(&mut self, instruction: Instruction, span: Span) {
        self.instructions.push(instruction);
        self.spans.push(span);
    }
}

impl fmt::Display for BytecodeProgram {
    /// Disassembly listing, one instruction per line:
    ///
    /// ```text
    /// 0000 LoadConst 0 ; 1
    /// 0001 LoadConst 1 ; 2
    /// 0002 Add
    /// 0003 Return
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ip, instruction) in self.instructions.iter().enumerate() {
            write!(f, "{ip:04} {instruction}")?;
            if instruction.opcode.has_operand() {
                match usize::try_from(instruction.operand)
                    .ok()
                    .and_then(|index| self.constants.get(index))
                {
                    Some(constant) => write!(f, " ; {constant}")?,
                    None => write!(f, " ; <invalid constant>")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
