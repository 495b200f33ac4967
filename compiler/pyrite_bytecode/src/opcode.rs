//! Opcodes and instructions.

use std::fmt;

use pyrite_ir::BinaryOp;

/// Bytecode instruction kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Push a fresh value built from `constants[operand]`.
    LoadConst,
    Add,
    Sub,
    Mul,
    /// Truncating integer division.
    Div,
    FloorDiv,
    Mod,
    /// Pop the top of the stack and finish with it.
    Return,
}

impl Opcode {
    /// Opcode implementing a binary operator.
    pub const fn from_binary_op(op: BinaryOp) -> Opcode {
        match op {
            BinaryOp::Add => Opcode::Add,
            BinaryOp::Sub => Opcode::Sub,
            BinaryOp::Mul => Opcode::Mul,
            BinaryOp::Div => Opcode::Div,
            BinaryOp::FloorDiv => Opcode::FloorDiv,
            BinaryOp::Mod => Opcode::Mod,
        }
    }

    /// The operator a binary opcode applies; `None` for the others.
    pub const fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Opcode::Add => Some(BinaryOp::Add),
            Opcode::Sub => Some(BinaryOp::Sub),
            Opcode::Mul => Some(BinaryOp::Mul),
            Opcode::Div => Some(BinaryOp::Div),
            Opcode::FloorDiv => Some(BinaryOp::FloorDiv),
            Opcode::Mod => Some(BinaryOp::Mod),
            Opcode::LoadConst | Opcode::Return => None,
        }
    }

    /// Whether the operand field is meaningful.
    pub const fn has_operand(self) -> bool {
        matches!(self, Opcode::LoadConst)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Opcode::LoadConst => "LoadConst",
            Opcode::Add => "Add",
            Opcode::Sub => "Sub",
            Opcode::Mul => "Mul",
            Opcode::Div => "Div",
            Opcode::FloorDiv => "FloorDiv",
            Opcode::Mod => "Mod",
            Opcode::Return => "Return",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One instruction: opcode plus a `u32` operand (0 when unused).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operand: u32,
}

impl Instruction {
    #[inline]
    pub const fn new(opcode: Opcode, operand: u32) -> Self {
        Instruction { opcode, operand }
    }

    /// Instruction without an operand.
    #[inline]
    pub const fn simple(opcode: Opcode) -> Self {
        Self::new(opcode, 0)
    }

    #[inline]
    pub const fn load_const(index: u32) -> Self {
        Self::new(Opcode::LoadConst, index)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.opcode.has_operand() {
            write!(f, "{} {}", self.opcode, self.operand)
        } else {
            write!(f, "{}", self.opcode)
        }
    }
}
