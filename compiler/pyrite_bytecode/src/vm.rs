//! Stack-based bytecode VM.
//!
//! Executes a [`BytecodeProgram`] with a private operand stack starting at
//! `ip = 0`. Arithmetic is integer-only: any other operand tag is an
//! `UnsupportedOp`. Numeric semantics come from `pyrite_value::ops`, the
//! same helpers the tree interpreter uses.
//!
//! Malformed programs (hand-built, never produced by the compiler) surface
//! as errors: `EmptyStack` for an underflow, `NoReturnValue` when the
//! instructions run out, `UnsupportedOp` for a bad constant index.

use pyrite_ir::BinaryOp;
use pyrite_value::ops::int_binary;
use pyrite_value::{
    empty_stack, no_return_value, unsupported_op, EvalError, EvalResult, Payload, Value,
};
use smallvec::SmallVec;
use tracing::trace;

use crate::opcode::Opcode;
use crate::program::BytecodeProgram;

/// Operand stack; expression programs rarely need more than a few slots.
type OperandStack = SmallVec<[Value; 16]>;

/// Reusable VM. Every [`Vm::execute`] call starts from an empty stack and
/// leaves it empty again, whatever the outcome.
#[derive(Default)]
pub struct Vm {
    stack: OperandStack,
}

impl Vm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `program` to its `Return` and hand back the returned value.
    pub fn execute(&mut self, program: &BytecodeProgram) -> EvalResult {
        self.stack.clear();
        let result = self.run(program);
        // Releases anything left below the returned value, or the partial
        // stack of a failed run.
        self.stack.clear();
        result
    }

    fn run(&mut self, program: &BytecodeProgram) -> EvalResult {
        for (ip, instruction) in program.instructions().iter().enumerate() {
            trace!(
                ip,
                opcode = %instruction.opcode,
                operand = instruction.operand,
                depth = self.stack.len(),
                "execute"
            );

            let step = match instruction.opcode {
                Opcode::LoadConst => self.load_const(program, instruction.operand),
                Opcode::Add => self.binary(BinaryOp::Add),
                Opcode::Sub => self.binary(BinaryOp::Sub),
                Opcode::Mul => self.binary(BinaryOp::Mul),
                Opcode::Div => self.binary(BinaryOp::Div),
                Opcode::FloorDiv => self.binary(BinaryOp::FloorDiv),
                Opcode::Mod => self.binary(BinaryOp::Mod),
                Opcode::Return => return self.pop().map_err(|err| at(err, program, ip)),
            };
            step.map_err(|err| at(err, program, ip))?;
        }
        Err(no_return_value())
    }

    #[inline]
    fn pop(&mut self) -> EvalResult {
        self.stack.pop().ok_or_else(empty_stack)
    }

    fn load_const(&mut self, program: &BytecodeProgram, operand: u32) -> Result<(), EvalError> {
        let constant = usize::try_from(operand)
            .ok()
            .and_then(|index| program.constants().get(index))
            .ok_or_else(|| {
                unsupported_op(format!(
                    "constant index {operand} out of range ({} constants)",
                    program.constants().len()
                ))
            })?;
        self.stack.push(constant.to_value());
        Ok(())
    }

    /// Pop right, pop left, push `left op right`.
    fn binary(&mut self, op: BinaryOp) -> Result<(), EvalError> {
        let right = self.pop()?;
        let left = self.pop()?;
        let result = match (left.payload(), right.payload()) {
            (Payload::Int(a), Payload::Int(b)) => int_binary(op, *a, *b)?,
            _ => {
                return Err(unsupported_op(format!(
                    "bytecode {} requires int operands, got '{}' and '{}'",
                    op.as_symbol(),
                    left.tag(),
                    right.tag()
                )));
            }
        };
        self.stack.push(Value::int(result));
        Ok(())
    }
}

/// Attach the span of the instruction at `ip`, when the program has one.
fn at(err: EvalError, program: &BytecodeProgram, ip: usize) -> EvalError {
    match program.span_at(ip) {
        Some(span) => err.with_span(span),
        None => err,
    }
}

/// Execute `program` on a fresh VM.
pub fn execute(program: &BytecodeProgram) -> EvalResult {
    Vm::new().execute(program)
}
