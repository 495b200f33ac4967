//! Pyrite Bytecode - compiler and stack VM.
//!
//! ```text
//! ExprArena --compile--> BytecodeProgram --Vm::execute--> Value
//! ```
//!
//! Programs are immutable and thread-shareable; the evaluation cache hands
//! them out behind an `Arc`. The VM agrees with the tree interpreter on
//! evaluation order and integer semantics for every tree both accept.

mod compiler;
mod opcode;
mod program;
mod vm;

pub use compiler::{compile, compile_parsed};
pub use opcode::{Instruction, Opcode};
pub use program::{BytecodeProgram, Constant};
pub use vm::{execute, Vm};
