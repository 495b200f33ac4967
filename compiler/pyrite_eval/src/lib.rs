//! Pyrite Eval - tree-walking interpreter.
//!
//! Evaluates an expression arena directly, without compiling it. This is
//! the slow, always-available path; the bytecode VM must agree with it on
//! every tree both accept.

mod builtins;
mod interpreter;
mod print_handler;

pub use builtins::Builtin;
pub use interpreter::{interpret, Interpreter, InterpreterBuilder};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
