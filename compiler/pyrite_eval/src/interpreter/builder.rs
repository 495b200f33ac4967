//! `InterpreterBuilder` for creating `Interpreter` instances.

use pyrite_ir::ExprArena;

use super::Interpreter;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for creating `Interpreter` instances with a chosen print sink.
pub struct InterpreterBuilder<'a> {
    arena: &'a ExprArena,
    print_handler: Option<SharedPrintHandler>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(arena: &'a ExprArena) -> Self {
        Self {
            arena,
            print_handler: None,
        }
    }

    /// Set the print handler used by the `print` builtin.
    ///
    /// Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            arena: self.arena,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
        }
    }
}
