//! AST to bytecode lowering.
//!
//! Post-order walk: a binary node compiles its left operand, then its right
//! operand, then one opcode for the operator, so operands land on the VM
//! stack in evaluation order. A single `Return` closes the program.
//!
//! Only constants and binary operators compile. Calls and names fail the
//! whole compilation with `NotImplemented`; no partial program escapes.

use pyrite_ir::stack::ensure_sufficient_stack;
use pyrite_ir::{ExprArena, ExprId, ExprKind, Literal, ParsedExpr, Span};
use pyrite_value::{not_implemented, EvalError};
use tracing::debug;

use crate::opcode::{Instruction, Opcode};
use crate::program::{BytecodeProgram, Constant};

/// Compile the tree rooted at `root` into a program.
#[tracing::instrument(level = "debug", skip(arena))]
pub fn compile(arena: &ExprArena, root: ExprId) -> Result<BytecodeProgram, EvalError> {
    let mut compiler = Compiler {
        arena,
        program: BytecodeProgram::new(),
    };
    compiler.compile_expr(root)?;
    let span = arena.get_expr(root).span;
    compiler.program.emit(Instruction::simple(Opcode::Return), span);

    debug!(
        instructions = compiler.program.len(),
        constants = compiler.program.constants().len(),
        "compiled program"
    );
    Ok(compiler.program)
}

/// Compile a parser result.
pub fn compile_parsed(parsed: &ParsedExpr) -> Result<BytecodeProgram, EvalError> {
    compile(parsed.arena(), parsed.root())
}

struct Compiler<'a> {
    arena: &'a ExprArena,
    program: BytecodeProgram,
}

impl Compiler<'_> {
    fn compile_expr(&mut self, expr_id: ExprId) -> Result<(), EvalError> {
        ensure_sufficient_stack(|| self.compile_expr_inner(expr_id))
    }

    fn compile_expr_inner(&mut self, expr_id: ExprId) -> Result<(), EvalError> {
        let expr = *self.arena.get_expr(expr_id);
        match expr.kind {
            ExprKind::Constant(literal) => self.compile_constant(literal, expr.span),
            ExprKind::Binary { op, left, right } => {
                self.compile_expr(left)?;
                self.compile_expr(right)?;
                self.program
                    .emit(Instruction::simple(Opcode::from_binary_op(op)), expr.span);
                Ok(())
            }
            ExprKind::Call { .. } => {
                Err(not_implemented("function calls in compiled code").with_span(expr.span))
            }
            ExprKind::Ident(name) => Err(not_implemented(format!(
                "name lookup of `{}`",
                self.arena.name(name)
            ))
            .with_span(expr.span)),
        }
    }

    fn compile_constant(&mut self, literal: Literal, span: Span) -> Result<(), EvalError> {
        let constant = match literal {
            Literal::Int(n) => Constant::Int(n),
            Literal::Float(bits) => Constant::Float(f64::from_bits(bits)),
            Literal::Str(name) => Constant::Str(self.arena.name(name).into()),
            Literal::Bool(b) => Constant::Bool(b),
            Literal::None => Constant::None,
        };
        let index = self
            .program
            .add_constant(constant)
            .map_err(|err| err.with_span(span))?;
        self.program.emit(Instruction::load_const(index), span);
        Ok(())
    }
}
