//! Tree-walking interpreter over the expression arena.
//!
//! # Evaluation rules
//!
//! - `Constant` produces a fresh value of the literal's tag.
//! - `Binary` evaluates left, then right, then applies the operator through
//!   `pyrite_value::ops`. Both operands are released when the arm returns,
//!   on success and on error.
//! - `Call` resolves its callee against the builtin table. The arity check
//!   runs before any argument is evaluated; arguments then evaluate left to
//!   right.
//! - `Ident` outside callee position is always `NotImplemented`: there are
//!   no variables.
//!
//! Errors carry the span of the innermost node that failed.

mod builder;

pub use builder::InterpreterBuilder;

use pyrite_ir::stack::ensure_sufficient_stack;
use pyrite_ir::{ExprArena, ExprId, ExprKind, ExprRange, Literal};
use pyrite_value::ops::binary_op;
use pyrite_value::{arity_mismatch, not_implemented, EvalError, EvalResult, Value};

use crate::builtins::Builtin;
use crate::print_handler::SharedPrintHandler;

/// Tree-walking interpreter bound to one arena.
pub struct Interpreter<'a> {
    arena: &'a ExprArena,
    print_handler: SharedPrintHandler,
}

impl<'a> Interpreter<'a> {
    /// Interpreter writing `print` output to stdout.
    pub fn new(arena: &'a ExprArena) -> Self {
        InterpreterBuilder::new(arena).build()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Evaluate the node `expr_id` and everything below it.
    ///
    /// The returned value carries one unit of ownership.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn eval(&self, expr_id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr_id))
    }

    fn eval_inner(&self, expr_id: ExprId) -> EvalResult {
        // Expr is Copy; copying releases the borrow before recursing.
        let expr = *self.arena.get_expr(expr_id);

        let result = match expr.kind {
            ExprKind::Constant(literal) => Ok(self.literal_value(literal)),
            ExprKind::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                binary_op(op, &left, &right)
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args),
            ExprKind::Ident(name) => Err(not_implemented(format!(
                "name lookup of `{}`",
                self.arena.name(name)
            ))),
        };

        result.map_err(|err| err.with_span(expr.span))
    }

    fn literal_value(&self, literal: Literal) -> Value {
        match literal {
            Literal::Int(n) => Value::int(n),
            Literal::Float(bits) => Value::float(f64::from_bits(bits)),
            Literal::Str(name) => Value::string(self.arena.name(name)),
            Literal::Bool(b) => Value::bool(b),
            Literal::None => Value::none(),
        }
    }

    fn eval_call(&self, callee: ExprId, args: ExprRange) -> EvalResult {
        let builtin = self.resolve_callee(callee)?;
        let arg_ids = self.arena.get_expr_list(args);
        if arg_ids.len() != builtin.arity() {
            return Err(arity_mismatch(
                builtin.name(),
                builtin.arity(),
                arg_ids.len(),
            ));
        }

        let values = arg_ids
            .iter()
            .map(|&id| self.eval(id))
            .collect::<Result<Vec<_>, _>>()?;
        builtin.call(&values, &self.print_handler)
    }

    fn resolve_callee(&self, callee: ExprId) -> Result<Builtin, EvalError> {
        let callee_expr = self.arena.get_expr(callee);
        let ExprKind::Ident(name) = callee_expr.kind else {
            return Err(
                not_implemented("calling a non-name expression").with_span(callee_expr.span)
            );
        };
        let name = self.arena.name(name);
        Builtin::lookup(name).ok_or_else(|| {
            not_implemented(format!("function `{name}`")).with_span(callee_expr.span)
        })
    }
}

/// Evaluate `root` with a default (stdout) interpreter.
pub fn interpret(arena: &ExprArena, root: ExprId) -> EvalResult {
    Interpreter::new(arena).eval(root)
}
