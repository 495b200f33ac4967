use super::*;
use crate::{BinaryOp, ExprKind, Literal, Span};
use pretty_assertions::assert_eq;

fn constant(arena: &mut ExprArena, n: i64) -> ExprId {
    arena.alloc_expr(Expr::new(ExprKind::Constant(Literal::Int(n)), Span::DUMMY))
}

#[test]
fn alloc_and_get() {
    let mut arena = ExprArena::new();
    let one = constant(&mut arena, 1);
    let two = constant(&mut arena, 2);
    let sum = arena.alloc_expr(Expr::new(
        ExprKind::Binary {
            op: BinaryOp::Add,
            left: one,
            right: two,
        },
        Span::new(0, 5),
    ));

    assert_eq!(arena.expr_count(), 3);
    assert!(one.raw() < sum.raw() && two.raw() < sum.raw());
    assert_eq!(
        arena.get_expr(sum).kind,
        ExprKind::Binary {
            op: BinaryOp::Add,
            left: one,
            right: two,
        }
    );
    assert_eq!(arena.get_expr(sum).span, Span::new(0, 5));
}

#[test]
fn expr_lists_are_independent_slices() {
    let mut arena = ExprArena::new();
    let a = constant(&mut arena, 1);
    let b = constant(&mut arena, 2);
    let c = constant(&mut arena, 3);

    let first = arena.alloc_expr_list([a, b]);
    let second = arena.alloc_expr_list([c]);
    let empty = arena.alloc_expr_list([]);

    assert_eq!(arena.get_expr_list(first), &[a, b]);
    assert_eq!(arena.get_expr_list(second), &[c]);
    assert!(arena.get_expr_list(empty).is_empty());
    assert_eq!(empty, ExprRange::EMPTY);
}

#[test]
fn intern_deduplicates() {
    let mut arena = ExprArena::new();
    let print = arena.intern("print");
    let len = arena.intern("len");
    assert_eq!(arena.intern("print"), print);
    assert_ne!(print, len);
    assert_eq!(arena.name(print), "print");
    assert_eq!(arena.name(len), "len");
}

#[test]
fn parsed_expr_exposes_root() {
    let mut arena = ExprArena::new();
    let root = constant(&mut arena, 42);
    let parsed = ParsedExpr::new(arena, root);
    assert_eq!(parsed.root(), root);
    assert_eq!(
        parsed.arena().get_expr(root).kind,
        ExprKind::Constant(Literal::Int(42))
    );
}

#[test]
fn float_literal_round_trips_bits() {
    let Literal::Float(bits) = Literal::float(-0.5) else {
        panic!("expected a float literal");
    };
    assert_eq!(f64::from_bits(bits), -0.5);
}
