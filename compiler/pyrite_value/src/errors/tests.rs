use super::*;
use pretty_assertions::assert_eq;

#[test]
fn factories_set_kind_and_message() {
    let err = division_by_zero();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(err.message, "division by zero");
    assert_eq!(err.category(), ErrorCategory::ZeroDivisionError);

    let err = not_implemented("name lookup");
    assert_eq!(err.message, "name lookup is not supported");
    assert_eq!(err.category(), ErrorCategory::NotImplemented);
}

#[test]
fn categories_cover_taxonomy() {
    let cases = [
        (syntax_error("bad", Span::DUMMY), ErrorCategory::SyntaxError),
        (type_mismatch("int", Tag::Str), ErrorCategory::TypeError),
        (
            binary_type_mismatch(BinaryOp::Add, Tag::Int, Tag::Float),
            ErrorCategory::TypeError,
        ),
        (arity_mismatch("len", 1, 2), ErrorCategory::TypeError),
        (modulo_by_zero(), ErrorCategory::ZeroDivisionError),
        (integer_overflow("addition"), ErrorCategory::OverflowError),
        (empty_stack(), ErrorCategory::EmptyStack),
        (no_return_value(), ErrorCategory::NoReturnValue),
        (unsupported_op("float operand"), ErrorCategory::UnsupportedOp),
        (out_of_memory("constant pool"), ErrorCategory::OutOfMemory),
    ];
    for (err, expected) in cases {
        assert_eq!(err.category(), expected, "{err}");
    }
}

#[test]
fn display_prefixes_category() {
    assert_eq!(
        division_by_zero().to_string(),
        "ZeroDivisionError: division by zero"
    );
    assert_eq!(
        arity_mismatch("len", 1, 2).to_string(),
        "TypeError: len() takes 1 argument (2 given)"
    );
    assert_eq!(
        arity_mismatch("floordiv", 2, 0).to_string(),
        "TypeError: floordiv() takes 2 arguments (0 given)"
    );
    assert_eq!(
        not_implemented("x").to_string(),
        "NotImplementedError: x is not supported"
    );
}

#[test]
fn with_span_keeps_first_location() {
    let err = division_by_zero()
        .with_span(Span::new(1, 4))
        .with_span(Span::new(0, 9));
    assert_eq!(err.span, Some(Span::new(1, 4)));

    let err = syntax_error("unexpected token", Span::new(3, 4));
    assert_eq!(err.span, Some(Span::new(3, 4)));
}
