use super::*;
use crate::{live_values, ErrorCategory, Value};
use pretty_assertions::assert_eq;

#[test]
fn test_floor_div_rounds_toward_negative_infinity() {
    assert_eq!(floor_div(7, 2).unwrap(), 3);
    assert_eq!(floor_div(-7, 2).unwrap(), -4);
    assert_eq!(floor_div(7, -2).unwrap(), -4);
    assert_eq!(floor_div(-7, -2).unwrap(), 3);
    assert_eq!(floor_div(6, 3).unwrap(), 2);
}

#[test]
fn test_trunc_div_rounds_toward_zero() {
    assert_eq!(trunc_div(7, 2).unwrap(), 3);
    assert_eq!(trunc_div(-7, 2).unwrap(), -3);
    assert_eq!(trunc_div(7, -2).unwrap(), -3);
}

#[test]
fn test_modulo_takes_divisor_sign() {
    assert_eq!(modulo(-7, 2).unwrap(), 1);
    assert_eq!(modulo(7, -2).unwrap(), -1);
    assert_eq!(modulo(-7, -2).unwrap(), -1);
    assert_eq!(modulo(7, 2).unwrap(), 1);
    assert_eq!(modulo(i64::MIN, -1).unwrap(), 0);
}

#[test]
fn test_floor_div_and_modulo_agree() {
    for a in -9..=9 {
        for b in [-4, -3, -1, 1, 2, 5] {
            let q = floor_div(a, b).unwrap();
            let r = modulo(a, b).unwrap();
            assert_eq!(q * b + r, a, "a={a} b={b}");
        }
    }
}

#[test]
fn test_zero_divisor() {
    for result in [floor_div(5, 0), modulo(5, 0), trunc_div(5, 0)] {
        assert_eq!(
            result.unwrap_err().category(),
            ErrorCategory::ZeroDivisionError
        );
    }
    assert_eq!(
        float_binary(BinaryOp::Div, 1.0, 0.0).unwrap_err().category(),
        ErrorCategory::ZeroDivisionError
    );
    assert_eq!(
        float_modulo(1.0, 0.0).unwrap_err().category(),
        ErrorCategory::ZeroDivisionError
    );
}

#[test]
fn test_overflow() {
    assert_eq!(
        int_binary(BinaryOp::Add, i64::MAX, 1).unwrap_err().category(),
        ErrorCategory::OverflowError
    );
    assert_eq!(
        floor_div(i64::MIN, -1).unwrap_err().category(),
        ErrorCategory::OverflowError
    );
    assert_eq!(
        abs_value(&Value::int(i64::MIN)).unwrap_err().category(),
        ErrorCategory::OverflowError
    );
}

#[test]
fn test_float_floor_ops() {
    assert_eq!(float_floor_div(-7.0, 2.0).unwrap(), -4.0);
    assert_eq!(float_floor_div(7.5, 2.0).unwrap(), 3.0);
    assert_eq!(float_modulo(-7.0, 2.0).unwrap(), 1.0);
    assert_eq!(float_modulo(7.5, -2.0).unwrap(), -0.5);
}

#[test]
fn test_float_floor_div_by_infinity() {
    assert_eq!(float_floor_div(-1.0, f64::INFINITY).unwrap(), -1.0);
    assert_eq!(float_floor_div(1.0, f64::NEG_INFINITY).unwrap(), -1.0);
    assert_eq!(float_floor_div(1.0, f64::INFINITY).unwrap(), 0.0);
    assert_eq!(float_floor_div(-1.0, f64::NEG_INFINITY).unwrap(), 0.0);
    assert_eq!(float_floor_div(0.0, f64::INFINITY).unwrap(), 0.0);
}

#[test]
fn test_binary_op_values() {
    assert_eq!(
        binary_op(BinaryOp::Mul, &Value::int(6), &Value::int(7)).unwrap(),
        Value::int(42)
    );
    assert_eq!(
        binary_op(BinaryOp::Add, &Value::float(1.5), &Value::float(2.5)).unwrap(),
        Value::float(4.0)
    );
}

#[test]
fn test_binary_op_rejects_mixed_tags() {
    let cases = [
        (Value::int(1), Value::float(1.0)),
        (Value::string("a"), Value::string("b")),
        (Value::bool(true), Value::int(1)),
        (Value::none(), Value::none()),
    ];
    for (left, right) in &cases {
        let err = binary_op(BinaryOp::Add, left, right).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::TypeError);
    }

    let err = binary_op(BinaryOp::Add, &Value::int(1), &Value::string("x")).unwrap_err();
    assert_eq!(
        err.message,
        "unsupported operand type(s) for +: 'int' and 'str'"
    );
}

#[test]
fn test_binary_op_leaves_operands_owned_by_caller() {
    let baseline = live_values();
    let left = Value::int(2);
    let right = Value::int(3);
    let result = binary_op(BinaryOp::Sub, &left, &right).unwrap();
    assert_eq!(left.refcount(), 1);
    assert_eq!(live_values(), baseline + 3);

    drop((left, right, result));
    assert_eq!(live_values(), baseline);

    let left = Value::int(2);
    let right = Value::int(0);
    assert!(binary_op(BinaryOp::Mod, &left, &right).is_err());
    drop((left, right));
    assert_eq!(live_values(), baseline);
}

#[test]
fn test_length() {
    assert_eq!(length(&Value::string("héllo")).unwrap(), 5);
    assert_eq!(
        length(&Value::list(vec![Value::int(1), Value::int(2)])).unwrap(),
        2
    );
    assert_eq!(
        length(&Value::int(3)).unwrap_err().category(),
        ErrorCategory::TypeError
    );
}
