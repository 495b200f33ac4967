use super::*;
use crate::ErrorCategory;
use pretty_assertions::assert_eq;

#[test]
fn constructors_start_at_refcount_one() {
    for value in [
        Value::none(),
        Value::bool(true),
        Value::int(1),
        Value::float(1.5),
        Value::string("s"),
        Value::list(vec![]),
    ] {
        assert_eq!(value.refcount(), 1);
    }
}

#[test]
fn incref_and_decref_track_handles() {
    let a = Value::int(42);
    let b = a.incref();
    let c = b.clone();
    assert_eq!(a.refcount(), 3);
    assert!(a.ptr_eq(&c));

    c.decref();
    assert_eq!(a.refcount(), 2);
    drop(b);
    assert_eq!(a.refcount(), 1);
}

#[test]
fn live_count_returns_to_baseline() {
    let baseline = live_values();
    let a = Value::int(1);
    let b = a.incref();
    assert_eq!(live_values(), baseline + 1);

    a.decref();
    assert_eq!(live_values(), baseline + 1);
    b.decref();
    assert_eq!(live_values(), baseline);
}

#[test]
fn list_release_is_recursive() {
    let baseline = live_values();
    let shared = Value::string("shared");
    let list = Value::list(vec![Value::int(1), shared.incref(), Value::float(2.0)]);
    assert_eq!(live_values(), baseline + 4);
    assert_eq!(shared.refcount(), 2);

    list.decref();
    assert_eq!(live_values(), baseline + 1);
    assert_eq!(shared.refcount(), 1);

    drop(shared);
    assert_eq!(live_values(), baseline);
}

#[test]
fn payload_as_checks_tag() {
    let value = Value::int(7);
    assert!(matches!(value.payload_as(Tag::Int), Ok(Payload::Int(7))));

    let err = value.payload_as(Tag::Str).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert_eq!(err.message, "expected str, got int");
}

#[test]
fn typed_accessors() {
    assert_eq!(Value::int(3).as_int().unwrap(), 3);
    assert_eq!(Value::float(0.25).as_float().unwrap(), 0.25);
    assert!(Value::bool(true).as_bool().unwrap());
    assert_eq!(Value::string("hi").as_str().unwrap(), "hi");
    assert_eq!(Value::list(vec![Value::none()]).as_list().unwrap().len(), 1);
    assert!(Value::none().is_none());

    assert_eq!(
        Value::float(1.0).as_int().unwrap_err().category(),
        ErrorCategory::TypeError
    );
}

#[test]
fn equality_is_structural_and_tag_strict() {
    assert_eq!(Value::int(1), Value::int(1));
    assert_ne!(Value::int(1), Value::float(1.0));
    assert_ne!(Value::int(1), Value::bool(true));
    assert_eq!(
        Value::list(vec![Value::string("a")]),
        Value::list(vec![Value::string("a")])
    );
    assert_ne!(Value::float(f64::NAN), Value::float(f64::NAN));
}

#[test]
fn display_matches_python_str() {
    assert_eq!(Value::none().to_string(), "None");
    assert_eq!(Value::bool(false).to_string(), "False");
    assert_eq!(Value::int(-4).to_string(), "-4");
    assert_eq!(Value::float(4.0).to_string(), "4.0");
    assert_eq!(Value::float(2.75).to_string(), "2.75");
    assert_eq!(Value::float(f64::INFINITY).to_string(), "inf");
    assert_eq!(Value::string("hello").to_string(), "hello");
}

#[test]
fn debug_matches_python_repr() {
    assert_eq!(format!("{:?}", Value::string("hello")), "'hello'");
    assert_eq!(format!("{:?}", Value::string("it's")), "\"it's\"");
    assert_eq!(format!("{:?}", Value::string("a\nb")), "'a\\nb'");
    assert_eq!(
        format!(
            "{:?}",
            Value::list(vec![Value::int(1), Value::string("x"), Value::none()])
        ),
        "[1, 'x', None]"
    );
}

#[test]
fn tag_names() {
    assert_eq!(Tag::None.to_string(), "NoneType");
    assert_eq!(Value::list(vec![]).tag(), Tag::List);
    assert_eq!(Value::string("").tag().name(), "str");
}

#[test]
fn float_repr_switches_to_exponent_form() {
    let repr = |x: f64| format!("{:?}", Value::float(x));
    assert_eq!(repr(1e16), "1e+16");
    assert_eq!(repr(1e22), "1e+22");
    assert_eq!(repr(1e-7), "1e-07");
    assert_eq!(repr(-1.5e300), "-1.5e+300");
    assert_eq!(repr(1.2345e-5), "1.2345e-05");
    assert_eq!(repr(1e15), "1000000000000000.0");
    assert_eq!(repr(0.0001), "0.0001");
    assert_eq!(repr(-0.0), "-0.0");
    assert_eq!(repr(0.1), "0.1");
}
