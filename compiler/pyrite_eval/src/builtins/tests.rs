use super::*;
use crate::print_handler::BufferPrintHandler;
use pretty_assertions::assert_eq;
use pyrite_value::ErrorCategory;

fn call(builtin: Builtin, args: &[Value]) -> EvalResult {
    builtin.call(args, &PrintHandlerImpl::Silent)
}

#[test]
fn lookup_by_name() {
    for builtin in Builtin::ALL {
        assert_eq!(Builtin::lookup(builtin.name()), Some(builtin));
    }
    assert_eq!(Builtin::lookup("eval"), None);
    assert_eq!(Builtin::lookup("Print"), None);
}

#[test]
fn print_writes_display_form() {
    let out = PrintHandlerImpl::Buffer(BufferPrintHandler::new());
    let result = Builtin::Print.call(&[Value::string("hi")], &out).unwrap();
    assert!(result.is_none());
    Builtin::Print.call(&[Value::float(4.0)], &out).unwrap();
    Builtin::Print.call(&[Value::none()], &out).unwrap();
    assert_eq!(out.get_output(), "hi\n4.0\nNone\n");
}

#[test]
fn len_counts_characters_and_elements() {
    assert_eq!(call(Builtin::Len, &[Value::string("héllo")]).unwrap(), Value::int(5));
    let list = Value::list(vec![Value::int(1), Value::none()]);
    assert_eq!(call(Builtin::Len, &[list]).unwrap(), Value::int(2));

    let err = call(Builtin::Len, &[Value::int(3)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
}

#[test]
fn abs_and_overflow() {
    assert_eq!(call(Builtin::Abs, &[Value::int(-3)]).unwrap(), Value::int(3));
    assert_eq!(call(Builtin::Abs, &[Value::float(-1.5)]).unwrap(), Value::float(1.5));
    let err = call(Builtin::Abs, &[Value::int(i64::MIN)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::OverflowError);
}

#[test]
fn floordiv_and_mod_match_operators() {
    assert_eq!(
        call(Builtin::FloorDiv, &[Value::int(-7), Value::int(2)]).unwrap(),
        Value::int(-4)
    );
    assert_eq!(
        call(Builtin::Mod, &[Value::int(-7), Value::int(2)]).unwrap(),
        Value::int(1)
    );
    let err = call(Builtin::Mod, &[Value::int(5), Value::int(0)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ZeroDivisionError);
}

#[test]
fn wrong_argument_count_is_type_error() {
    let err = call(Builtin::Abs, &[]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert_eq!(err.message, "abs() takes 1 argument (0 given)");
}
