use super::*;
use callreg_value::{CallErrorKind, ErrorClass, Opaque, TypeTag};
use pretty_assertions::assert_eq;

fn handle<M, F: IntoCallable<M>>(name: &str, f: F) -> Arc<dyn Callable> {
    f.into_callable(name)
}

fn add(a: i64, b: i64) -> i64 {
    a + b
}

fn sum(xs: Variadic<i64>) -> i64 {
    xs.iter().sum()
}

fn join(sep: String, parts: Variadic<String>) -> String {
    parts.into_inner().join(&sep)
}

fn divide(a: f64, b: f64) -> Result<f64, String> {
    if b.abs() < f64::EPSILON {
        Err("division by zero".to_string())
    } else {
        Ok(a / b)
    }
}

fn split_pair(s: String) -> (String, String) {
    match s.split_once('=') {
        Some((k, v)) => (k.to_string(), v.to_string()),
        None => (s, String::new()),
    }
}

#[test]
fn fixed_signature_is_recorded() {
    let f = handle("add", add);
    assert_eq!(f.name(), Some("add"));
    assert_eq!(
        f.signature(),
        &Signature::new(vec![TypeTag::Int, TypeTag::Int]).with_returns(vec![TypeTag::Int])
    );
    assert_eq!(
        f.call(&[Value::int(6), Value::int(2)]).unwrap(),
        vec![Value::int(8)]
    );
}

#[test]
fn zero_arity() {
    let f = handle("answer", || 42_i64);
    assert!(f.signature().params.is_empty());
    assert_eq!(f.call(&[]).unwrap(), vec![Value::int(42)]);
    assert_eq!(
        f.call(&[Value::Nil]).unwrap_err().kind,
        CallErrorKind::ArgumentCountMismatch {
            expected: 0,
            got: 1
        }
    );
}

#[test]
fn unit_return_yields_no_values() {
    let f = handle("noop", |_: i64| ());
    assert!(f.signature().returns.is_empty());
    assert!(f.call(&[Value::int(1)]).unwrap().is_empty());
}

#[test]
fn variadic_only() {
    let f = handle("sum", sum);
    assert!(f.signature().params.is_empty());
    assert_eq!(f.signature().variadic, Some(TypeTag::Int));
    assert_eq!(f.call(&[]).unwrap(), vec![Value::int(0)]);
    assert_eq!(
        f.call(&[Value::int(2), Value::int(5)]).unwrap(),
        vec![Value::int(7)]
    );
}

#[test]
fn variadic_with_prefix() {
    let f = handle("join", join);
    assert_eq!(f.signature().to_string(), "(str, ...str) -> str");
    let got = f
        .call(&[
            Value::string("-"),
            Value::string("a"),
            Value::string("b"),
        ])
        .unwrap();
    assert_eq!(got, vec![Value::string("a-b")]);

    let err = f.call(&[]).unwrap_err();
    assert_eq!(err.message, "not enough arguments: expected at least 1, got 0");
}

#[test]
fn six_fixed_parameters() {
    let f = handle(
        "six",
        |a: i64, b: i64, c: i64, d: i64, e: i64, g: i64| a + b + c + d + e + g,
    );
    let args: Vec<Value> = (1..=6).map(Value::int).collect();
    assert_eq!(f.call(&args).unwrap(), vec![Value::int(21)]);
}

#[test]
fn function_error_becomes_call_failure() {
    let f = handle("divide", divide);
    assert_eq!(
        f.call(&[Value::Float(6.0), Value::Float(2.0)]).unwrap(),
        vec![Value::Float(3.0)]
    );
    let err = f
        .call(&[Value::Float(1.0), Value::Float(0.0)])
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::CallFailure);
    assert_eq!(err.message, "function divide failed: division by zero");
}

#[test]
fn tuple_return_yields_multiple_values() {
    let f = handle("split_pair", split_pair);
    assert_eq!(f.signature().returns, vec![TypeTag::Str, TypeTag::Str]);
    assert_eq!(
        f.call(&[Value::string("k=v")]).unwrap(),
        vec![Value::string("k"), Value::string("v")]
    );
}

#[test]
fn narrowing_conversion_fails_at_call_time() {
    let f = handle("byte", |b: u8| i64::from(b));
    assert_eq!(f.signature().params, vec![TypeTag::Int]);
    let err = f.call(&[Value::int(300)]).unwrap_err();
    assert_eq!(err.class(), ErrorClass::TypeMismatch);
    assert_eq!(
        err.message,
        "function: index 0 argument integer 300 out of range for u8"
    );
}

#[test]
fn narrowing_failure_names_the_argument_position() {
    let f = handle("f", |_a: i64, b: u64| b > 0);
    let err = f.call(&[Value::int(-1), Value::int(-1)]).unwrap_err();
    assert_eq!(err.class(), ErrorClass::TypeMismatch);
    assert_eq!(
        err.message,
        "function: index 1 argument integer -1 out of range for u64"
    );
    assert_eq!(
        err.kind,
        CallErrorKind::IntegerOutOfRange {
            value: -1,
            target: "u64".to_string()
        }
    );
}

#[test]
fn narrowing_failure_in_variadic_tail_uses_absolute_index() {
    let f = handle("bytes", |_first: i64, rest: Variadic<u8>| rest.is_empty());
    let err = f
        .call(&[Value::int(0), Value::int(1), Value::int(256)])
        .unwrap_err();
    assert_eq!(
        err.message,
        "variadic function: index 2 argument integer 256 out of range for u8"
    );

    let g = handle("only", |xs: Variadic<u8>| xs.is_empty());
    let err = g.call(&[Value::int(-3)]).unwrap_err();
    assert_eq!(
        err.message,
        "variadic function: index 0 argument integer -3 out of range for u8"
    );
}

#[test]
fn opaque_parameters_round_trip() {
    #[derive(Debug, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    let f = handle("norm1", |p: Opaque<Point>| p.x.abs() + p.y.abs());
    assert_eq!(f.signature().params, vec![TypeTag::opaque::<Point>()]);
    assert_eq!(
        f.call(&[Value::opaque(Point { x: -2, y: 3 })]).unwrap(),
        vec![Value::int(5)]
    );
}

#[test]
fn empty_name_is_derived() {
    let f = handle("", add);
    assert_eq!(f.name(), Some("add"));
}
