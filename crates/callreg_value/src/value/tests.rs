use super::*;
use pretty_assertions::assert_eq;

#[derive(Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[test]
fn type_names() {
    assert_eq!(Value::Nil.type_name(), "nil");
    assert_eq!(Value::Bool(true).type_name(), "bool");
    assert_eq!(Value::int(1).type_name(), "int");
    assert_eq!(Value::Float(1.5).type_name(), "float");
    assert_eq!(Value::string("a").type_name(), "str");
    assert_eq!(Value::list(vec![]).type_name(), "list");
    assert_eq!(Value::map(ValueMap::default()).type_name(), "map");
    assert!(Value::opaque(Point { x: 1, y: 2 })
        .type_name()
        .ends_with("Point"));
}

#[test]
fn accessors_match_only_their_variant() {
    let v = Value::int(7);
    assert_eq!(v.as_int(), Some(7));
    assert_eq!(v.as_float(), None);
    assert_eq!(v.as_str(), None);

    let s = Value::string("hi");
    assert_eq!(s.as_str(), Some("hi"));
    assert_eq!(s.as_int(), None);

    let l = Value::list(vec![Value::int(1), Value::int(2)]);
    assert_eq!(l.as_list().map(<[Value]>::len), Some(2));
    assert!(Value::Nil.is_nil());
    assert!(!Value::Bool(false).is_nil());
}

#[test]
fn map_from_builds_string_keys() {
    let m = Value::map_from([("a", Value::int(2)), ("b", Value::int(5))]);
    let map = m.as_map().cloned().unwrap_or_default();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("a"), Some(&Value::int(2)));
    assert_eq!(map.get("b"), Some(&Value::int(5)));
}

#[test]
fn equality_is_structural_for_data() {
    assert_eq!(
        Value::list(vec![Value::int(1), Value::string("x")]),
        Value::list(vec![Value::int(1), Value::string("x")])
    );
    assert_ne!(Value::int(1), Value::Float(1.0));
    assert_ne!(Value::Nil, Value::Bool(false));
}

#[test]
fn opaque_equality_is_identity() {
    let a = Value::opaque(Point { x: 1, y: 2 });
    let b = Value::opaque(Point { x: 1, y: 2 });
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}

#[test]
fn opaque_downcast() {
    let v = Value::opaque(Point { x: 3, y: 4 });
    assert_eq!(v.downcast_ref::<Point>(), Some(&Point { x: 3, y: 4 }));
    assert_eq!(v.downcast_ref::<String>(), None);
    assert_eq!(Value::int(1).downcast_ref::<i64>(), None);
}

#[test]
fn display_formats() {
    assert_eq!(Value::Nil.to_string(), "nil");
    assert_eq!(Value::string("a").to_string(), "\"a\"");
    assert_eq!(Value::string("a").display_value(), "a");
    assert_eq!(
        Value::list(vec![Value::int(1), Value::Bool(true)]).to_string(),
        "[1, true]"
    );
}

#[test]
fn clone_shares_heap_storage() {
    let v = Value::list(vec![Value::int(1)]);
    let w = v.clone();
    match (&v, &w) {
        (Value::List(a), Value::List(b)) => assert!(Heap::ptr_eq(a, b)),
        _ => panic!("expected lists"),
    }
}
