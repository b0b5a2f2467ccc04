use super::*;
use crate::errors::{CallErrorKind, ErrorClass};

#[derive(Debug, PartialEq)]
struct Config {
    retries: u32,
}

mod declared_types {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalars() {
        assert_eq!(i32::type_tag(), TypeTag::Int);
        assert_eq!(u64::type_tag(), TypeTag::Int);
        assert_eq!(f32::type_tag(), TypeTag::Float);
        assert_eq!(String::type_tag(), TypeTag::Str);
        assert_eq!(<&str>::type_tag(), TypeTag::Str);
        assert_eq!(Value::type_tag(), TypeTag::Any);
    }

    #[test]
    fn containers() {
        assert_eq!(Vec::<i64>::type_tag(), TypeTag::list(TypeTag::Int));
        assert_eq!(
            HashMap::<String, String>::type_tag(),
            TypeTag::map(TypeTag::Str)
        );
        assert_eq!(
            Option::<Vec<f64>>::type_tag(),
            TypeTag::option(TypeTag::list(TypeTag::Float))
        );
        assert_eq!(Opaque::<Config>::type_tag(), TypeTag::opaque::<Config>());
    }
}

mod from_value {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integers_narrow_with_range_check() {
        assert_eq!(i64::from_value(&Value::int(-5)), Ok(-5));
        assert_eq!(u8::from_value(&Value::int(255)), Ok(255));
        let err = u8::from_value(&Value::int(256)).unwrap_err();
        assert_eq!(
            err.kind,
            CallErrorKind::IntegerOutOfRange {
                value: 256,
                target: "u8".to_string()
            }
        );
        assert!(usize::from_value(&Value::int(-1)).is_err());
    }

    #[test]
    fn wrong_kind_is_a_type_mismatch() {
        let err = i64::from_value(&Value::string("1")).unwrap_err();
        assert_eq!(err.class(), ErrorClass::TypeMismatch);
        assert_eq!(err.message, "cannot convert str to int");
        assert!(f64::from_value(&Value::int(1)).is_err());
        assert!(bool::from_value(&Value::Nil).is_err());
    }

    #[test]
    fn strings_and_floats() {
        assert_eq!(
            String::from_value(&Value::string("abc")),
            Ok("abc".to_string())
        );
        assert_eq!(f64::from_value(&Value::Float(2.5)), Ok(2.5));
        assert_eq!(f32::from_value(&Value::Float(0.5)), Ok(0.5));
    }

    #[test]
    fn f32_rejects_finite_values_beyond_its_range() {
        let err = f32::from_value(&Value::Float(1e300)).unwrap_err();
        assert_eq!(err.class(), ErrorClass::TypeMismatch);
        assert_eq!(
            err.kind,
            CallErrorKind::FloatOutOfRange {
                value: 1e300_f64.to_string(),
                target: "f32".to_string()
            }
        );
        assert_eq!(
            f32::from_value(&Value::Float(f64::from(f32::MAX))),
            Ok(f32::MAX)
        );
        assert_eq!(
            f32::from_value(&Value::Float(f64::NEG_INFINITY)),
            Ok(f32::NEG_INFINITY)
        );
    }

    #[test]
    fn lists_and_maps() {
        let list = Value::list(vec![Value::int(1), Value::int(2)]);
        assert_eq!(Vec::<i32>::from_value(&list), Ok(vec![1, 2]));

        let map = Value::map_from([("a", Value::int(2))]);
        let got: HashMap<String, i64> = HashMap::from_value(&map).unwrap();
        assert_eq!(got.get("a"), Some(&2));

        assert!(Vec::<i64>::from_value(&map).is_err());
    }

    #[test]
    fn option_maps_nil_to_none() {
        assert_eq!(Option::<i64>::from_value(&Value::Nil), Ok(None));
        assert_eq!(Option::<i64>::from_value(&Value::int(4)), Ok(Some(4)));
    }

    #[test]
    fn opaque_round_trips_by_handle() {
        let stored = Value::opaque(Config { retries: 3 });
        let got = Opaque::<Config>::from_value(&stored).unwrap();
        assert_eq!(got.retries, 3);
        assert!(Opaque::<String>::from_value(&stored).is_err());
        assert_eq!(Opaque::new(Config { retries: 1 }).into_value().type_name(), stored.type_name());
    }

    #[test]
    fn variadic_converts_every_value() {
        let values = [Value::int(1), Value::int(2), Value::int(3)];
        let tail = Variadic::<i64>::from_values(&values).unwrap();
        assert_eq!(tail.iter().sum::<i64>(), 6);
        assert_eq!(tail.len(), 3);

        let bad = [Value::int(1), Value::string("2")];
        assert!(Variadic::<i64>::from_values(&bad).is_err());
        assert!(Variadic::<i64>::from_values(&[]).unwrap().is_empty());
    }
}

mod into_results {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unit_produces_nothing() {
        assert_eq!(().into_results(), Ok(vec![]));
        assert!(<()>::result_types().is_empty());
    }

    #[test]
    fn single_values() {
        assert_eq!(8i64.into_results(), Ok(vec![Value::int(8)]));
        assert_eq!("x".into_results(), Ok(vec![Value::string("x")]));
        assert_eq!(
            vec![1u8, 2].into_results(),
            Ok(vec![Value::list(vec![Value::int(1), Value::int(2)])])
        );
        assert_eq!(None::<i64>.into_results(), Ok(vec![Value::Nil]));
    }

    #[test]
    fn tuples_produce_multiple_values() {
        assert_eq!(
            (3i64, "ok").into_results(),
            Ok(vec![Value::int(3), Value::string("ok")])
        );
        assert_eq!(
            <(i64, bool, f64)>::result_types(),
            vec![TypeTag::Int, TypeTag::Bool, TypeTag::Float]
        );
    }

    #[test]
    fn results_surface_the_error_message() {
        let ok: Result<i64, String> = Ok(3);
        assert_eq!(ok.into_results(), Ok(vec![Value::int(3)]));

        let err: Result<i64, String> = Err("divide by zero".to_string());
        assert_eq!(err.into_results(), Err("divide by zero".to_string()));

        assert_eq!(
            <Result<(i64, i64), String>>::result_types(),
            vec![TypeTag::Int, TypeTag::Int]
        );
    }
}
