//! Declared parameter types and runtime assignability.

use std::any::{Any, TypeId};
use std::fmt;

use crate::value::Value;

/// Declared type of a function parameter, variadic tail or return value.
///
/// Recorded once when a function is registered. At call time each argument
/// is checked with [`TypeTag::accepts`] before the function runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeTag {
    /// Accepts every value, including `Nil`.
    Any,
    /// Only the absent value.
    Nil,
    Bool,
    Int,
    Float,
    Str,
    /// List whose every element is accepted by the inner tag.
    List(Box<TypeTag>),
    /// Map whose every value is accepted by the inner tag.
    Map(Box<TypeTag>),
    /// `Nil`, or anything the inner tag accepts.
    Option(Box<TypeTag>),
    /// A specific Rust type carried as `Value::Opaque`.
    Opaque { id: TypeId, name: &'static str },
}

impl TypeTag {
    pub fn list(elem: TypeTag) -> Self {
        TypeTag::List(Box::new(elem))
    }

    pub fn map(elem: TypeTag) -> Self {
        TypeTag::Map(Box::new(elem))
    }

    pub fn option(inner: TypeTag) -> Self {
        TypeTag::Option(Box::new(inner))
    }

    pub fn opaque<T: Any>() -> Self {
        TypeTag::Opaque {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Check whether `value` may be passed where this type is declared.
    ///
    /// Scalars require the exact runtime kind (`int` is not assignable to
    /// `float`). Containers are checked element by element.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (TypeTag::Any, _)
            | (TypeTag::Nil, Value::Nil)
            | (TypeTag::Bool, Value::Bool(_))
            | (TypeTag::Int, Value::Int(_))
            | (TypeTag::Float, Value::Float(_))
            | (TypeTag::Str, Value::Str(_)) => true,
            (TypeTag::Option(inner), v) => v.is_nil() || inner.accepts(v),
            (TypeTag::List(elem), Value::List(items)) => items.iter().all(|v| elem.accepts(v)),
            (TypeTag::Map(elem), Value::Map(map)) => map.values().all(|v| elem.accepts(v)),
            (TypeTag::Opaque { id, .. }, Value::Opaque(o)) => o.type_id() == *id,
            _ => false,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Any => write!(f, "any"),
            TypeTag::Nil => write!(f, "nil"),
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::Int => write!(f, "int"),
            TypeTag::Float => write!(f, "float"),
            TypeTag::Str => write!(f, "str"),
            TypeTag::List(elem) => write!(f, "list<{elem}>"),
            TypeTag::Map(elem) => write!(f, "map<{elem}>"),
            TypeTag::Option(inner) => write!(f, "option<{inner}>"),
            TypeTag::Opaque { name, .. } => write!(f, "{name}"),
        }
    }
}
