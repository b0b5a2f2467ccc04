//! Runtime values handed between the stores, the option pipeline and
//! registered functions.
//!
//! # Heap Enforcement
//!
//! All heap allocations go through factory methods on `Value`. The `Heap<T>`
//! wrapper has a private constructor, so external code cannot build heap
//! values directly.
//!
//! ```text
//! let s = Value::string("hello");                  // OK
//! let list = Value::list(vec![Value::int(1)]);     // OK
//! let s = Value::Str(Heap::new("hello".into()));   // ERROR: Heap::new is pub(super)
//! ```

mod heap;
mod opaque;

use std::any::Any;
use std::fmt;

use rustc_hash::FxHashMap;

pub use heap::Heap;
pub use opaque::OpaqueValue;

/// Map payload of `Value::Map`. Iteration order is unspecified.
pub type ValueMap = FxHashMap<String, Value>;

/// Runtime value stored under an argument name.
#[derive(Clone)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// Absent value. Assignable only to `any` and `option<T>` parameters.
    Nil,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),

    // Heap types
    /// String value.
    Str(Heap<String>),
    /// List of values.
    List(Heap<Vec<Value>>),
    /// Map from string keys to values.
    Map(Heap<ValueMap>),

    /// Any other Rust value, compared by identity.
    Opaque(OpaqueValue),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    /// Create an integer value.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    ///
    /// ```text
    /// let nums = Value::list(vec![Value::int(1), Value::int(2)]);
    /// ```
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a map value.
    #[inline]
    pub fn map(entries: ValueMap) -> Self {
        Value::Map(Heap::new(entries))
    }

    /// Create a map value from key/value pairs.
    ///
    /// ```text
    /// let m = Value::map_from([("a", Value::int(2)), ("b", Value::int(5))]);
    /// ```
    pub fn map_from<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Wrap an arbitrary Rust value.
    #[inline]
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Value::Opaque(OpaqueValue::new(value))
    }
}

// Value Methods

impl Value {
    /// Check whether this is the absent value.
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Try to convert to an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to convert to a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to convert to a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to convert to a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert to a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to convert to a map.
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the wrapped Rust value of an opaque value.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Opaque(o) => o.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Get the runtime type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Opaque(o) => o.type_name(),
        }
    }

    /// Display value for user output (strings without quotes).
    pub fn display_value(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Map(map) => write!(f, "Map({:?})", &**map),
            Value::Opaque(o) => write!(f, "{o:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "\"{}\"", &**s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{k}\": {v}")?;
                }
                write!(f, "}}")
            }
            Value::Opaque(o) => write!(f, "<{}>", o.type_name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
