//! Conversions between Rust types and runtime values.
//!
//! These traits are what lets an ordinary Rust function be registered:
//! parameter types implement [`FromValue`], return types implement
//! [`IntoResults`], and both report the [`TypeTag`] recorded in the
//! function's signature.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::ops::Deref;
use std::sync::Arc;

use crate::errors::{conversion_failed, float_out_of_range, integer_out_of_range, CallResult};
use crate::types::TypeTag;
use crate::value::{OpaqueValue, Value};

/// A Rust type with a declared runtime type.
pub trait ValueType {
    fn type_tag() -> TypeTag;
}

/// Extract a Rust value from a runtime value.
///
/// Called after the argument has passed `TypeTag::accepts`, so failures here
/// are limited to narrowing conversions (e.g. an `int` that does not fit
/// a `u8`).
pub trait FromValue: ValueType + Sized {
    fn from_value(value: &Value) -> CallResult<Self>;
}

/// Convert a Rust value into a runtime value.
pub trait IntoValue: ValueType + Sized {
    fn into_value(self) -> Value;
}

/// Convert a function's return value into the ordered result sequence.
pub trait IntoResults: Sized {
    /// Declared types of the produced values.
    fn result_types() -> Vec<TypeTag>;

    /// Produce the result values, or the function's own error message.
    fn into_results(self) -> Result<Vec<Value>, String>;
}

/// Trailing parameter collecting every remaining argument.
///
/// ```text
/// fn sum(xs: Variadic<i64>) -> i64 { xs.iter().sum() }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Variadic<T>(pub Vec<T>);

impl<T> Variadic<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: FromValue> Variadic<T> {
    /// Convert every value of the variadic tail.
    pub fn from_values(values: &[Value]) -> CallResult<Self> {
        values
            .iter()
            .map(T::from_value)
            .collect::<CallResult<Vec<_>>>()
            .map(Variadic)
    }
}

impl<T> Deref for Variadic<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> IntoIterator for Variadic<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Variadic<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A shared Rust value passed through the stores as `Value::Opaque`.
pub struct Opaque<T>(pub Arc<T>);

impl<T> Opaque<T> {
    pub fn new(value: T) -> Self {
        Opaque(Arc::new(value))
    }

    pub fn into_arc(self) -> Arc<T> {
        self.0
    }
}

impl<T> Clone for Opaque<T> {
    fn clone(&self) -> Self {
        Opaque(Arc::clone(&self.0))
    }
}

impl<T> Deref for Opaque<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Opaque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Opaque").field(&*self.0).finish()
    }
}

// Declared types

macro_rules! scalar_value_type {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(
            impl ValueType for $ty {
                fn type_tag() -> TypeTag {
                    TypeTag::$tag
                }
            }
        )*
    };
}

scalar_value_type!(
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    u64 => Int,
    usize => Int,
    f32 => Float,
    f64 => Float,
    String => Str,
    &str => Str,
    Value => Any,
);

impl<T: ValueType> ValueType for Vec<T> {
    fn type_tag() -> TypeTag {
        TypeTag::list(T::type_tag())
    }
}

impl<T: ValueType, S> ValueType for HashMap<String, T, S> {
    fn type_tag() -> TypeTag {
        TypeTag::map(T::type_tag())
    }
}

impl<T: ValueType> ValueType for Option<T> {
    fn type_tag() -> TypeTag {
        TypeTag::option(T::type_tag())
    }
}

impl<T: Any + Send + Sync> ValueType for Opaque<T> {
    fn type_tag() -> TypeTag {
        TypeTag::opaque::<T>()
    }
}

// FromValue

macro_rules! int_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                #[allow(clippy::useless_conversion, reason = "macro covers i64 itself")]
                fn from_value(value: &Value) -> CallResult<Self> {
                    match value {
                        Value::Int(n) => <$ty>::try_from(*n)
                            .map_err(|_| integer_out_of_range(*n, stringify!($ty))),
                        other => Err(conversion_failed(&TypeTag::Int, other.type_name())),
                    }
                }
            }
        )*
    };
}

int_from_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl FromValue for bool {
    fn from_value(value: &Value) -> CallResult<Self> {
        value
            .as_bool()
            .ok_or_else(|| conversion_failed(&TypeTag::Bool, value.type_name()))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> CallResult<Self> {
        value
            .as_float()
            .ok_or_else(|| conversion_failed(&TypeTag::Float, value.type_name()))
    }
}

// Precision loss is accepted; finite values beyond `f32::MAX` are rejected
// rather than saturating to infinity.
impl FromValue for f32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "range checked above; f32 parameters opt into the narrower precision"
    )]
    fn from_value(value: &Value) -> CallResult<Self> {
        let f = f64::from_value(value)?;
        if f.is_finite() && f.abs() > f64::from(f32::MAX) {
            return Err(float_out_of_range(f, "f32"));
        }
        Ok(f as f32)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> CallResult<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| conversion_failed(&TypeTag::Str, value.type_name()))
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> CallResult<Self> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> CallResult<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            other => Err(conversion_failed(&Self::type_tag(), other.type_name())),
        }
    }
}

impl<T: FromValue, S: BuildHasher + Default> FromValue for HashMap<String, T, S> {
    fn from_value(value: &Value) -> CallResult<Self> {
        match value {
            Value::Map(map) => map
                .iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k.clone(), v)))
                .collect(),
            other => Err(conversion_failed(&Self::type_tag(), other.type_name())),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> CallResult<Self> {
        match value {
            Value::Nil => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Any + Send + Sync> FromValue for Opaque<T> {
    fn from_value(value: &Value) -> CallResult<Self> {
        match value {
            Value::Opaque(o) => o
                .downcast_arc::<T>()
                .map(Opaque)
                .ok_or_else(|| conversion_failed(&Self::type_tag(), o.type_name())),
            other => Err(conversion_failed(&Self::type_tag(), other.type_name())),
        }
    }
}

// IntoValue

macro_rules! int_into_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoValue for $ty {
                #[allow(clippy::useless_conversion, reason = "macro covers i64 itself")]
                fn into_value(self) -> Value {
                    Value::Int(i64::from(self))
                }
            }
        )*
    };
}

int_into_value!(i8, i16, i32, i64, u8, u16, u32);

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Float(f64::from(self))
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::list(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: IntoValue, S> IntoValue for HashMap<String, T, S> {
    fn into_value(self) -> Value {
        Value::map(self.into_iter().map(|(k, v)| (k, v.into_value())).collect())
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Nil, IntoValue::into_value)
    }
}

impl<T: Any + Send + Sync> IntoValue for Opaque<T> {
    fn into_value(self) -> Value {
        Value::Opaque(OpaqueValue::from_arc(self.0))
    }
}

// IntoResults

macro_rules! single_result {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoResults for $ty {
                fn result_types() -> Vec<TypeTag> {
                    vec![<$ty as ValueType>::type_tag()]
                }

                fn into_results(self) -> Result<Vec<Value>, String> {
                    Ok(vec![self.into_value()])
                }
            }
        )*
    };
}

single_result!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, String, &str, Value);

impl<T: IntoValue> IntoResults for Vec<T> {
    fn result_types() -> Vec<TypeTag> {
        vec![Self::type_tag()]
    }

    fn into_results(self) -> Result<Vec<Value>, String> {
        Ok(vec![self.into_value()])
    }
}

impl<T: IntoValue, S> IntoResults for HashMap<String, T, S> {
    fn result_types() -> Vec<TypeTag> {
        vec![Self::type_tag()]
    }

    fn into_results(self) -> Result<Vec<Value>, String> {
        Ok(vec![self.into_value()])
    }
}

impl<T: IntoValue> IntoResults for Option<T> {
    fn result_types() -> Vec<TypeTag> {
        vec![Self::type_tag()]
    }

    fn into_results(self) -> Result<Vec<Value>, String> {
        Ok(vec![self.into_value()])
    }
}

impl<T: Any + Send + Sync> IntoResults for Opaque<T> {
    fn result_types() -> Vec<TypeTag> {
        vec![Self::type_tag()]
    }

    fn into_results(self) -> Result<Vec<Value>, String> {
        Ok(vec![self.into_value()])
    }
}

impl IntoResults for () {
    fn result_types() -> Vec<TypeTag> {
        Vec::new()
    }

    fn into_results(self) -> Result<Vec<Value>, String> {
        Ok(Vec::new())
    }
}

macro_rules! tuple_results {
    ($($name:ident),+) => {
        impl<$($name: IntoValue),+> IntoResults for ($($name,)+) {
            fn result_types() -> Vec<TypeTag> {
                vec![$($name::type_tag()),+]
            }

            #[allow(non_snake_case, reason = "bindings reuse the type parameter names")]
            fn into_results(self) -> Result<Vec<Value>, String> {
                let ($($name,)+) = self;
                Ok(vec![$($name.into_value()),+])
            }
        }
    };
}

tuple_results!(A, B);
tuple_results!(A, B, C);
tuple_results!(A, B, C, D);

/// `Ok` yields the inner results; `Err` fails the invocation.
impl<T: IntoResults, E: fmt::Display> IntoResults for Result<T, E> {
    fn result_types() -> Vec<TypeTag> {
        T::result_types()
    }

    fn into_results(self) -> Result<Vec<Value>, String> {
        match self {
            Ok(v) => v.into_results(),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
