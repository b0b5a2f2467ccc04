//! Typed Rust functions as callable handles.
//!
//! `IntoCallable` is implemented for every `Fn` taking up to six
//! [`FromValue`] parameters, optionally followed by a trailing
//! [`Variadic<T>`] parameter, and returning an [`IntoResults`] type. The
//! marker parameter keeps the impls for different shapes apart; callers never
//! name it.
//!
//! ```text
//! fn sum(xs: Variadic<i64>) -> i64 { xs.iter().sum() }
//! fn divide(a: f64, b: f64) -> Result<f64, String> { ... }
//!
//! registry.add_function("sum", sum, &[]);
//! registry.add_function("divide", divide, &["a", "b"]);
//! registry.add_function("add", |a: i64, b: i64| a + b, &[]);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use callreg_value::{
    argument_count_mismatch, function_failed, not_enough_arguments, CallResult, FromValue,
    IntoResults, Value, ValueType, Variadic,
};

use super::naming::derive_name;
use super::{Callable, Signature};

/// Marker for functions whose parameters are all fixed.
pub struct Fixed<Args>(PhantomData<fn() -> Args>);

/// Marker for functions with fixed parameters and a variadic tail of `V`.
pub struct WithVariadic<Args, V>(PhantomData<fn() -> (Args, V)>);

/// Conversion of a Rust function into a shared callable handle.
pub trait IntoCallable<Marker>: Send + Sync + 'static {
    /// Build the handle. An empty `name` derives one from the function type.
    fn into_callable(self, name: &str) -> Arc<dyn Callable>;
}

type Invoker = Box<dyn Fn(&[Value]) -> CallResult<Result<Vec<Value>, String>> + Send + Sync>;

/// Handle built by [`IntoCallable`].
///
/// Argument conversion errors name the failing position; an `Err` returned by
/// the function itself becomes a call failure naming the function.
pub struct TypedFunction {
    name: String,
    signature: Signature,
    invoke: Invoker,
}

impl TypedFunction {
    fn new<F: ?Sized>(name: &str, signature: Signature, invoke: Invoker) -> Self {
        let name = if name.is_empty() {
            derive_name::<F>()
        } else {
            name.to_string()
        };
        TypedFunction {
            name,
            signature,
            invoke,
        }
    }
}

impl Callable for TypedFunction {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, args: &[Value]) -> CallResult<Vec<Value>> {
        (self.invoke)(args)?.map_err(|message| function_failed(&self.name, &message))
    }
}

impl fmt::Debug for TypedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedFunction")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

// Narrowing (`-1` into a `u64`) passes the declared-type check and only fails
// here, so the error carries the position itself.
fn argument<T: FromValue>(value: &Value, index: usize) -> CallResult<T> {
    T::from_value(value).map_err(|e| e.at_argument(index, false))
}

fn variadic_tail<T: FromValue>(rest: &[Value], offset: usize) -> CallResult<Variadic<T>> {
    rest.iter()
        .enumerate()
        .map(|(i, v)| T::from_value(v).map_err(|e| e.at_argument(offset + i, true)))
        .collect::<CallResult<Vec<_>>>()
        .map(Variadic)
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

macro_rules! fixed_arity {
    ($($ty:ident $val:ident $idx:literal),*) => {
        impl<Func, Ret, $($ty,)*> IntoCallable<Fixed<($($ty,)*)>> for Func
        where
            Func: Fn($($ty),*) -> Ret + Send + Sync + 'static,
            Ret: IntoResults,
            $($ty: FromValue + 'static,)*
        {
            fn into_callable(self, name: &str) -> Arc<dyn Callable> {
                let signature = Signature::new(vec![$(<$ty as ValueType>::type_tag()),*])
                    .with_returns(Ret::result_types());
                let invoke: Invoker = Box::new(move |args: &[Value]| {
                    let [$($val),*] = args else {
                        return Err(argument_count_mismatch(count!($($ty)*), args.len()));
                    };
                    Ok((self)($(argument::<$ty>($val, $idx)?),*).into_results())
                });
                Arc::new(TypedFunction::new::<Func>(name, signature, invoke))
            }
        }
    };
}

macro_rules! variadic_arity {
    ($($ty:ident $val:ident $idx:literal),+) => {
        impl<Func, Ret, $($ty,)+ V> IntoCallable<WithVariadic<($($ty,)+), V>> for Func
        where
            Func: Fn($($ty,)+ Variadic<V>) -> Ret + Send + Sync + 'static,
            Ret: IntoResults,
            $($ty: FromValue + 'static,)+
            V: FromValue + 'static,
        {
            fn into_callable(self, name: &str) -> Arc<dyn Callable> {
                let signature = Signature::new(vec![$(<$ty as ValueType>::type_tag()),+])
                    .with_variadic(V::type_tag())
                    .with_returns(Ret::result_types());
                let invoke: Invoker = Box::new(move |args: &[Value]| {
                    let [$($val,)+ rest @ ..] = args else {
                        return Err(not_enough_arguments(count!($($ty)+), args.len()));
                    };
                    Ok((self)(
                        $(argument::<$ty>($val, $idx)?,)+
                        variadic_tail(rest, count!($($ty)+))?,
                    )
                    .into_results())
                });
                Arc::new(TypedFunction::new::<Func>(name, signature, invoke))
            }
        }
    };
}

fixed_arity!();
fixed_arity!(A a 0);
fixed_arity!(A a 0, B b 1);
fixed_arity!(A a 0, B b 1, C c 2);
fixed_arity!(A a 0, B b 1, C c 2, D d 3);
fixed_arity!(A a 0, B b 1, C c 2, D d 3, E e 4);
fixed_arity!(A a 0, B b 1, C c 2, D d 3, E e 4, G g 5);

// A variadic tail with no fixed prefix accepts any slice.
impl<Func, Ret, V> IntoCallable<WithVariadic<(), V>> for Func
where
    Func: Fn(Variadic<V>) -> Ret + Send + Sync + 'static,
    Ret: IntoResults,
    V: FromValue + 'static,
{
    fn into_callable(self, name: &str) -> Arc<dyn Callable> {
        let signature = Signature::new(Vec::new())
            .with_variadic(V::type_tag())
            .with_returns(Ret::result_types());
        let invoke: Invoker =
            Box::new(move |args: &[Value]| Ok((self)(variadic_tail(args, 0)?).into_results()));
        Arc::new(TypedFunction::new::<Func>(name, signature, invoke))
    }
}

variadic_arity!(A a 0);
variadic_arity!(A a 0, B b 1);
variadic_arity!(A a 0, B b 1, C c 2);
variadic_arity!(A a 0, B b 1, C c 2, D d 3);
variadic_arity!(A a 0, B b 1, C c 2, D d 3, E e 4);
variadic_arity!(A a 0, B b 1, C c 2, D d 3, E e 4, G g 5);

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
