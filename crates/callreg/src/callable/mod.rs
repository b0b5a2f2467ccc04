//! Callable handles and their declared signatures.
//!
//! A registered function is stored as an `Arc<dyn Callable>`. Typed Rust
//! functions and closures become handles through [`IntoCallable`], which
//! records the [`Signature`] once at registration. Hand-built handles use
//! [`NativeFunction`] with an explicit signature.

mod naming;
mod typed;

use std::fmt;

use callreg_value::{
    argument_count_mismatch, not_enough_arguments, type_mismatch, CallResult, TypeTag, Value,
};

pub use naming::derive_name;
pub use typed::{Fixed, IntoCallable, TypedFunction, WithVariadic};

/// Declared parameter, variadic and return types of a callable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    /// Fixed parameters, in order.
    pub params: Vec<TypeTag>,
    /// Element type of the variadic tail, if the callable has one.
    pub variadic: Option<TypeTag>,
    /// Declared return types, one per result value.
    pub returns: Vec<TypeTag>,
}

impl Signature {
    pub fn new(params: Vec<TypeTag>) -> Self {
        Signature {
            params,
            variadic: None,
            returns: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_variadic(mut self, elem: TypeTag) -> Self {
        self.variadic = Some(elem);
        self
    }

    #[must_use]
    pub fn with_returns(mut self, returns: Vec<TypeTag>) -> Self {
        self.returns = returns;
        self
    }

    #[inline]
    pub fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }

    /// Check the number of flattened arguments.
    ///
    /// A variadic callable needs at least its fixed parameters; any other
    /// callable needs exactly its parameters.
    pub fn check_arity(&self, got: usize) -> CallResult<()> {
        let required = self.params.len();
        match self.variadic {
            Some(_) if got < required => Err(not_enough_arguments(required, got)),
            None if got != required => Err(argument_count_mismatch(required, got)),
            _ => Ok(()),
        }
    }

    /// Check every argument against its declared type.
    ///
    /// Fixed positions are checked first, then every value from the first
    /// variadic position on against the variadic element type. Assumes
    /// [`Signature::check_arity`] passed.
    pub fn check_types(&self, args: &[Value]) -> CallResult<()> {
        for (index, (expected, value)) in self.params.iter().zip(args).enumerate() {
            if !expected.accepts(value) {
                return Err(type_mismatch(index, value.type_name(), expected, false));
            }
        }

        if let Some(elem) = &self.variadic {
            let start = self.params.len();
            for (index, value) in args.iter().enumerate().skip(start) {
                if !elem.accepts(value) {
                    return Err(type_mismatch(index, value.type_name(), elem, true));
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        if let Some(elem) = &self.variadic {
            if !self.params.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "...{elem}")?;
        }
        write!(f, ")")?;

        match self.returns.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " -> {single}"),
            many => {
                write!(f, " -> (")?;
                for (i, ret) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{ret}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A function that can be invoked by name.
///
/// Handles are immutable once registered and shared between threads.
pub trait Callable: Send + Sync {
    /// The handle's own name, used when registered under an empty name.
    fn name(&self) -> Option<&str>;

    fn signature(&self) -> &Signature;

    /// Call with arguments that already passed the signature checks.
    fn call(&self, args: &[Value]) -> CallResult<Vec<Value>>;
}

impl fmt::Debug for dyn Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.name().unwrap_or("<anonymous>"),
            self.signature()
        )
    }
}

/// Type-erased native function pointer.
pub type NativeFn = fn(&[Value]) -> CallResult<Vec<Value>>;

/// A callable built from a plain function pointer and an explicit signature.
///
/// ```text
/// fn len(args: &[Value]) -> CallResult<Vec<Value>> { ... }
///
/// let handle = NativeFunction::new(Signature::new(vec![TypeTag::Any]), len)
///     .named("len");
/// ```
#[derive(Clone)]
pub struct NativeFunction {
    name: Option<String>,
    signature: Signature,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new(signature: Signature, func: NativeFn) -> Self {
        NativeFunction {
            name: None,
            signature,
            func,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Callable for NativeFunction {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, args: &[Value]) -> CallResult<Vec<Value>> {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
