//! The registry: argument values, functions and option steps behind
//! reader/writer locks, plus the invocation engine (see `invoke`).
//!
//! Registration takes the write lock of one store. Invocation takes read
//! locks only, so concurrent invocations never wait on each other.

mod config;
mod invoke;

use std::fmt;
use std::sync::Arc;

use callreg_options::{base_name, OptionRegistry, OptionStep};
use callreg_value::{invalid_registration, CallResult, IntoValue, Value};

pub use config::{RegistryBuilder, RegistryConfig};

use crate::callable::{Callable, IntoCallable};
use crate::store::{FunctionEntry, FunctionStore, ValueStore};
use crate::SharedStore;

/// By-name function registry.
///
/// Cloning a registry shares its stores.
#[derive(Clone)]
pub struct Registry {
    config: RegistryConfig,
    options: SharedStore<OptionRegistry>,
    values: SharedStore<ValueStore>,
    functions: SharedStore<FunctionStore>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a registry with the default configuration and the built-in
    /// `index` and `...` steps.
    pub fn new() -> Self {
        RegistryBuilder::new().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    // Options

    /// Add or replace an option step.
    pub fn add_option(&self, name: impl Into<String>, step: impl OptionStep + 'static) -> &Self {
        let name = name.into();
        tracing::debug!(option = %name, "registering option");
        self.options.write().register(name, step);
        self
    }

    /// Remove an option step, built-ins included. Returns whether it existed.
    pub fn remove_option(&self, name: &str) -> bool {
        let removed = self.options.write().remove(name);
        tracing::debug!(option = name, removed, "removing option");
        removed
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.read().contains(name)
    }

    /// Registered option names, sorted.
    pub fn option_names(&self) -> Vec<String> {
        self.options.read().names()
    }

    /// Run `reference`'s option chain on `value` without touching the stores.
    pub fn visit(&self, reference: &str, value: Value) -> CallResult<Vec<Value>> {
        self.options.read().visit(reference, value)
    }

    // Arguments

    /// Store or replace an argument value.
    ///
    /// Anything from the first `:` on is dropped from the name, since a
    /// reference could never address it.
    pub fn add_argument(&self, name: &str, value: impl IntoValue) -> &Self {
        let name = base_name(name);
        let replaced = self
            .values
            .write()
            .insert(name, value.into_value())
            .is_some();
        tracing::debug!(argument = name, replaced, "registering argument");
        self
    }

    /// A clone of the stored value.
    pub fn argument(&self, name: &str) -> Option<Value> {
        self.values.read().get(name).cloned()
    }

    pub fn remove_argument(&self, name: &str) -> Option<Value> {
        let removed = self.values.write().remove(name);
        tracing::debug!(argument = name, removed = removed.is_some(), "removing argument");
        removed
    }

    /// Stored argument names, sorted.
    pub fn argument_names(&self) -> Vec<String> {
        self.values.read().names()
    }

    // Functions

    /// Register or replace a typed function or closure.
    ///
    /// An empty `name` derives one from the function's type. `default_args`
    /// are the references used by [`Registry::invoke_default`].
    pub fn add_function<M, F>(&self, name: &str, f: F, default_args: &[&str]) -> &Self
    where
        F: IntoCallable<M>,
    {
        let callable = f.into_callable(name);
        let name = if name.is_empty() {
            callable.name().unwrap_or_default().to_string()
        } else {
            name.to_string()
        };
        self.insert_function(name, callable, default_args);
        self
    }

    /// Register or replace a prebuilt handle.
    ///
    /// An empty `name` falls back to the handle's own name; a handle without
    /// one cannot be registered that way.
    pub fn add_callable(
        &self,
        name: &str,
        callable: Arc<dyn Callable>,
        default_args: &[&str],
    ) -> CallResult<&Self> {
        let name = match (name, callable.name()) {
            ("", Some(own)) if !own.is_empty() => own.to_string(),
            ("", _) => {
                return Err(invalid_registration(
                    "function name is empty and the handle has no name",
                ))
            }
            (name, _) => name.to_string(),
        };
        self.insert_function(name, callable, default_args);
        Ok(self)
    }

    fn insert_function(&self, name: String, callable: Arc<dyn Callable>, default_args: &[&str]) {
        let default_args: Vec<String> = default_args.iter().map(ToString::to_string).collect();
        tracing::debug!(
            function = %name,
            signature = %callable.signature(),
            defaults = default_args.len(),
            "registering function"
        );
        let entry = FunctionEntry::new(callable, default_args);
        if let Some(old) = self.functions.write().insert(name, entry) {
            tracing::debug!(replaced = ?old.callable, "replaced existing function");
        }
    }

    /// A clone of the registered entry.
    pub fn function(&self, name: &str) -> Option<FunctionEntry> {
        self.functions.read().get(name).cloned()
    }

    pub fn remove_function(&self, name: &str) -> Option<FunctionEntry> {
        let removed = self.functions.write().remove(name);
        tracing::debug!(function = name, removed = removed.is_some(), "removing function");
        removed
    }

    /// Registered function names, sorted.
    pub fn function_names(&self) -> Vec<String> {
        self.functions.read().names()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("options", &self.option_names())
            .field("arguments", &self.argument_names())
            .field("functions", &self.function_names())
            .finish()
    }
}
