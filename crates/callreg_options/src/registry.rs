//! Named option steps and the visitor that applies a reference's chain.

use std::fmt;
use std::sync::Arc;

use callreg_value::{option_not_found, CallResult, Value};
use rustc_hash::FxHashMap;

use crate::builtins::{ExpandOption, IndexOption, MapIndexMode, EXPAND, INDEX};
use crate::reference::ArgumentRef;

/// A transformation applied to an argument before the call.
///
/// Receives the current value sequence and the option's parameters and
/// returns the new sequence. Returning an empty sequence ends the chain.
///
/// Closures of the matching shape implement this trait:
///
/// ```text
/// registry.register("first", |mut values: Vec<Value>, _: &[&str]| {
///     values.truncate(1);
///     Ok(values)
/// });
/// ```
pub trait OptionStep: Send + Sync {
    fn apply(&self, values: Vec<Value>, params: &[&str]) -> CallResult<Vec<Value>>;
}

impl<F> OptionStep for F
where
    F: Fn(Vec<Value>, &[&str]) -> CallResult<Vec<Value>> + Send + Sync,
{
    fn apply(&self, values: Vec<Value>, params: &[&str]) -> CallResult<Vec<Value>> {
        self(values, params)
    }
}

/// Registry mapping option names to steps.
///
/// Registering a name twice replaces the earlier step.
#[derive(Clone, Default)]
pub struct OptionRegistry {
    steps: FxHashMap<String, Arc<dyn OptionStep>>,
}

impl OptionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in `index` and `...` steps.
    pub fn with_builtins(mode: MapIndexMode) -> Self {
        let mut registry = Self::new();
        registry
            .register(INDEX, IndexOption::new(mode))
            .register(EXPAND, ExpandOption);
        registry
    }

    /// Add or replace a step.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        step: impl OptionStep + 'static,
    ) -> &mut Self {
        self.register_shared(name, Arc::new(step))
    }

    /// Add or replace a step that is already shared.
    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        step: Arc<dyn OptionStep>,
    ) -> &mut Self {
        self.steps.insert(name.into(), step);
        self
    }

    /// Remove a step. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.steps.remove(name).is_some()
    }

    /// Look up a step by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn OptionStep>> {
        self.steps.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    /// Registered option names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.steps.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Apply the option chain of `reference` to `base`.
    ///
    /// A reference without options yields `[base]`. Steps run in the order
    /// they appear; the first failure is returned as `<option>; <error>`,
    /// and an empty step result stops the chain and is returned as-is.
    pub fn visit(&self, reference: &str, base: Value) -> CallResult<Vec<Value>> {
        let parsed = ArgumentRef::parse(reference);
        let mut values = vec![base];

        for call in &parsed.options {
            let step = self
                .get(call.name)
                .ok_or_else(|| option_not_found(call.name))?;
            let input = values.len();
            values = step
                .apply(values, &call.params)
                .map_err(|err| err.in_option(call.name))?;
            tracing::trace!(
                option = call.name,
                input,
                output = values.len(),
                "applied option"
            );
            if values.is_empty() {
                break;
            }
        }

        Ok(values)
    }
}

impl fmt::Debug for OptionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionRegistry")
            .field("steps", &self.names())
            .finish()
    }
}
