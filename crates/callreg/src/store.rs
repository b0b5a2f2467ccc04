//! Named argument values and registered functions.
//!
//! Both stores are plain maps; locking happens one level up, where each
//! store is wrapped in a [`SharedStore`](crate::SharedStore).

use std::fmt;
use std::sync::Arc;

use callreg_value::Value;
use rustc_hash::FxHashMap;

use crate::callable::Callable;

fn sorted_keys<V>(map: &FxHashMap<String, V>) -> Vec<String> {
    let mut names: Vec<String> = map.keys().cloned().collect();
    names.sort_unstable();
    names
}

/// Argument values by name.
#[derive(Clone, Debug, Default)]
pub struct ValueStore {
    values: FxHashMap<String, Value>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Stored names, sorted.
    pub fn names(&self) -> Vec<String> {
        sorted_keys(&self.values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A registered function and the argument references used when it is
/// invoked without explicit ones.
#[derive(Clone)]
pub struct FunctionEntry {
    pub default_args: Vec<String>,
    pub callable: Arc<dyn Callable>,
}

impl FunctionEntry {
    pub fn new(callable: Arc<dyn Callable>, default_args: Vec<String>) -> Self {
        FunctionEntry {
            default_args,
            callable,
        }
    }
}

impl fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("callable", &self.callable)
            .field("default_args", &self.default_args)
            .finish()
    }
}

/// Registered functions by name.
#[derive(Clone, Debug, Default)]
pub struct FunctionStore {
    functions: FxHashMap<String, FunctionEntry>,
}

impl FunctionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entry, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, entry: FunctionEntry) -> Option<FunctionEntry> {
        self.functions.insert(name.into(), entry)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<FunctionEntry> {
        self.functions.remove(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        sorted_keys(&self.functions)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
