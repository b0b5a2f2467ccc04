//! `RegistryConfig` and `RegistryBuilder`.

use std::fmt;
use std::sync::Arc;

use callreg_options::{MapIndexMode, OptionRegistry, OptionStep};

use super::Registry;
use crate::store::{FunctionStore, ValueStore};
use crate::SharedStore;

/// Behavior switches fixed when a registry is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Fail `index` on a missing map key instead of yielding `Nil`.
    pub strict_map_index: bool,
}

impl RegistryConfig {
    pub(crate) fn map_index_mode(self) -> MapIndexMode {
        if self.strict_map_index {
            MapIndexMode::Strict
        } else {
            MapIndexMode::Permissive
        }
    }
}

/// Builder for creating `Registry` instances with custom configuration.
///
/// ```text
/// let registry = Registry::builder()
///     .strict_map_index(true)
///     .option("upper", upper_step)
///     .build();
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    config: RegistryConfig,
    options: Vec<(String, Arc<dyn OptionStep>)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn strict_map_index(mut self, strict: bool) -> Self {
        self.config.strict_map_index = strict;
        self
    }

    /// Install an option step.
    ///
    /// Steps are installed after the built-ins, so a step named `index` or
    /// `...` replaces the built-in one.
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, step: impl OptionStep + 'static) -> Self {
        self.options.push((name.into(), Arc::new(step)));
        self
    }

    pub fn build(self) -> Registry {
        let mut options = OptionRegistry::with_builtins(self.config.map_index_mode());
        for (name, step) in self.options {
            options.register_shared(name, step);
        }
        tracing::debug!(
            strict_map_index = self.config.strict_map_index,
            options = options.len(),
            "built registry"
        );

        Registry {
            config: self.config,
            options: SharedStore::new(options),
            values: SharedStore::new(ValueStore::new()),
            functions: SharedStore::new(FunctionStore::new()),
        }
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.options.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("RegistryBuilder")
            .field("config", &self.config)
            .field("options", &names)
            .finish()
    }
}
