//! The invocation engine.
//!
//! ```text
//! invoke(name, refs)
//!   1. look up the function
//!   2. per reference: look up the base argument, run its option chain,
//!      append the results to the flattened argument list
//!   3. check arity against the signature
//!   4. check fixed parameter types
//!   5. check the variadic tail type
//!   6. call
//!   7. return the results
//! ```
//!
//! Steps 1-5 run under the function store's read lock; the value and option
//! read locks are taken after it and held while references resolve. All
//! locks are released before step 6, which calls a snapshot of the handle
//! with the validated values, so a called function may register or invoke
//! through the same registry. Option steps run under the locks and must not
//! register anything.

use std::sync::Arc;

use callreg_options::{base_name, OptionRegistry};
use callreg_value::{argument_not_found, function_not_found, CallResult, Value};

use super::Registry;
use crate::callable::Callable;
use crate::store::ValueStore;

impl Registry {
    /// Invoke `name` with the given argument references.
    ///
    /// Each reference names a stored argument, optionally followed by an
    /// option chain (`nums:index=0,2`, `cfg:index=hosts;...`). The values
    /// of all references are flattened in order into the argument list.
    #[tracing::instrument(level = "debug", skip(self, refs))]
    pub fn invoke<S: AsRef<str>>(&self, name: &str, refs: &[S]) -> CallResult<Vec<Value>> {
        let (callable, args) = self.prepare(name, refs)?;
        let results = callable.call(&args)?;
        tracing::debug!(args = args.len(), results = results.len(), "invoked");
        Ok(results)
    }

    /// Invoke `name` with the references it was registered with.
    pub fn invoke_default(&self, name: &str) -> CallResult<Vec<Value>> {
        let default_args = self
            .functions
            .read()
            .get(name)
            .map(|entry| entry.default_args.clone())
            .ok_or_else(|| function_not_found(name))?;
        self.invoke(name, &default_args)
    }

    /// Steps 1-5: resolve and validate under the read locks.
    fn prepare<S: AsRef<str>>(
        &self,
        name: &str,
        refs: &[S],
    ) -> CallResult<(Arc<dyn Callable>, Vec<Value>)> {
        let functions = self.functions.read();
        let callable = functions
            .get(name)
            .map(|entry| Arc::clone(&entry.callable))
            .ok_or_else(|| function_not_found(name))?;

        let args = resolve(&self.values.read(), &self.options.read(), refs)?;

        let signature = callable.signature();
        signature.check_arity(args.len())?;
        signature.check_types(&args)?;
        drop(functions);

        Ok((callable, args))
    }
}

/// Resolve every reference and flatten the results in order.
fn resolve<S: AsRef<str>>(
    values: &ValueStore,
    options: &OptionRegistry,
    refs: &[S],
) -> CallResult<Vec<Value>> {
    let mut args = Vec::with_capacity(refs.len());
    for reference in refs {
        let reference = reference.as_ref();
        let name = base_name(reference);
        let base = values
            .get(name)
            .cloned()
            .ok_or_else(|| argument_not_found(name))?;
        let resolved = options
            .visit(reference, base)
            .map_err(|err| err.with_context("failed VisitOption"))?;
        tracing::trace!(reference, values = resolved.len(), "resolved argument");
        args.extend(resolved);
    }
    Ok(args)
}
