//! Callreg - invoke registered functions by name.
//!
//! Functions and argument values are registered separately. A call names the
//! function and refers to its arguments by name, each reference optionally
//! carrying a chain of options that reshape the stored value first:
//!
//! ```text
//! let registry = Registry::new();
//! registry
//!     .add_argument("a", vec![2_i64, 5])
//!     .add_function("sum", |xs: Variadic<i64>| xs.iter().sum::<i64>(), &[]);
//!
//! registry.invoke("sum", &["a:..."])?;        // [7]
//! registry.invoke("sum", &["a:index=0,1"])?;  // [7]
//! ```
//!
//! # Architecture
//!
//! - `callable`: `Callable` handles, `Signature`, typed-function adapters
//! - `store`: `ValueStore` and `FunctionStore`
//! - `registry`: `Registry`, its builder and the invocation engine
//! - `shared`: the `Arc<RwLock>` wrapper around each store
//!
//! Values, type tags and errors come from `callreg_value`; the reference
//! grammar and option steps from `callreg_options`. Both are re-exported.

mod callable;
mod registry;
mod shared;
mod store;

use std::sync::Once;

pub use callable::{
    derive_name, Callable, Fixed, IntoCallable, NativeFn, NativeFunction, Signature,
    TypedFunction, WithVariadic,
};
pub use registry::{Registry, RegistryBuilder, RegistryConfig};
pub use shared::SharedStore;
pub use store::{FunctionEntry, FunctionStore, ValueStore};

pub use callreg_options::{
    base_name, ArgumentRef, ExpandOption, IndexOption, MapIndexMode, OptionCall, OptionRegistry,
    OptionStep, EXPAND, INDEX,
};
pub use callreg_value::{
    CallError, CallErrorKind, CallResult, ErrorClass, FromValue, IntoResults, IntoValue, Opaque,
    TypeTag, Value, ValueMap, ValueType, Variadic,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging registration and invocation.
///
/// Call this at program start to enable tracing output.
/// Controlled by the `RUST_LOG` environment variable:
///
/// ```bash
/// RUST_LOG=callreg=debug cargo run
/// RUST_LOG=callreg=trace,callreg_options=trace cargo run
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
