//! Callreg Options - the argument transformation pipeline.
//!
//! An argument reference names a stored value and, after `:`, a chain of
//! options that rewrite it before it reaches the called function:
//!
//! ```text
//! nums                    the stored value as-is
//! nums:index=0,2          elements 0 and 2
//! nums:...                every element, as separate arguments
//! cfg:index=hosts;...     the "hosts" entry of a map, spread
//! ```
//!
//! # Architecture
//!
//! - `reference`: grammar of argument references (`ArgumentRef`, `OptionCall`)
//! - `registry`: `OptionStep` trait and the named `OptionRegistry`
//! - `builtins`: the `index` and `...` steps
//!
//! New steps are added by implementing `OptionStep` (or passing a closure)
//! and registering them under a name; the pipeline itself never changes.

mod builtins;
mod reference;
mod registry;

pub use builtins::{ExpandOption, IndexOption, MapIndexMode, EXPAND, INDEX};
pub use reference::{
    base_name, ArgumentRef, OptionCall, OPTION_DELIMITER, OPTION_SEPARATOR, PARAM_ASSIGN,
    PARAM_SEPARATOR,
};
pub use registry::{OptionRegistry, OptionStep};
