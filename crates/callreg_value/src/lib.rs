//! Callreg Value - runtime values for by-name function invocation.
//!
//! This crate provides:
//! - Runtime value types (`Value`, `Heap`, `OpaqueValue`)
//! - Declared parameter types and assignability (`TypeTag`)
//! - Conversions between Rust types and values (`FromValue`, `IntoValue`, `IntoResults`)
//! - The call error type (`CallError`, `CallErrorKind`, `ErrorClass`)
//!
//! # Value Types
//!
//! Heap values are reference counted through `Heap<T>`. Handing a stored
//! value to a call clones the handle, never the data, so the stores stay
//! the only owners of what was registered.

mod convert;
mod errors;
mod types;
mod value;

pub use convert::{FromValue, IntoResults, IntoValue, Opaque, ValueType, Variadic};
pub use errors::{CallError, CallErrorKind, CallResult, ErrorClass};
pub use types::TypeTag;
pub use value::{Heap, OpaqueValue, Value, ValueMap};

// Re-export error constructors for use by other crates
pub use errors::{
    // Lookup errors
    argument_not_found,
    // Arity errors
    argument_count_mismatch,
    // Type errors
    conversion_failed,
    float_out_of_range,
    // Call errors
    function_failed,
    function_not_found,
    // Step errors
    index_empty,
    index_not_number,
    index_out_of_range,
    integer_out_of_range,
    // Registration errors
    invalid_registration,
    key_not_found,
    no_value,
    not_enough_arguments,
    not_expandable,
    not_indexable,
    option_not_found,
    type_mismatch,
};
