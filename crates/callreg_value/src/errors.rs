//! Error types for argument resolution and invocation.
//!
//! # Structured Error Categories
//!
//! `CallErrorKind` carries the structured data of each failure. Factory
//! functions (e.g. `function_not_found()`) are the public API; they populate
//! both `kind` and `message`. `ErrorClass` groups kinds into the coarse
//! taxonomy callers usually branch on.

use std::error::Error;
use std::fmt;

use crate::types::TypeTag;

/// Result of a call or a pipeline step.
pub type CallResult<T> = Result<T, CallError>;

/// Coarse error taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// A function, argument or option name is not registered.
    NotFound,
    /// The flattened argument count does not fit the signature.
    ArityMismatch,
    /// A value is not assignable to (or convertible into) its declared type.
    TypeMismatch,
    /// An option step rejected its input.
    StepFailure,
    /// The registration API was misused.
    InvalidRegistration,
    /// The registered function itself reported an error.
    CallFailure,
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallErrorKind {
    // Lookup
    FunctionNotFound {
        name: String,
    },
    ArgumentNotFound {
        name: String,
    },
    OptionNotFound {
        name: String,
    },

    // Arity
    NotEnoughArguments {
        required: usize,
        got: usize,
    },
    ArgumentCountMismatch {
        expected: usize,
        got: usize,
    },

    // Types
    TypeMismatch {
        index: usize,
        got: String,
        expected: String,
        variadic: bool,
    },
    ConversionFailed {
        expected: String,
        got: String,
    },
    IntegerOutOfRange {
        value: i64,
        target: String,
    },
    /// Finite float beyond the target's range; `value` is its display form.
    FloatOutOfRange {
        value: String,
        target: String,
    },

    // Option steps
    NoValue,
    IndexEmpty,
    IndexNotNumber {
        param: String,
        reason: String,
    },
    IndexOutOfRange {
        index: i64,
        len: usize,
    },
    KeyNotFound {
        key: String,
    },
    NotIndexable {
        type_name: String,
    },
    NotExpandable {
        type_name: String,
    },
    /// A named step failed; the underlying error is the `source`.
    OptionFailed {
        option: String,
    },

    // Registration
    InvalidRegistration {
        reason: String,
    },

    // Call
    FunctionFailed {
        name: String,
        message: String,
    },

    /// Free-form failure, typically raised by user-supplied steps.
    Custom {
        message: String,
    },
}

impl CallErrorKind {
    /// The taxonomy bucket this kind belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::FunctionNotFound { .. }
            | Self::ArgumentNotFound { .. }
            | Self::OptionNotFound { .. } => ErrorClass::NotFound,
            Self::NotEnoughArguments { .. } | Self::ArgumentCountMismatch { .. } => {
                ErrorClass::ArityMismatch
            }
            Self::TypeMismatch { .. }
            | Self::ConversionFailed { .. }
            | Self::IntegerOutOfRange { .. }
            | Self::FloatOutOfRange { .. } => ErrorClass::TypeMismatch,
            Self::NoValue
            | Self::IndexEmpty
            | Self::IndexNotNumber { .. }
            | Self::IndexOutOfRange { .. }
            | Self::KeyNotFound { .. }
            | Self::NotIndexable { .. }
            | Self::NotExpandable { .. }
            | Self::OptionFailed { .. }
            | Self::Custom { .. } => ErrorClass::StepFailure,
            Self::InvalidRegistration { .. } => ErrorClass::InvalidRegistration,
            Self::FunctionFailed { .. } => ErrorClass::CallFailure,
        }
    }
}

impl fmt::Display for CallErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Lookup
            Self::FunctionNotFound { name } => write!(f, "function {name} not found"),
            Self::ArgumentNotFound { name } => write!(f, "argument {name} not found"),
            Self::OptionNotFound { name } => write!(f, "option {name} not found"),

            // Arity
            Self::NotEnoughArguments { required, got } => write!(
                f,
                "not enough arguments: expected at least {required}, got {got}"
            ),
            Self::ArgumentCountMismatch { expected, got } => {
                write!(f, "argument count mismatch: expected {expected}, got {got}")
            }

            // Types
            Self::TypeMismatch {
                index,
                got,
                expected,
                variadic,
            } => {
                let prefix = if *variadic {
                    "variadic function"
                } else {
                    "function"
                };
                write!(
                    f,
                    "{prefix}: index {index} argument {got} type mismatch with function {expected} type"
                )
            }
            Self::ConversionFailed { expected, got } => {
                write!(f, "cannot convert {got} to {expected}")
            }
            Self::IntegerOutOfRange { value, target } => {
                write!(f, "integer {value} out of range for {target}")
            }
            Self::FloatOutOfRange { value, target } => {
                write!(f, "float {value} out of range for {target}")
            }

            // Option steps
            Self::NoValue => write!(f, "no value"),
            Self::IndexEmpty => write!(f, "index is empty"),
            Self::IndexNotNumber { reason, .. } => write!(f, "index is not a number; {reason}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::KeyNotFound { key } => write!(f, "key {key} not found"),
            Self::NotIndexable { type_name } => write!(f, "{type_name} is not an indexable type"),
            Self::NotExpandable { type_name } => {
                write!(f, "{type_name} is not an expandable type")
            }
            Self::OptionFailed { option } => write!(f, "option {option} failed"),

            // Registration
            Self::InvalidRegistration { reason } => write!(f, "invalid registration: {reason}"),

            // Call
            Self::FunctionFailed { name, message } => write!(f, "function {name} failed: {message}"),

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Error returned by invocation, registration and option steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallError {
    /// Structured error category.
    pub kind: CallErrorKind,
    /// Human-readable message, including any context added while the error
    /// propagated.
    pub message: String,
    /// The error this one wraps, if any.
    pub source: Option<Box<CallError>>,
}

impl CallError {
    /// Create a free-form error. Prefer the factory functions when a
    /// structured kind exists.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        CallError {
            kind: CallErrorKind::Custom {
                message: message.clone(),
            },
            message,
            source: None,
        }
    }

    fn from_kind(kind: CallErrorKind) -> Self {
        let message = kind.to_string();
        CallError {
            kind,
            message,
            source: None,
        }
    }

    /// The taxonomy bucket of this error.
    #[inline]
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// Wrap a step failure with the name of the option that raised it.
    ///
    /// The message becomes `<option>; <message>` and the original error is
    /// kept as the source.
    #[cold]
    #[must_use]
    pub fn in_option(self, option: &str) -> Self {
        CallError {
            kind: CallErrorKind::OptionFailed {
                option: option.to_string(),
            },
            message: format!("{option}; {}", self.message),
            source: Some(Box::new(self)),
        }
    }

    /// Prefix the message with context. The kind is left untouched, so the
    /// error keeps its class.
    #[cold]
    #[must_use]
    pub fn with_context(mut self, context: &str) -> Self {
        self.message = format!("{context} {}", self.message);
        self
    }

    /// Name the argument position a conversion failed at, in the same shape
    /// as [`type_mismatch`]. The kind is left untouched.
    #[cold]
    #[must_use]
    pub fn at_argument(self, index: usize, variadic: bool) -> Self {
        let prefix = if variadic {
            "variadic function"
        } else {
            "function"
        };
        self.with_context(&format!("{prefix}: index {index} argument"))
    }

    /// The innermost error of the source chain.
    pub fn root_cause(&self) -> &CallError {
        let mut current = self;
        while let Some(next) = current.source.as_deref() {
            current = next;
        }
        current
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CallError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

// Lookup Errors

/// Function name not registered.
#[cold]
pub fn function_not_found(name: &str) -> CallError {
    CallError::from_kind(CallErrorKind::FunctionNotFound {
        name: name.to_string(),
    })
}

/// Argument name not registered.
#[cold]
pub fn argument_not_found(name: &str) -> CallError {
    CallError::from_kind(CallErrorKind::ArgumentNotFound {
        name: name.to_string(),
    })
}

/// Option name not registered.
#[cold]
pub fn option_not_found(name: &str) -> CallError {
    CallError::from_kind(CallErrorKind::OptionNotFound {
        name: name.to_string(),
    })
}

// Arity Errors

/// Fewer values than a variadic function's fixed parameters.
#[cold]
pub fn not_enough_arguments(required: usize, got: usize) -> CallError {
    CallError::from_kind(CallErrorKind::NotEnoughArguments { required, got })
}

/// Value count differs from a non-variadic function's parameter count.
#[cold]
pub fn argument_count_mismatch(expected: usize, got: usize) -> CallError {
    CallError::from_kind(CallErrorKind::ArgumentCountMismatch { expected, got })
}

// Type Errors

/// Value at `index` is not assignable to its declared parameter type.
#[cold]
pub fn type_mismatch(index: usize, got: &str, expected: &TypeTag, variadic: bool) -> CallError {
    CallError::from_kind(CallErrorKind::TypeMismatch {
        index,
        got: got.to_string(),
        expected: expected.to_string(),
        variadic,
    })
}

/// Value cannot be converted into the requested Rust type.
#[cold]
pub fn conversion_failed(expected: &TypeTag, got: &str) -> CallError {
    CallError::from_kind(CallErrorKind::ConversionFailed {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// Integer does not fit the narrower Rust integer type.
#[cold]
pub fn integer_out_of_range(value: i64, target: &str) -> CallError {
    CallError::from_kind(CallErrorKind::IntegerOutOfRange {
        value,
        target: target.to_string(),
    })
}

/// Finite float does not fit the narrower Rust float type.
#[cold]
pub fn float_out_of_range(value: f64, target: &str) -> CallError {
    CallError::from_kind(CallErrorKind::FloatOutOfRange {
        value: value.to_string(),
        target: target.to_string(),
    })
}

// Step Errors

/// A step received no values.
#[cold]
pub fn no_value() -> CallError {
    CallError::from_kind(CallErrorKind::NoValue)
}

/// `index` used without parameters.
#[cold]
pub fn index_empty() -> CallError {
    CallError::from_kind(CallErrorKind::IndexEmpty)
}

/// `index` parameter is not an integer.
#[cold]
pub fn index_not_number(param: &str, reason: &str) -> CallError {
    CallError::from_kind(CallErrorKind::IndexNotNumber {
        param: param.to_string(),
        reason: reason.to_string(),
    })
}

/// `index` parameter outside the list bounds.
#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> CallError {
    CallError::from_kind(CallErrorKind::IndexOutOfRange { index, len })
}

/// Map key missing under strict map indexing.
#[cold]
pub fn key_not_found(key: &str) -> CallError {
    CallError::from_kind(CallErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}

/// Value kind cannot be indexed.
#[cold]
pub fn not_indexable(type_name: &str) -> CallError {
    CallError::from_kind(CallErrorKind::NotIndexable {
        type_name: type_name.to_string(),
    })
}

/// Value kind cannot be spread into multiple values.
#[cold]
pub fn not_expandable(type_name: &str) -> CallError {
    CallError::from_kind(CallErrorKind::NotExpandable {
        type_name: type_name.to_string(),
    })
}

// Registration Errors

#[cold]
pub fn invalid_registration(reason: &str) -> CallError {
    CallError::from_kind(CallErrorKind::InvalidRegistration {
        reason: reason.to_string(),
    })
}

// Call Errors

/// The registered function returned an error.
#[cold]
pub fn function_failed(name: &str, message: &str) -> CallError {
    CallError::from_kind(CallErrorKind::FunctionFailed {
        name: name.to_string(),
        message: message.to_string(),
    })
}
