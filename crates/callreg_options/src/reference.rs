//! Argument reference grammar.
//!
//! ```text
//! ArgumentRef := name (":" OptionChain)?
//! OptionChain := OptionCall (";" OptionCall)*
//! OptionCall  := optionName ("=" Param ("," Param)*)?
//! ```
//!
//! Parsing is best-effort splitting with no escaping: the name ends at the
//! first `:`, calls are split on every `;`, the option name ends at the first
//! `=`, and parameters are split on every `,`. Empty pieces are kept, so a
//! trailing `;` produces a call with an empty name that later fails lookup.

use std::fmt;

use smallvec::SmallVec;

/// Separates the argument name from its option chain.
pub const OPTION_DELIMITER: char = ':';
/// Separates option calls in a chain.
pub const OPTION_SEPARATOR: char = ';';
/// Separates an option name from its parameter list.
pub const PARAM_ASSIGN: char = '=';
/// Separates parameters.
pub const PARAM_SEPARATOR: char = ',';

/// The stored-argument name of a reference: everything before the first `:`.
#[inline]
pub fn base_name(reference: &str) -> &str {
    reference
        .split_once(OPTION_DELIMITER)
        .map_or(reference, |(name, _)| name)
}

/// One option invocation, e.g. `index=0,2`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionCall<'a> {
    pub name: &'a str,
    pub params: SmallVec<[&'a str; 4]>,
}

impl<'a> OptionCall<'a> {
    fn parse(call: &'a str) -> Self {
        match call.split_once(PARAM_ASSIGN) {
            None => OptionCall {
                name: call,
                params: SmallVec::new(),
            },
            Some((name, params)) => OptionCall {
                name,
                params: params.split(PARAM_SEPARATOR).collect(),
            },
        }
    }
}

/// A parsed argument reference, borrowing from the reference string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgumentRef<'a> {
    pub name: &'a str,
    pub options: Vec<OptionCall<'a>>,
}

impl<'a> ArgumentRef<'a> {
    pub fn parse(reference: &'a str) -> Self {
        match reference.split_once(OPTION_DELIMITER) {
            None => ArgumentRef {
                name: reference,
                options: Vec::new(),
            },
            Some((name, chain)) => ArgumentRef {
                name,
                options: chain.split(OPTION_SEPARATOR).map(OptionCall::parse).collect(),
            },
        }
    }

    /// Whether any option follows the name.
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

impl fmt::Display for ArgumentRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, call) in self.options.iter().enumerate() {
            let sep = if i == 0 {
                OPTION_DELIMITER
            } else {
                OPTION_SEPARATOR
            };
            write!(f, "{sep}{}", call.name)?;
            for (j, param) in call.params.iter().enumerate() {
                let sep = if j == 0 { PARAM_ASSIGN } else { PARAM_SEPARATOR };
                write!(f, "{sep}{param}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
