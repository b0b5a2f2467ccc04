//! Built-in option steps: `index` and `...`.

use callreg_value::{
    index_empty, index_not_number, index_out_of_range, key_not_found, no_value, not_expandable,
    not_indexable, CallResult, Value,
};

use crate::registry::OptionStep;

/// Registered name of [`IndexOption`].
pub const INDEX: &str = "index";
/// Registered name of [`ExpandOption`].
pub const EXPAND: &str = "...";

/// How `index` treats a key missing from a map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MapIndexMode {
    /// A missing key yields `Nil`.
    #[default]
    Permissive,
    /// A missing key fails the step.
    Strict,
}

/// Select elements of a list by position or entries of a map by key.
///
/// Works on the first input value and returns one value per parameter, in
/// parameter order.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndexOption {
    mode: MapIndexMode,
}

impl IndexOption {
    pub fn new(mode: MapIndexMode) -> Self {
        IndexOption { mode }
    }

    pub fn mode(&self) -> MapIndexMode {
        self.mode
    }
}

impl OptionStep for IndexOption {
    fn apply(&self, values: Vec<Value>, params: &[&str]) -> CallResult<Vec<Value>> {
        let Some(target) = values.first() else {
            return Err(no_value());
        };
        if params.is_empty() {
            return Err(index_empty());
        }

        match target {
            Value::List(items) => params
                .iter()
                .map(|param| {
                    let index = param
                        .parse::<i64>()
                        .map_err(|e| index_not_number(param, &e.to_string()))?;
                    usize::try_from(index)
                        .ok()
                        .and_then(|i| items.get(i))
                        .cloned()
                        .ok_or_else(|| index_out_of_range(index, items.len()))
                })
                .collect(),
            Value::Map(map) => params
                .iter()
                .map(|key| match (map.get(*key), self.mode) {
                    (Some(value), _) => Ok(value.clone()),
                    (None, MapIndexMode::Permissive) => Ok(Value::Nil),
                    (None, MapIndexMode::Strict) => Err(key_not_found(key)),
                })
                .collect(),
            other => Err(not_indexable(other.type_name())),
        }
    }
}

/// Spread a single list or map into its elements.
///
/// Parameters are ignored. More than one input value is taken as already
/// expanded and passed through. Map values come out in unspecified order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpandOption;

impl OptionStep for ExpandOption {
    fn apply(&self, values: Vec<Value>, _params: &[&str]) -> CallResult<Vec<Value>> {
        if values.len() > 1 {
            return Ok(values);
        }
        match values.first() {
            None => Err(no_value()),
            Some(Value::List(items)) => Ok(items.to_vec()),
            Some(Value::Map(map)) => Ok(map.values().cloned().collect()),
            Some(other) => Err(not_expandable(other.type_name())),
        }
    }
}
