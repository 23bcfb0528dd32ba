//! Variable store

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The single global namespace of a running program
///
/// Maps variable names to integers. Entries are created by the first
/// assignment or loop binding; reading a name that was never bound yields 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    vars: BTreeMap<String, i32>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value bound to `name`, or 0 when unbound
    pub fn get(&self, name: &str) -> i32 {
        self.vars.get(name).copied().unwrap_or(0)
    }

    pub fn set(&mut self, name: &str, value: i32) {
        match self.vars.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.vars.insert(name.to_string(), value);
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl FromIterator<(String, i32)> for Store {
    fn from_iter<I: IntoIterator<Item = (String, i32)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}
