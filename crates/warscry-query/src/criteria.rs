//! Raw request criteria.

use std::collections::BTreeMap;

/// Field name to requested values, as supplied by a caller.
///
/// A name may carry several values (`?runemarks=hero&runemarks=fly`).
/// Insertion order of values within one name is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    fields: BTreeMap<String, Vec<String>>,
}

impl Criteria {
    /// Empty criteria: every entity matches.
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add one value for `name`.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    /// Whether no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of distinct field names.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Values supplied for `name`, empty if it was not supplied.
    pub fn values(&self, name: &str) -> &[String] {
        self.fields.get(name).map_or(&[][..], Vec::as_slice)
    }

    /// Iterate over `(name, values)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut criteria = Self::new();
        for (name, value) in pairs {
            criteria.push(name, value);
        }
        criteria
    }
}
