//! Primitive matchers shared by every field type.
//!
//! Requested strings are case-folded once when a query is compiled, so
//! the matchers here only fold the entity side.

/// Ordered comparison selected by a numeric field's suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// No suffix.
    Eq,
    /// `__gt`
    Gt,
    /// `__gte`
    Gte,
    /// `__lt`
    Lt,
    /// `__lte`
    Lte,
}

impl Comparison {
    /// The four ordered comparisons, longest suffix first.
    pub const ORDERED: [Self; 4] = [Self::Gte, Self::Lte, Self::Gt, Self::Lt];

    /// Field-name suffix selecting this comparison.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Eq => "",
            Self::Gt => "__gt",
            Self::Gte => "__gte",
            Self::Lt => "__lt",
            Self::Lte => "__lte",
        }
    }

    /// Split a field name into its base name and comparison.
    ///
    /// A name without a recognised suffix is returned whole with
    /// [`Comparison::Eq`].
    pub fn split(name: &str) -> (&str, Self) {
        Self::ORDERED
            .into_iter()
            .find_map(|cmp| name.strip_suffix(cmp.suffix()).map(|base| (base, cmp)))
            .unwrap_or((name, Self::Eq))
    }

    /// Whether `actual <op> wanted` holds.
    pub const fn holds(self, actual: i64, wanted: i64) -> bool {
        match self {
            Self::Eq => actual == wanted,
            Self::Gt => actual > wanted,
            Self::Gte => actual >= wanted,
            Self::Lt => actual < wanted,
            Self::Lte => actual <= wanted,
        }
    }
}

/// Lowercase a requested value for comparison.
pub fn fold(value: &str) -> String {
    value.to_lowercase()
}

/// Case-insensitive equality against any requested value.
///
/// Vacuously true when nothing was requested.
pub fn exact_one_of(actual: &str, wanted: &[String]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    let actual = fold(actual);
    wanted.iter().any(|w| *w == actual)
}

/// Case-insensitive substring containment of any requested value.
///
/// Vacuously true when nothing was requested.
pub fn substring_one_of(actual: &str, wanted: &[String]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    let actual = fold(actual);
    wanted.iter().any(|w| actual.contains(w.as_str()))
}

/// Every requested tag must be present in `tags`, case-insensitively.
pub fn all_tags(tags: &[String], wanted: &[String]) -> bool {
    wanted
        .iter()
        .all(|w| tags.iter().any(|tag| fold(tag) == *w))
}

/// `actual <cmp> v` for any requested `v`.
pub fn numeric_any(actual: i64, cmp: Comparison, wanted: &[i64]) -> bool {
    wanted.iter().any(|&v| cmp.holds(actual, v))
}
