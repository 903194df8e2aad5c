//! Query filter engine and concurrent evaluator for the Warscry API.
//!
//! A request supplies a mapping from field name to one or more requested
//! values ([`Criteria`]). The criteria are validated and compiled once per
//! request into a [`FighterQuery`] or [`AbilityQuery`], which is then
//! evaluated against every entity of an immutable [`Dataset`] snapshot.
//!
//! # Field grammar
//!
//! - Text fields match exactly, case-insensitively, against any requested value.
//! - `description` matches by case-insensitive substring.
//! - `runemarks` requires every requested tag to be present.
//! - Numeric fields compare for equality; the suffixes `__gt`, `__gte`,
//!   `__lt` and `__lte` select ordered comparisons. Values within one
//!   variant are OR'd, distinct variants of one field are AND'd.
//! - Fighter weapon fields match if any one weapon satisfies all of them.
//!
//! # Modules
//!
//! - [`criteria`] -- Raw request criteria
//! - [`matcher`] -- Primitive matchers and [`Comparison`] operators
//! - [`schema`] -- Per-entity field tables
//! - [`query`] -- Validation and compiled [`FighterQuery`] / [`AbilityQuery`]
//! - [`eval`] -- Snapshot-wide evaluation
//! - [`error`] -- [`QueryError`] and [`EvalError`]
//!
//! [`Dataset`]: warscry_types::Dataset

pub mod criteria;
pub mod error;
pub mod eval;
pub mod matcher;
pub mod query;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use criteria::Criteria;
pub use error::{EvalError, QueryError};
pub use eval::{filter_abilities, filter_fighters};
pub use matcher::Comparison;
pub use query::{AbilityQuery, FighterQuery};
