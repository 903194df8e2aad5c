//! Criteria validation and compiled per-entity queries.
//!
//! Parsing runs in two passes. The first rejects every unrecognised name
//! at once; the second parses numeric values, stopping at the first that
//! is not an integer. Only then is anything compiled, so an invalid
//! request never reaches evaluation.

use warscry_types::{Ability, Characteristic, Fighter, Weapon};

use crate::criteria::Criteria;
use crate::error::QueryError;
use crate::matcher::{self, Comparison};
use crate::schema::{ABILITY_FIELDS, Accessor, FIGHTER_FIELDS, Field, WEAPON_FIELDS, resolve};

// ---------------------------------------------------------------------------
// Clauses
// ---------------------------------------------------------------------------

/// One compiled field condition against an entity of type `E`.
#[derive(Debug, Clone)]
enum Clause<E> {
    Exact {
        get: fn(&E) -> &str,
        wanted: Vec<String>,
    },
    Substring {
        get: fn(&E) -> &str,
        wanted: Vec<String>,
    },
    Tags {
        get: fn(&E) -> &[String],
        wanted: Vec<String>,
    },
    Number {
        get: fn(&E) -> Characteristic,
        cmp: Comparison,
        wanted: Vec<i64>,
    },
}

impl<E> Clause<E> {
    fn compile(
        field: &Field<E>,
        cmp: Comparison,
        parameter: &str,
        values: &[String],
    ) -> Result<Self, QueryError> {
        let folded = || -> Vec<String> { values.iter().map(|v| matcher::fold(v)).collect() };
        Ok(match field.accessor {
            Accessor::Exact(get) => Self::Exact {
                get,
                wanted: folded(),
            },
            Accessor::Substring(get) => Self::Substring {
                get,
                wanted: folded(),
            },
            Accessor::Tags(get) => Self::Tags {
                get,
                wanted: folded(),
            },
            Accessor::Number(get) => Self::Number {
                get,
                cmp,
                wanted: parse_integers(parameter, values)?,
            },
        })
    }

    fn matches(&self, entity: &E) -> bool {
        match self {
            Self::Exact { get, wanted } => matcher::exact_one_of(get(entity), wanted),
            Self::Substring { get, wanted } => matcher::substring_one_of(get(entity), wanted),
            Self::Tags { get, wanted } => matcher::all_tags(get(entity), wanted),
            Self::Number { get, cmp, wanted } => {
                matcher::numeric_any(get(entity).as_i64(), *cmp, wanted)
            }
        }
    }
}

fn parse_integers(parameter: &str, values: &[String]) -> Result<Vec<i64>, QueryError> {
    values
        .iter()
        .map(|value| {
            value.parse::<i64>().map_err(|_parse| QueryError::InvalidInteger {
                parameter: parameter.to_owned(),
                value: value.clone(),
            })
        })
        .collect()
}

/// Logical AND over a list of clauses.
#[derive(Debug, Clone)]
struct Predicate<E> {
    clauses: Vec<Clause<E>>,
}

impl<E> Default for Predicate<E> {
    fn default() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }
}

impl<E> Predicate<E> {
    fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    fn matches(&self, entity: &E) -> bool {
        self.clauses.iter().all(|clause| clause.matches(entity))
    }
}

fn reject_unknown(criteria: &Criteria, known: impl Fn(&str) -> bool) -> Result<(), QueryError> {
    let unknown: Vec<String> = criteria
        .iter()
        .map(|(name, _)| name)
        .filter(|name| !known(name))
        .map(ToOwned::to_owned)
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(QueryError::UnknownParameters(unknown))
    }
}

// ---------------------------------------------------------------------------
// FighterQuery
// ---------------------------------------------------------------------------

/// Compiled criteria for fighters.
///
/// A fighter matches when every fighter-level clause holds and, if any
/// weapon clause was given, at least one of its weapons satisfies all of
/// them. A fighter with no weapons passes the weapon check.
#[derive(Debug, Clone, Default)]
pub struct FighterQuery {
    fighter: Predicate<Fighter>,
    weapon: Predicate<Weapon>,
}

impl FighterQuery {
    /// Validate and compile fighter criteria.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownParameters`] listing every unrecognised
    /// name, or [`QueryError::InvalidInteger`] for the first non-integer
    /// value on a numeric field.
    pub fn parse(criteria: &Criteria) -> Result<Self, QueryError> {
        reject_unknown(criteria, |name| {
            resolve(FIGHTER_FIELDS, name).is_some() || resolve(WEAPON_FIELDS, name).is_some()
        })?;

        let mut query = Self::default();
        for (name, values) in criteria.iter() {
            if let Some((field, cmp)) = resolve(FIGHTER_FIELDS, name) {
                query
                    .fighter
                    .clauses
                    .push(Clause::compile(field, cmp, name, values)?);
            } else if let Some((field, cmp)) = resolve(WEAPON_FIELDS, name) {
                query
                    .weapon
                    .clauses
                    .push(Clause::compile(field, cmp, name, values)?);
            }
        }
        Ok(query)
    }

    /// Whether no criteria were supplied.
    pub fn is_empty(&self) -> bool {
        self.fighter.is_empty() && self.weapon.is_empty()
    }

    /// Whether `fighter` satisfies this query.
    pub fn matches(&self, fighter: &Fighter) -> bool {
        self.fighter.matches(fighter) && self.matches_weapons(&fighter.weapons)
    }

    fn matches_weapons(&self, weapons: &[Weapon]) -> bool {
        self.weapon.is_empty()
            || weapons.is_empty()
            || weapons.iter().any(|weapon| self.weapon.matches(weapon))
    }
}

// ---------------------------------------------------------------------------
// AbilityQuery
// ---------------------------------------------------------------------------

/// Compiled criteria for abilities and battle traits.
#[derive(Debug, Clone, Default)]
pub struct AbilityQuery {
    ability: Predicate<Ability>,
}

impl AbilityQuery {
    /// Validate and compile ability criteria.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownParameters`] listing every unrecognised
    /// name. Ability fields take no operator suffixes.
    pub fn parse(criteria: &Criteria) -> Result<Self, QueryError> {
        reject_unknown(criteria, |name| resolve(ABILITY_FIELDS, name).is_some())?;

        let mut query = Self::default();
        for (name, values) in criteria.iter() {
            if let Some((field, cmp)) = resolve(ABILITY_FIELDS, name) {
                query
                    .ability
                    .clauses
                    .push(Clause::compile(field, cmp, name, values)?);
            }
        }
        Ok(query)
    }

    /// Whether no criteria were supplied.
    pub fn is_empty(&self) -> bool {
        self.ability.is_empty()
    }

    /// Whether `ability` satisfies this query.
    pub fn matches(&self, ability: &Ability) -> bool {
        self.ability.matches(ability)
    }
}
