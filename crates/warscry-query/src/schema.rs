//! Per-entity field tables.
//!
//! Each queryable field is a named constant paired with its matcher kind
//! and an accessor into the entity. Queries resolve names against these
//! tables once, when compiled; evaluation never looks at a field name.

use warscry_types::{Ability, Characteristic, Fighter, Weapon};

use crate::matcher::Comparison;

/// How a field is matched, and how to read it from the entity.
pub enum Accessor<E> {
    /// Case-insensitive equality against any requested value.
    Exact(fn(&E) -> &str),
    /// Case-insensitive substring against any requested value.
    Substring(fn(&E) -> &str),
    /// Every requested tag must be present.
    Tags(fn(&E) -> &[String]),
    /// Integer comparison; accepts operator suffixes.
    Number(fn(&E) -> Characteristic),
}

/// One queryable field.
pub struct Field<E> {
    /// Query parameter name.
    pub name: &'static str,
    /// Matcher kind and accessor.
    pub accessor: Accessor<E>,
}

impl<E> Field<E> {
    /// Whether the field accepts `__gt` / `__gte` / `__lt` / `__lte`.
    pub const fn is_numeric(&self) -> bool {
        matches!(self.accessor, Accessor::Number(_))
    }
}

/// Fighter-level fields.
pub static FIGHTER_FIELDS: &[Field<Fighter>] = &[
    Field {
        name: "_id",
        accessor: Accessor::Exact(|f| f.id.as_str()),
    },
    Field {
        name: "name",
        accessor: Accessor::Exact(|f| f.name.as_str()),
    },
    Field {
        name: "warband",
        accessor: Accessor::Exact(|f| f.faction.as_str()),
    },
    Field {
        name: "subfaction",
        accessor: Accessor::Exact(|f| f.subfaction.as_deref().unwrap_or_default()),
    },
    Field {
        name: "grand_alliance",
        accessor: Accessor::Exact(|f| f.grand_alliance.as_str()),
    },
    Field {
        name: "runemarks",
        accessor: Accessor::Tags(|f| f.runemarks.as_slice()),
    },
    Field {
        name: "movement",
        accessor: Accessor::Number(|f| f.movement),
    },
    Field {
        name: "toughness",
        accessor: Accessor::Number(|f| f.toughness),
    },
    Field {
        name: "wounds",
        accessor: Accessor::Number(|f| f.wounds),
    },
    Field {
        name: "points",
        accessor: Accessor::Number(|f| f.points),
    },
];

/// Weapon-level fields, queried through `/fighters`.
pub static WEAPON_FIELDS: &[Field<Weapon>] = &[
    Field {
        name: "weapon_runemark",
        accessor: Accessor::Exact(|w| w.runemark.as_str()),
    },
    Field {
        name: "attacks",
        accessor: Accessor::Number(|w| w.attacks),
    },
    Field {
        name: "strength",
        accessor: Accessor::Number(|w| w.strength),
    },
    Field {
        name: "dmg_hit",
        accessor: Accessor::Number(|w| w.dmg_hit),
    },
    Field {
        name: "dmg_crit",
        accessor: Accessor::Number(|w| w.dmg_crit),
    },
    Field {
        name: "min_range",
        accessor: Accessor::Number(|w| w.min_range),
    },
    Field {
        name: "max_range",
        accessor: Accessor::Number(|w| w.max_range),
    },
];

/// Ability fields. None are numeric, so no operator suffixes apply.
pub static ABILITY_FIELDS: &[Field<Ability>] = &[
    Field {
        name: "_id",
        accessor: Accessor::Exact(|a| a.id.as_str()),
    },
    Field {
        name: "name",
        accessor: Accessor::Exact(|a| a.name.as_str()),
    },
    Field {
        name: "warband",
        accessor: Accessor::Exact(|a| a.faction.as_str()),
    },
    Field {
        name: "cost",
        accessor: Accessor::Exact(|a| a.cost.as_str()),
    },
    Field {
        name: "description",
        accessor: Accessor::Substring(|a| a.description.as_str()),
    },
    Field {
        name: "runemarks",
        accessor: Accessor::Tags(|a| a.runemarks.as_slice()),
    },
];

/// Resolve a parameter name against a table.
///
/// Plain names resolve to [`Comparison::Eq`]. A suffixed name resolves
/// only if its base names a numeric field.
pub fn resolve<E>(table: &'static [Field<E>], name: &str) -> Option<(&'static Field<E>, Comparison)> {
    if let Some(field) = lookup(table, name) {
        return Some((field, Comparison::Eq));
    }
    match Comparison::split(name) {
        (_, Comparison::Eq) => None,
        (base, cmp) => lookup(table, base)
            .filter(|field| field.is_numeric())
            .map(|field| (field, cmp)),
    }
}

fn lookup<E>(table: &'static [Field<E>], name: &str) -> Option<&'static Field<E>> {
    table.iter().find(|field| field.name == name)
}
