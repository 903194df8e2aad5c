//! Warband derivation.
//!
//! A warband is not stored upstream. It is assembled from validated fighters
//! and abilities by grouping on the faction runemark. A fighter's bladeborn
//! runemark registers an alias so abilities tagged with the bladeborn
//! runemark fold into the fighter's own faction instead of forming a
//! warband of their own.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::entities::{Ability, Fighter};
use crate::error::WarbandError;

/// A named grouping of fighters, abilities, and battle traits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warband {
    /// Faction runemark shared by every member.
    pub name: String,
    /// Fighters in the warband.
    pub fighters: Vec<Fighter>,
    /// Abilities (everything except battle traits).
    pub abilities: Vec<Ability>,
    /// Abilities classified as battle traits.
    pub battle_traits: Vec<Ability>,
}

/// Accumulates one warband while tracking member ids.
#[derive(Default)]
struct Builder {
    warband: Warband,
    fighter_ids: BTreeSet<String>,
    /// Shared by abilities and battle traits.
    ability_ids: BTreeSet<String>,
}

impl Builder {
    fn add_fighter(&mut self, fighter: &Fighter) -> Result<(), WarbandError> {
        if !self.fighter_ids.insert(fighter.id.clone()) {
            return Err(WarbandError::DuplicateFighter {
                warband: self.warband.name.clone(),
                id: fighter.id.clone(),
            });
        }
        self.warband.fighters.push(fighter.clone());
        Ok(())
    }

    fn add_ability(&mut self, ability: &Ability) -> Result<(), WarbandError> {
        if !self.ability_ids.insert(ability.id.clone()) {
            return Err(WarbandError::DuplicateAbility {
                warband: self.warband.name.clone(),
                id: ability.id.clone(),
            });
        }
        let list = if ability.is_battle_trait() {
            &mut self.warband.battle_traits
        } else {
            &mut self.warband.abilities
        };
        list.push(ability.clone());
        Ok(())
    }
}

/// Group fighters and abilities into warbands.
///
/// Warbands are returned in first-seen order: fighters' factions first, in
/// dataset order, then any faction only abilities mention.
///
/// # Errors
///
/// Returns [`WarbandError`] if a warband would contain two fighters or two
/// abilities with the same id.
pub fn derive_warbands(
    fighters: &[Fighter],
    abilities: &[Ability],
) -> Result<Vec<Warband>, WarbandError> {
    let mut order: Vec<String> = Vec::new();
    let mut builders: BTreeMap<String, Builder> = BTreeMap::new();
    let mut bladeborn: BTreeMap<&str, &str> = BTreeMap::new();

    for fighter in fighters {
        builder_for(&mut builders, &mut order, &fighter.faction).add_fighter(fighter)?;
        if let Some(alias) = fighter.bladeborn.as_deref().filter(|b| !b.is_empty()) {
            bladeborn.insert(alias, fighter.faction.as_str());
        }
    }

    for ability in abilities {
        let faction = bladeborn
            .get(ability.faction.as_str())
            .copied()
            .unwrap_or(ability.faction.as_str());
        builder_for(&mut builders, &mut order, faction).add_ability(ability)?;
    }

    Ok(order
        .iter()
        .filter_map(|name| builders.remove(name))
        .map(|builder| builder.warband)
        .collect())
}

fn builder_for<'a>(
    builders: &'a mut BTreeMap<String, Builder>,
    order: &mut Vec<String>,
    faction: &str,
) -> &'a mut Builder {
    builders.entry(faction.to_owned()).or_insert_with(|| {
        order.push(faction.to_owned());
        Builder {
            warband: Warband {
                name: faction.to_owned(),
                ..Warband::default()
            },
            ..Builder::default()
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::characteristic::Characteristic;
    use crate::entities::{BATTLE_TRAIT, Weapon};

    fn fighter(id: &str, faction: &str, bladeborn: Option<&str>) -> Fighter {
        Fighter {
            id: id.to_owned(),
            name: format!("fighter {id}"),
            faction: faction.to_owned(),
            runemarks: Vec::new(),
            subfaction: None,
            bladeborn: bladeborn.map(ToOwned::to_owned),
            grand_alliance: String::from("order"),
            movement: Characteristic::new(4),
            toughness: Characteristic::new(4),
            wounds: Characteristic::new(10),
            points: Characteristic::new(100),
            weapons: vec![Weapon {
                runemark: String::from("sword"),
                min_range: Characteristic::new(0),
                max_range: Characteristic::new(1),
                attacks: Characteristic::new(3),
                strength: Characteristic::new(3),
                dmg_hit: Characteristic::new(1),
                dmg_crit: Characteristic::new(3),
            }],
        }
    }

    fn ability(id: &str, faction: &str, cost: &str) -> Ability {
        Ability {
            id: id.to_owned(),
            name: format!("ability {id}"),
            cost: cost.to_owned(),
            faction: faction.to_owned(),
            runemarks: Vec::new(),
            description: String::new(),
        }
    }

    #[test]
    fn groups_by_faction_in_first_seen_order() {
        let fighters = vec![
            fighter("1", "f1", None),
            fighter("2", "f2", None),
            fighter("3", "f1", None),
        ];
        let abilities = vec![ability("a", "f2", "double"), ability("b", "universal", "single")];

        let warbands = derive_warbands(&fighters, &abilities).unwrap();
        let names: Vec<&str> = warbands.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["f1", "f2", "universal"]);
        assert_eq!(warbands.first().unwrap().fighters.len(), 2);
        assert_eq!(warbands.get(1).unwrap().abilities.len(), 1);
    }

    #[test]
    fn bladeborn_abilities_fold_into_parent_faction() {
        let fighters = vec![fighter("1", "F1", Some("B1"))];
        let abilities = vec![ability("a", "B1", "single")];

        let warbands = derive_warbands(&fighters, &abilities).unwrap();
        assert_eq!(warbands.len(), 1);
        let wb = warbands.first().unwrap();
        assert_eq!(wb.name, "F1");
        assert_eq!(wb.abilities.first().unwrap().id, "a");
        assert!(warbands.iter().all(|w| w.name != "B1"));
    }

    #[test]
    fn battle_traits_are_split_out() {
        let fighters = vec![fighter("1", "f1", None)];
        let abilities = vec![ability("a", "f1", BATTLE_TRAIT), ability("b", "f1", "triple")];

        let warbands = derive_warbands(&fighters, &abilities).unwrap();
        let wb = warbands.first().unwrap();
        assert_eq!(wb.battle_traits.len(), 1);
        assert_eq!(wb.abilities.len(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let fighters = vec![fighter("1", "f1", None), fighter("1", "f1", None)];
        let err = derive_warbands(&fighters, &[]).unwrap_err();
        assert!(matches!(err, WarbandError::DuplicateFighter { .. }));

        let fighters = vec![fighter("1", "f1", None)];
        let abilities = vec![ability("a", "f1", "single"), ability("a", "f1", "double")];
        let err = derive_warbands(&fighters, &abilities).unwrap_err();
        assert!(matches!(err, WarbandError::DuplicateAbility { .. }));
    }

    #[test]
    fn ability_and_battle_trait_cannot_share_an_id() {
        let fighters = vec![fighter("1", "f1", None)];
        let abilities = vec![ability("dup", "f1", "double"), ability("dup", "f1", BATTLE_TRAIT)];
        let err = derive_warbands(&fighters, &abilities).unwrap_err();
        assert!(matches!(err, WarbandError::DuplicateAbility { ref id, .. } if id == "dup"));
    }

    #[test]
    fn same_id_in_different_warbands_is_fine() {
        let fighters = vec![fighter("1", "f1", None), fighter("1", "f2", None)];
        assert_eq!(derive_warbands(&fighters, &[]).unwrap().len(), 2);
    }
}
