//! Fighters, weapons, and abilities.
//!
//! Field names on the wire follow the upstream dataset (`_id`, `warband`,
//! `dmg_hit`, ...). Each entity carries a `validate` method that checks the
//! structural invariants not already enforced by the type system; negative
//! characteristics are rejected earlier, at deserialization.

use serde::{Deserialize, Serialize};

use crate::characteristic::Characteristic;
use crate::error::ValidationError;

/// Ability cost classifier marking a warband-wide battle trait.
pub const BATTLE_TRAIT: &str = "battle_trait";

// ---------------------------------------------------------------------------
// Weapon
// ---------------------------------------------------------------------------

/// One weapon profile of a fighter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Weapon runemark (e.g. `sword`, `ranged`).
    pub runemark: String,
    /// Minimum range in inches.
    pub min_range: Characteristic,
    /// Maximum range in inches.
    pub max_range: Characteristic,
    /// Number of attack dice.
    pub attacks: Characteristic,
    /// Strength of each attack.
    pub strength: Characteristic,
    /// Damage dealt by a normal hit.
    pub dmg_hit: Characteristic,
    /// Damage dealt by a critical hit.
    pub dmg_crit: Characteristic,
}

impl Weapon {
    /// Check the weapon's structural invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.runemark.is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "weapon",
                field: "runemark",
            });
        }
        if self.min_range > self.max_range {
            return Err(ValidationError::RangeInverted {
                min: self.min_range.get(),
                max: self.max_range.get(),
            });
        }
        if self.attacks == Characteristic::ZERO {
            return Err(ValidationError::NoAttacks(self.attacks.get()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fighter
// ---------------------------------------------------------------------------

/// A single fighter profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    /// Stable identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Faction runemark naming the warband this fighter belongs to.
    #[serde(rename = "warband")]
    pub faction: String,
    /// Free-form runemarks (`hero`, `leader`, `fly`, ...).
    #[serde(default)]
    pub runemarks: Vec<String>,
    /// Optional subfaction tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subfaction: Option<String>,
    /// Optional bladeborn runemark. Abilities tagged with it belong to
    /// this fighter's faction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bladeborn: Option<String>,
    /// Grand alliance (`order`, `chaos`, `death`, `destruction`).
    #[serde(default)]
    pub grand_alliance: String,
    /// Movement in inches.
    pub movement: Characteristic,
    /// Toughness.
    pub toughness: Characteristic,
    /// Wounds.
    pub wounds: Characteristic,
    /// Points cost.
    #[serde(default)]
    pub points: Characteristic,
    /// Weapon profiles, in dataset order.
    pub weapons: Vec<Weapon>,
}

impl Fighter {
    /// Check the fighter's structural invariants, including every weapon.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "fighter",
                field: "_id",
            });
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "fighter",
                field: "name",
            });
        }
        if self.faction.is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "fighter",
                field: "warband",
            });
        }
        if self.wounds == Characteristic::ZERO {
            return Err(ValidationError::NoWounds {
                fighter: self.name.clone(),
                wounds: self.wounds.get(),
            });
        }
        if self.weapons.is_empty() {
            return Err(ValidationError::NoWeapons {
                fighter: self.name.clone(),
            });
        }
        for (index, weapon) in self.weapons.iter().enumerate() {
            weapon.validate().map_err(|source| ValidationError::Weapon {
                fighter: self.name.clone(),
                index,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Ability
// ---------------------------------------------------------------------------

/// An ability or battle trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// Stable identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Cost classifier (`single`, `double`, `triple`, `quad`, `reaction`,
    /// or [`BATTLE_TRAIT`]).
    pub cost: String,
    /// Faction runemark naming the warband this ability belongs to.
    #[serde(rename = "warband")]
    pub faction: String,
    /// Runemarks a fighter needs to use this ability.
    #[serde(default)]
    pub runemarks: Vec<String>,
    /// Rules text.
    #[serde(default)]
    pub description: String,
}

impl Ability {
    /// Check the ability's structural invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("_id", &self.id),
            ("name", &self.name),
            ("warband", &self.faction),
            ("cost", &self.cost),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(ValidationError::EmptyField {
                    entity: "ability",
                    field,
                });
            }
        }
        Ok(())
    }

    /// Whether this ability is a warband-wide battle trait.
    pub fn is_battle_trait(&self) -> bool {
        self.cost == BATTLE_TRAIT
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn weapon() -> Weapon {
        Weapon {
            runemark: String::from("sword"),
            min_range: Characteristic::new(0),
            max_range: Characteristic::new(1),
            attacks: Characteristic::new(4),
            strength: Characteristic::new(4),
            dmg_hit: Characteristic::new(2),
            dmg_crit: Characteristic::new(5),
        }
    }

    fn fighter() -> Fighter {
        Fighter {
            id: String::from("f-1"),
            name: String::from("Knight"),
            faction: String::from("stormcast"),
            runemarks: vec![String::from("hero")],
            subfaction: None,
            bladeborn: None,
            grand_alliance: String::from("order"),
            movement: Characteristic::new(4),
            toughness: Characteristic::new(5),
            wounds: Characteristic::new(20),
            points: Characteristic::new(200),
            weapons: vec![weapon()],
        }
    }

    #[test]
    fn valid_fighter_passes() {
        assert!(fighter().validate().is_ok());
    }

    #[test]
    fn fighter_requires_identity() {
        let mut f = fighter();
        f.name.clear();
        assert!(matches!(
            f.validate(),
            Err(ValidationError::EmptyField { field: "name", .. })
        ));

        let mut f = fighter();
        f.faction.clear();
        assert!(matches!(
            f.validate(),
            Err(ValidationError::EmptyField { field: "warband", .. })
        ));
    }

    #[test]
    fn fighter_requires_wounds_and_weapons() {
        let mut f = fighter();
        f.wounds = Characteristic::ZERO;
        assert!(matches!(f.validate(), Err(ValidationError::NoWounds { .. })));

        let mut f = fighter();
        f.weapons.clear();
        assert!(matches!(f.validate(), Err(ValidationError::NoWeapons { .. })));
    }

    #[test]
    fn invalid_weapon_fails_its_fighter() {
        let mut f = fighter();
        let mut bad = weapon();
        bad.min_range = Characteristic::new(8);
        bad.max_range = Characteristic::new(3);
        f.weapons.push(bad);

        let err = f.validate().unwrap_err();
        assert!(matches!(err, ValidationError::Weapon { index: 1, .. }));
        assert!(err.to_string().contains("min range (8) exceeds max range (3)"));
    }

    #[test]
    fn weapon_needs_attacks() {
        let mut w = weapon();
        w.attacks = Characteristic::ZERO;
        assert_eq!(w.validate(), Err(ValidationError::NoAttacks(0)));
    }

    #[test]
    fn ability_requires_cost() {
        let ability = Ability {
            id: String::from("a-1"),
            name: String::from("Onslaught"),
            cost: String::new(),
            faction: String::from("stormcast"),
            runemarks: Vec::new(),
            description: String::from("Add 1 to attacks."),
        };
        assert!(matches!(
            ability.validate(),
            Err(ValidationError::EmptyField { field: "cost", .. })
        ));
    }

    #[test]
    fn fighter_deserializes_from_wire_names() {
        let json = r#"{
            "_id": "abc",
            "name": "Liberator",
            "warband": "stormcast",
            "runemarks": ["hero"],
            "grand_alliance": "order",
            "movement": 4,
            "toughness": 4,
            "wounds": 18,
            "points": 150,
            "weapons": [
                {"runemark": "hammer", "min_range": 0, "max_range": 1,
                 "attacks": 3, "strength": 4, "dmg_hit": 2, "dmg_crit": 4}
            ]
        }"#;
        let f: Fighter = serde_json::from_str(json).unwrap();
        assert_eq!(f.id, "abc");
        assert_eq!(f.faction, "stormcast");
        assert_eq!(f.bladeborn, None);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn negative_characteristic_rejects_fighter() {
        let json = r#"{
            "_id": "abc", "name": "Liberator", "warband": "stormcast",
            "movement": -4, "toughness": 4, "wounds": 18,
            "weapons": []
        }"#;
        assert!(serde_json::from_str::<Fighter>(json).is_err());
    }
}
