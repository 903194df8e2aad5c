//! Entity builders for this crate's unit tests.

use warscry_types::{Ability, Characteristic, Dataset, Fighter, Weapon};

pub fn weapon(runemark: &str, attacks: u32) -> Weapon {
    Weapon {
        runemark: runemark.to_owned(),
        min_range: Characteristic::new(0),
        max_range: Characteristic::new(1),
        attacks: Characteristic::new(attacks),
        strength: Characteristic::new(4),
        dmg_hit: Characteristic::new(1),
        dmg_crit: Characteristic::new(3),
    }
}

pub fn fighter(id: &str, faction: &str) -> Fighter {
    Fighter {
        id: id.to_owned(),
        name: format!("fighter {id}"),
        faction: faction.to_owned(),
        runemarks: Vec::new(),
        subfaction: None,
        bladeborn: None,
        grand_alliance: String::from("order"),
        movement: Characteristic::new(4),
        toughness: Characteristic::new(4),
        wounds: Characteristic::new(12),
        points: Characteristic::new(120),
        weapons: vec![weapon("sword", 3)],
    }
}

pub fn ability(id: &str, faction: &str, description: &str, runemarks: &[&str]) -> Ability {
    Ability {
        id: id.to_owned(),
        name: format!("ability {id}"),
        cost: String::from("double"),
        faction: faction.to_owned(),
        runemarks: runemarks.iter().map(|r| (*r).to_owned()).collect(),
        description: description.to_owned(),
    }
}

/// Chainable tweaks on a fixture fighter.
pub trait FighterExt {
    fn wounds(self, wounds: u32) -> Self;
    fn toughness(self, toughness: u32) -> Self;
    fn runemarks(self, runemarks: &[&str]) -> Self;
    fn weapons(self, weapons: Vec<Weapon>) -> Self;
}

impl FighterExt for Fighter {
    fn wounds(mut self, wounds: u32) -> Self {
        self.wounds = Characteristic::new(wounds);
        self
    }

    fn toughness(mut self, toughness: u32) -> Self {
        self.toughness = Characteristic::new(toughness);
        self
    }

    fn runemarks(mut self, runemarks: &[&str]) -> Self {
        self.runemarks = runemarks.iter().map(|r| (*r).to_owned()).collect();
        self
    }

    fn weapons(mut self, weapons: Vec<Weapon>) -> Self {
        self.weapons = weapons;
        self
    }
}

/// A dataset of `n` fighters with wounds `1..=n`, alternating factions,
/// and one ability per faction.
pub fn dataset(n: u32) -> Dataset {
    let fighters = (1..=n)
        .map(|i| {
            let faction = if i % 2 == 0 { "even" } else { "odd" };
            fighter(&i.to_string(), faction).wounds(i)
        })
        .collect();
    let abilities = vec![
        ability("a-even", "even", "Heal 3 wounds", &["hero"]),
        ability("a-odd", "odd", "Add 1 to the Attacks characteristic", &[]),
    ];
    Dataset {
        fighters,
        abilities,
        ..Dataset::empty()
    }
}
