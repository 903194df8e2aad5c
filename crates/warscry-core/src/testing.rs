//! Test doubles and fixtures shared by this crate's unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use warscry_types::{Ability, Characteristic, Fighter, Weapon};

use crate::source::{DataSource, SourceError, SourceKind};

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
        weapons: vec![Weapon {
            runemark: String::from("sword"),
            min_range: Characteristic::new(0),
            max_range: Characteristic::new(1),
            attacks: Characteristic::new(3),
            strength: Characteristic::new(4),
            dmg_hit: Characteristic::new(1),
            dmg_crit: Characteristic::new(4),
        }],
    }
}

pub fn ability(id: &str, faction: &str) -> Ability {
    Ability {
        id: id.to_owned(),
        name: format!("ability {id}"),
        cost: String::from("double"),
        faction: faction.to_owned(),
        runemarks: Vec::new(),
        description: String::from("Until the end of the battle round..."),
    }
}

pub fn fighter_json(entries: &[(&str, &str, Option<&str>)]) -> String {
    let fighters: Vec<Fighter> = entries
        .iter()
        .map(|(id, faction, bladeborn)| Fighter {
            bladeborn: bladeborn.map(ToOwned::to_owned),
            ..fighter(id, faction)
        })
        .collect();
    serde_json::to_string(&fighters).unwrap()
}

pub fn ability_json(entries: &[(&str, &str)]) -> String {
    let abilities: Vec<Ability> = entries
        .iter()
        .map(|(id, faction)| ability(id, faction))
        .collect();
    serde_json::to_string(&abilities).unwrap()
}

/// Scripted in-memory [`DataSource`].
#[derive(Default)]
pub struct MemorySource {
    bodies: Mutex<HashMap<SourceKind, String>>,
    tokens: Mutex<HashMap<SourceKind, Option<String>>>,
    failing_fetch: Mutex<HashMap<SourceKind, bool>>,
    failing_check: Mutex<HashMap<SourceKind, bool>>,
    fetches: AtomicUsize,
    checks: AtomicUsize,
}

impl MemorySource {
    pub fn new(fighters: String, abilities: String) -> Self {
        let source = Self::default();
        source.set_body(SourceKind::Fighters, fighters);
        source.set_body(SourceKind::Abilities, abilities);
        source
    }

    pub fn set_body(&self, kind: SourceKind, body: String) {
        self.bodies.lock().unwrap().insert(kind, body);
    }

    pub fn set_token(&self, kind: SourceKind, token: Option<&str>) {
        self.tokens
            .lock()
            .unwrap()
            .insert(kind, token.map(ToOwned::to_owned));
    }

    pub fn fail_fetch(&self, kind: SourceKind, failing: bool) {
        self.failing_fetch.lock().unwrap().insert(kind, failing);
    }

    pub fn fail_check(&self, kind: SourceKind, failing: bool) {
        self.failing_check.lock().unwrap().insert(kind, failing);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn check_count(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    fn unavailable(kind: SourceKind) -> SourceError {
        SourceError::Status {
            kind,
            url: format!("memory://{kind}"),
            status: 503,
        }
    }
}

impl DataSource for MemorySource {
    async fn fetch(&self, kind: SourceKind) -> Result<Vec<u8>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing_fetch.lock().unwrap().get(&kind).copied().unwrap_or(false) {
            return Err(Self::unavailable(kind));
        }
        let bodies = self.bodies.lock().unwrap();
        Ok(bodies.get(&kind).cloned().unwrap_or_default().into_bytes())
    }

    async fn validator(&self, kind: SourceKind) -> Result<Option<String>, SourceError> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        if self.failing_check.lock().unwrap().get(&kind).copied().unwrap_or(false) {
            return Err(Self::unavailable(kind));
        }
        Ok(self.tokens.lock().unwrap().get(&kind).cloned().flatten())
    }
}
