//! Immutable dataset snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::{Ability, Fighter};
use crate::error::WarbandError;
use crate::warband::{Warband, derive_warbands};

/// One complete, internally consistent instance of the dataset.
///
/// Produced by a single fetch-and-validate cycle and never mutated after
/// construction. Refreshes build a new value and replace the old one
/// wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    /// Every fighter, in upstream order.
    pub fighters: Vec<Fighter>,
    /// Every ability and battle trait, in upstream order.
    pub abilities: Vec<Ability>,
    /// Warbands derived from `fighters` and `abilities`.
    pub warbands: Vec<Warband>,
    /// When this dataset was assembled. `None` for the empty dataset.
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Dataset {
    /// Assemble a dataset from already-validated fighters and abilities,
    /// deriving the warbands and stamping the load time.
    ///
    /// # Errors
    ///
    /// Returns [`WarbandError`] if warband derivation finds duplicate ids.
    pub fn assemble(fighters: Vec<Fighter>, abilities: Vec<Ability>) -> Result<Self, WarbandError> {
        let warbands = derive_warbands(&fighters, &abilities)?;
        Ok(Self {
            fighters,
            abilities,
            warbands,
            loaded_at: Some(Utc::now()),
        })
    }

    /// The empty dataset served before the first install.
    pub const fn empty() -> Self {
        Self {
            fighters: Vec::new(),
            abilities: Vec::new(),
            warbands: Vec::new(),
            loaded_at: None,
        }
    }

    /// Whether the dataset holds no entities at all.
    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty() && self.abilities.is_empty()
    }

    /// Look up a warband by faction runemark, ignoring case.
    pub fn warband(&self, name: &str) -> Option<&Warband> {
        let wanted = name.to_lowercase();
        self.warbands
            .iter()
            .find(|w| w.name.to_lowercase() == wanted)
    }
}
