//! Non-negative game statistic.
//!
//! Every numeric value on a fighter or weapon (movement, wounds, attacks,
//! ranges, damage) is a [`Characteristic`]. Negative values are rejected
//! both at construction and during deserialization, so a loaded dataset can
//! never contain one.

use serde::{Deserialize, Serialize};

use crate::error::CharacteristicError;

/// A bounded, non-negative integer statistic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Characteristic(u32);

impl Characteristic {
    /// Zero value.
    pub const ZERO: Self = Self(0);

    /// Create a characteristic from an unsigned value. Always valid.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Return the raw value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Return the value widened for comparison against signed query input.
    pub fn as_i64(self) -> i64 {
        i64::from(self.0)
    }
}

impl TryFrom<i64> for Characteristic {
    type Error = CharacteristicError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(CharacteristicError::Negative(value));
        }
        match u32::try_from(value) {
            Ok(raw) => Ok(Self(raw)),
            Err(_) => Err(CharacteristicError::OutOfRange(value)),
        }
    }
}

impl From<u32> for Characteristic {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Characteristic> for u32 {
    fn from(value: Characteristic) -> Self {
        value.0
    }
}

impl core::fmt::Display for Characteristic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
