//! Error types for the warscry-types crate.
//!
//! Structural invariant violations are typed so the load pipeline can
//! report exactly which entity was rejected and why.

/// A characteristic value outside the allowed range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharacteristicError {
    /// The value was negative.
    #[error("characteristic must be >= 0, got {0}")]
    Negative(i64),

    /// The value does not fit in 32 bits.
    #[error("characteristic out of range: {0}")]
    OutOfRange(i64),
}

/// A structural invariant violated by a fighter, weapon, or ability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required text field was empty.
    #[error("{entity} {field} cannot be empty")]
    EmptyField {
        /// Entity kind (`fighter`, `weapon`, `ability`).
        entity: &'static str,
        /// Name of the empty field.
        field: &'static str,
    },

    /// A fighter with zero wounds.
    #[error("fighter '{fighter}' has invalid wounds: {wounds}")]
    NoWounds {
        /// Fighter name.
        fighter: String,
        /// The offending wounds value.
        wounds: u32,
    },

    /// A fighter without any weapon profile.
    #[error("fighter '{fighter}' has no weapons")]
    NoWeapons {
        /// Fighter name.
        fighter: String,
    },

    /// A weapon whose minimum range exceeds its maximum range.
    #[error("weapon min range ({min}) exceeds max range ({max})")]
    RangeInverted {
        /// Minimum range.
        min: u32,
        /// Maximum range.
        max: u32,
    },

    /// A weapon with zero attacks.
    #[error("weapon attacks must be positive: {0}")]
    NoAttacks(u32),

    /// A weapon on a fighter failed validation.
    #[error("fighter '{fighter}' weapon {index}: {source}")]
    Weapon {
        /// Fighter name.
        fighter: String,
        /// Position of the weapon in the fighter's weapon list.
        index: usize,
        /// The underlying weapon error.
        #[source]
        source: Box<Self>,
    },
}

/// A conflict found while grouping entities into warbands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WarbandError {
    /// Two fighters with the same id landed in one warband.
    #[error("warband '{warband}' already contains a fighter with id '{id}'")]
    DuplicateFighter {
        /// Warband faction tag.
        warband: String,
        /// Duplicated fighter id.
        id: String,
    },

    /// Two abilities with the same id landed in one warband.
    #[error("warband '{warband}' already contains an ability with id '{id}'")]
    DuplicateAbility {
        /// Warband faction tag.
        warband: String,
        /// Duplicated ability id.
        id: String,
    },
}
