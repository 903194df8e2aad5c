//! Shared type definitions for the Warscry API.
//!
//! This crate is the single source of truth for the game data served by
//! the workspace: fighters, their weapons, abilities, and the warbands
//! derived from them. It has no runtime dependencies beyond `serde`.
//!
//! # Modules
//!
//! - [`characteristic`] -- Non-negative game statistic newtype
//! - [`entities`] -- [`Fighter`], [`Weapon`], and [`Ability`] with structural validation
//! - [`warband`] -- [`Warband`] grouping and bladeborn aliasing
//! - [`dataset`] -- Immutable [`Dataset`] snapshot produced by one load
//! - [`error`] -- Validation and derivation errors

pub mod characteristic;
pub mod dataset;
pub mod entities;
pub mod error;
pub mod warband;

pub use characteristic::Characteristic;
pub use dataset::Dataset;
pub use entities::{Ability, BATTLE_TRAIT, Fighter, Weapon};
pub use error::{CharacteristicError, ValidationError, WarbandError};
pub use warband::{Warband, derive_warbands};
