//! Fetch-and-validate pipeline.
//!
//! [`load`] is the only way a [`Dataset`] is built from remote data. It
//! fetches both files, decodes them, validates every entity, and derives
//! the warbands. Any failure discards everything built so far: the caller
//! either gets a complete dataset or an error, never a partial one.
//!
//! The same pipeline serves the mandatory startup load (where an error is
//! fatal) and background refreshes (where an error is logged and the last
//! good dataset keeps serving).

use serde::de::DeserializeOwned;
use tracing::info;
use warscry_types::{Ability, Dataset, Fighter, ValidationError, WarbandError};

use crate::source::{DataSource, SourceError, SourceKind};

/// Errors that abort a load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A remote file could not be retrieved.
    #[error("load {kind}: {source}")]
    Fetch {
        /// Which file failed.
        kind: SourceKind,
        /// The underlying source error.
        #[source]
        source: SourceError,
    },

    /// A remote file was not valid JSON for its entity type.
    #[error("decode {kind}: {source}")]
    Decode {
        /// Which file failed.
        kind: SourceKind,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An entity violated a structural invariant.
    #[error("invalid {kind} entry at index {index}: {source}")]
    Invalid {
        /// Which file contained the entity.
        kind: SourceKind,
        /// Position of the entity in its file.
        index: usize,
        /// The violated invariant.
        #[source]
        source: ValidationError,
    },

    /// Warband derivation found conflicting entities.
    #[error("derive warbands: {source}")]
    Warband {
        /// The underlying derivation error.
        #[from]
        source: WarbandError,
    },
}

/// Fetch, decode, validate, and assemble a complete dataset.
///
/// Both files are fetched concurrently.
///
/// # Errors
///
/// Returns [`LoadError`] on the first fetch, decode, validation, or
/// derivation failure.
pub async fn load<S: DataSource>(source: &S) -> Result<Dataset, LoadError> {
    let (fighter_bytes, ability_bytes) = tokio::try_join!(
        fetch(source, SourceKind::Fighters),
        fetch(source, SourceKind::Abilities),
    )?;

    let dataset = assemble(&fighter_bytes, &ability_bytes)?;
    info!(
        fighters = dataset.fighters.len(),
        abilities = dataset.abilities.len(),
        warbands = dataset.warbands.len(),
        "loaded and validated dataset"
    );
    Ok(dataset)
}

/// Decode, validate, and assemble a dataset from raw file bodies.
///
/// # Errors
///
/// Returns [`LoadError`] if either body fails to decode or validate, or if
/// warband derivation fails.
pub fn assemble(fighter_bytes: &[u8], ability_bytes: &[u8]) -> Result<Dataset, LoadError> {
    let fighters: Vec<Fighter> = decode(SourceKind::Fighters, fighter_bytes)?;
    check_all(SourceKind::Fighters, &fighters, Fighter::validate)?;

    let abilities: Vec<Ability> = decode(SourceKind::Abilities, ability_bytes)?;
    check_all(SourceKind::Abilities, &abilities, Ability::validate)?;

    Ok(Dataset::assemble(fighters, abilities)?)
}

async fn fetch<S: DataSource>(source: &S, kind: SourceKind) -> Result<Vec<u8>, LoadError> {
    source
        .fetch(kind)
        .await
        .map_err(|source| LoadError::Fetch { kind, source })
}

fn decode<T: DeserializeOwned>(kind: SourceKind, bytes: &[u8]) -> Result<Vec<T>, LoadError> {
    serde_json::from_slice(bytes).map_err(|source| LoadError::Decode { kind, source })
}

fn check_all<T>(
    kind: SourceKind,
    entities: &[T],
    validate: impl Fn(&T) -> Result<(), ValidationError>,
) -> Result<(), LoadError> {
    entities
        .iter()
        .enumerate()
        .try_for_each(|(index, entity)| {
            validate(entity).map_err(|source| LoadError::Invalid {
                kind,
                index,
                source,
            })
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{MemorySource, ability_json, fighter_json};

    #[tokio::test]
    async fn loads_complete_dataset() {
        let source = MemorySource::new(
            fighter_json(&[("1", "f1", Some("b1")), ("2", "f2", None)]),
            ability_json(&[("a", "b1"), ("b", "f2")]),
        );

        let ds = load(&source).await.unwrap();
        assert_eq!(ds.fighters.len(), 2);
        assert_eq!(ds.abilities.len(), 2);
        assert_eq!(ds.warbands.len(), 2);
        assert_eq!(ds.warband("f1").unwrap().abilities.len(), 1);
    }

    #[tokio::test]
    async fn invalid_json_aborts_load() {
        let source = MemorySource::new(fighter_json(&[("1", "f1", None)]), "not json".to_owned());
        let err = load(&source).await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::Decode {
                kind: SourceKind::Abilities,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn fetch_failure_aborts_load() {
        let source = MemorySource::new(fighter_json(&[]), ability_json(&[]));
        source.fail_fetch(SourceKind::Fighters, true);
        let err = load(&source).await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::Fetch {
                kind: SourceKind::Fighters,
                ..
            }
        ));
    }

    #[test]
    fn invariant_violation_reports_index() {
        let fighters = r#"[
            {"_id": "1", "name": "ok", "warband": "f", "movement": 3, "toughness": 3,
             "wounds": 8, "weapons": [{"runemark": "axe", "min_range": 0, "max_range": 1,
             "attacks": 2, "strength": 3, "dmg_hit": 1, "dmg_crit": 2}]},
            {"_id": "2", "name": "broken", "warband": "f", "movement": 3, "toughness": 3,
             "wounds": 8, "weapons": []}
        ]"#;
        let err = assemble(fighters.as_bytes(), b"[]").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                kind: SourceKind::Fighters,
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn negative_characteristic_is_a_decode_failure() {
        let fighters = r#"[{"_id": "1", "name": "n", "warband": "f", "movement": -1,
            "toughness": 3, "wounds": 8, "weapons": []}]"#;
        let err = assemble(fighters.as_bytes(), b"[]").unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
    }
}
