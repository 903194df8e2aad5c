//! Snapshot-wide evaluation.
//!
//! Fighters are evaluated concurrently, one task per fighter, since each
//! fighter also fans out over its weapons. Abilities are evaluated in a
//! single pass. Neither preserves a meaningful result order for fighters;
//! callers must treat the fighter result as an unordered set.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::debug;
use warscry_types::{Ability, Dataset, Fighter};

use crate::error::EvalError;
use crate::query::{AbilityQuery, FighterQuery};

/// Every fighter in `snapshot` matching `query`, in completion order.
///
/// An empty query returns the whole collection without evaluating.
///
/// # Errors
///
/// Returns [`EvalError::Join`] if an evaluation task fails to complete.
pub async fn filter_fighters(
    snapshot: Arc<Dataset>,
    query: Arc<FighterQuery>,
) -> Result<Vec<Fighter>, EvalError> {
    if query.is_empty() {
        return Ok(snapshot.fighters.clone());
    }

    let mut tasks = JoinSet::new();
    for index in 0..snapshot.fighters.len() {
        let snapshot = Arc::clone(&snapshot);
        let query = Arc::clone(&query);
        tasks.spawn(async move {
            snapshot
                .fighters
                .get(index)
                .filter(|fighter| query.matches(fighter))
                .cloned()
        });
    }

    let mut matches = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        if let Some(fighter) = joined? {
            matches.push(fighter);
        }
    }

    debug!(
        matched = matches.len(),
        total = snapshot.fighters.len(),
        "filtered fighters"
    );
    Ok(matches)
}

/// Every ability in `snapshot` matching `query`, in dataset order.
pub fn filter_abilities(snapshot: &Dataset, query: &AbilityQuery) -> Vec<Ability> {
    if query.is_empty() {
        return snapshot.abilities.clone();
    }

    let matches: Vec<Ability> = snapshot
        .abilities
        .iter()
        .filter(|ability| query.matches(ability))
        .cloned()
        .collect();
    debug!(
        matched = matches.len(),
        total = snapshot.abilities.len(),
        "filtered abilities"
    );
    matches
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::criteria::Criteria;
    use crate::testing::dataset;

    fn ids(fighters: &[Fighter]) -> BTreeSet<String> {
        fighters.iter().map(|f| f.id.clone()).collect()
    }

    async fn run(snapshot: &Arc<Dataset>, pairs: &[(&str, &str)]) -> Vec<Fighter> {
        let criteria: Criteria = pairs.iter().copied().collect();
        let query = FighterQuery::parse(&criteria).unwrap();
        filter_fighters(Arc::clone(snapshot), Arc::new(query))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn empty_criteria_return_everything() {
        let snapshot = Arc::new(dataset(25));
        let all = run(&snapshot, &[]).await;
        assert_eq!(ids(&all), ids(&snapshot.fighters));
        assert_eq!(all.len(), 25);
    }

    #[tokio::test]
    async fn concurrent_filter_matches_sequential_filter() {
        let snapshot = Arc::new(dataset(40));
        let pairs = [("wounds__gt", "10"), ("wounds__lte", "30"), ("warband", "EVEN")];

        let concurrent = run(&snapshot, &pairs).await;

        let criteria: Criteria = pairs.into_iter().collect();
        let query = FighterQuery::parse(&criteria).unwrap();
        let sequential: Vec<Fighter> = snapshot
            .fighters
            .iter()
            .filter(|f| query.matches(f))
            .cloned()
            .collect();

        assert_eq!(ids(&concurrent), ids(&sequential));
        assert_eq!(concurrent.len(), 10);
    }

    #[tokio::test]
    async fn no_match_is_empty_not_error() {
        let snapshot = Arc::new(dataset(5));
        assert!(run(&snapshot, &[("wounds__gt", "100")]).await.is_empty());
    }

    #[tokio::test]
    async fn empty_snapshot_yields_nothing() {
        let snapshot = Arc::new(Dataset::empty());
        assert!(run(&snapshot, &[("wounds", "1")]).await.is_empty());
    }

    #[test]
    fn abilities_filter_in_order() {
        let snapshot = dataset(2);
        let all = filter_abilities(&snapshot, &AbilityQuery::default());
        assert_eq!(all, snapshot.abilities);

        let criteria: Criteria = [("description", "wounds")].into_iter().collect();
        let found = filter_abilities(&snapshot, &AbilityQuery::parse(&criteria).unwrap());
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|a| a.id.as_str()), Some("a-even"));
    }
}
