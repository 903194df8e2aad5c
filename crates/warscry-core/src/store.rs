//! Hot-swappable dataset store.
//!
//! [`SnapshotStore`] holds the currently served [`Dataset`] behind a single
//! [`ArcSwap`]. Readers pin an `Arc<Dataset>` for the duration of a request
//! and never take a lock; the refresh scheduler builds a complete
//! replacement off to the side and publishes it with one atomic swap.
//!
//! Fighters, abilities, and warbands live in the same published value, so a
//! reader can never observe collections from two different loads.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;
use warscry_types::Dataset;

/// Single-writer, many-reader holder of the current dataset.
#[derive(Debug)]
pub struct SnapshotStore {
    current: ArcSwap<Dataset>,
    generation: AtomicU64,
}

impl SnapshotStore {
    /// Create a store serving the empty dataset.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(Dataset::empty()),
            generation: AtomicU64::new(0),
        }
    }

    /// Return the current dataset.
    ///
    /// Never blocks and never returns a partially installed value. Before
    /// the first install this is the empty dataset.
    pub fn read(&self) -> Arc<Dataset> {
        self.current.load_full()
    }

    /// Atomically replace the served dataset.
    pub fn install(&self, dataset: Dataset) {
        self.install_arc(Arc::new(dataset));
    }

    /// Atomically replace the served dataset with an already shared value.
    pub fn install_arc(&self, dataset: Arc<Dataset>) {
        self.current.store(dataset);
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Number of installs performed since the store was created.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Fighter and ability counts of the current dataset.
    pub fn counts(&self) -> (usize, usize) {
        let current = self.current.load();
        (current.fighters.len(), current.abilities.len())
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
