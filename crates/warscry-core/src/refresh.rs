//! Background refresh scheduler.
//!
//! The scheduler is the only writer to the [`SnapshotStore`]. On every
//! timer tick it issues a metadata-only request against both remote files
//! and compares the returned `ETag`s with the ones recorded at the last
//! successful refresh. Only when something changed does it run the full
//! [`pipeline::load`] for both files and install the result.
//!
//! # Cycle policy
//!
//! | Situation | Effect |
//! |-----------|--------|
//! | Either metadata request fails | Abort, keep tokens, retry next tick |
//! | Both tokens unchanged | No-op |
//! | Any token changed or missing | Load both files |
//! | Load fails | Abort, keep data and tokens, retry next tick |
//! | Load succeeds | Install dataset, record both new tokens |
//!
//! # Lifecycle
//!
//! ```text
//! Idle --tick--> Checking --cycle done--> Idle
//!   \                                      |
//!    +------------- stop signal -----------+--> Stopped
//! ```
//!
//! The stop signal is cooperative: it is only observed between cycles, so
//! an in-flight cycle always completes before the loop exits.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::pipeline;
use crate::source::{DataSource, SourceKind};
use crate::store::SnapshotStore;

/// Shortest accepted poll interval.
const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Observable scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerState {
    /// Waiting for the next tick.
    Idle,
    /// Running one refresh cycle.
    Checking,
    /// The loop has exited; no further ticks are processed.
    Stopped,
}

/// What one refresh cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Neither source changed; the store was not touched.
    Unchanged,
    /// A new dataset was installed.
    Refreshed {
        /// Fighters in the installed dataset.
        fighters: usize,
        /// Abilities in the installed dataset.
        abilities: usize,
    },
    /// A metadata request failed; nothing was changed.
    CheckFailed,
    /// The fetch-and-validate pipeline failed; nothing was changed.
    LoadFailed,
}

/// Errors surfaced when shutting the scheduler down.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The background task panicked or was cancelled.
    #[error("refresh task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Change-validator tokens recorded at the last successful refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validators {
    fighters: Option<String>,
    abilities: Option<String>,
}

impl Validators {
    /// Token recorded for one source.
    pub fn get(&self, kind: SourceKind) -> Option<&str> {
        match kind {
            SourceKind::Fighters => self.fighters.as_deref(),
            SourceKind::Abilities => self.abilities.as_deref(),
        }
    }

    fn set(&mut self, kind: SourceKind, token: Option<String>) {
        match kind {
            SourceKind::Fighters => self.fighters = token,
            SourceKind::Abilities => self.abilities = token,
        }
    }
}

/// Whether a source should be considered changed.
///
/// A missing token on either side counts as a change.
fn has_changed(previous: Option<&str>, current: Option<&str>) -> bool {
    match (previous, current) {
        (Some(previous), Some(current)) => previous != current,
        _ => true,
    }
}

/// Periodic, `ETag`-driven dataset refresher.
pub struct RefreshScheduler<S> {
    source: Arc<S>,
    store: Arc<SnapshotStore>,
    interval: Duration,
    validators: Validators,
    state: watch::Sender<SchedulerState>,
}

impl<S: DataSource + 'static> RefreshScheduler<S> {
    /// Create a scheduler polling `source` every `interval`.
    ///
    /// No tokens are recorded yet, so the first tick always refreshes.
    pub fn new(source: Arc<S>, store: Arc<SnapshotStore>, interval: Duration) -> Self {
        Self {
            source,
            store,
            interval: interval.max(MIN_INTERVAL),
            validators: Validators::default(),
            state: watch::Sender::new(SchedulerState::Idle),
        }
    }

    /// Tokens recorded at the last successful refresh.
    pub const fn validators(&self) -> &Validators {
        &self.validators
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SchedulerState> {
        self.state.subscribe()
    }

    /// Run exactly one refresh cycle.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.state.send_replace(SchedulerState::Checking);
        let outcome = self.check_and_refresh().await;
        self.state.send_replace(SchedulerState::Idle);
        outcome
    }

    async fn check_and_refresh(&mut self) -> CycleOutcome {
        debug!("checking for data updates");

        let (fighters, abilities) = tokio::join!(
            self.source.validator(SourceKind::Fighters),
            self.source.validator(SourceKind::Abilities),
        );

        let fighters_token = match fighters {
            Ok(token) => token,
            Err(e) => {
                error!(error = %e, "failed to check fighters validator");
                return CycleOutcome::CheckFailed;
            }
        };
        let abilities_token = match abilities {
            Ok(token) => token,
            Err(e) => {
                error!(error = %e, "failed to check abilities validator");
                return CycleOutcome::CheckFailed;
            }
        };

        let fighters_changed = has_changed(
            self.validators.get(SourceKind::Fighters),
            fighters_token.as_deref(),
        );
        let abilities_changed = has_changed(
            self.validators.get(SourceKind::Abilities),
            abilities_token.as_deref(),
        );

        if !fighters_changed && !abilities_changed {
            info!("no data changes detected");
            return CycleOutcome::Unchanged;
        }

        info!(
            fighters_changed,
            abilities_changed, "data changed, refreshing both sources"
        );

        let dataset = match pipeline::load(self.source.as_ref()).await {
            Ok(dataset) => dataset,
            Err(e) => {
                error!(error = %e, "refresh failed, keeping previous data");
                return CycleOutcome::LoadFailed;
            }
        };

        let outcome = CycleOutcome::Refreshed {
            fighters: dataset.fighters.len(),
            abilities: dataset.abilities.len(),
        };
        self.store.install(dataset);
        self.validators.set(SourceKind::Fighters, fighters_token);
        self.validators.set(SourceKind::Abilities, abilities_token);

        let (fighters, abilities) = self.store.counts();
        info!(fighters, abilities, "data refresh complete");
        outcome
    }

    /// Run the timer loop until `stop` changes or its sender is dropped.
    ///
    /// The first tick fires one full interval after the call, since the
    /// caller is expected to have performed the startup load already.
    pub async fn run(mut self, mut stop: watch::Receiver<bool>) {
        let first_tick = Instant::now()
            .checked_add(self.interval)
            .unwrap_or_else(Instant::now);
        let mut ticker = tokio::time::interval_at(first_tick, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = self.interval.as_secs(), "refresh loop started");

        loop {
            tokio::select! {
                biased;
                _ = stop.changed() => break,
                _ = ticker.tick() => {
                    let outcome = self.run_cycle().await;
                    debug!(?outcome, "refresh cycle finished");
                }
            }
        }

        self.state.send_replace(SchedulerState::Stopped);
        info!("refresh loop stopped");
    }

    /// Spawn the timer loop on a background task.
    pub fn spawn(self) -> RefreshHandle {
        let (stop, stop_rx) = watch::channel(false);
        let state = self.subscribe();
        let task = tokio::spawn(self.run(stop_rx));
        RefreshHandle { stop, state, task }
    }
}

/// Control handle for a spawned [`RefreshScheduler`].
pub struct RefreshHandle {
    stop: watch::Sender<bool>,
    state: watch::Receiver<SchedulerState>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Current scheduler state.
    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    /// Signal the loop to stop and wait for it to exit.
    ///
    /// An in-flight cycle finishes first.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError::Join`] if the background task panicked.
    pub async fn stop(self) -> Result<(), RefreshError> {
        if self.stop.send(true).is_err() {
            warn!("refresh loop already exited before stop");
        }
        self.task.await?;
        Ok(())
    }
}
