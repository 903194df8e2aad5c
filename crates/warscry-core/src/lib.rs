//! Snapshot store, fetch pipeline, and refresh scheduling for the Warscry API.
//!
//! This crate owns everything between the remote data files and the
//! in-memory dataset that queries read from.
//!
//! # Modules
//!
//! - [`store`] -- Lock-free, hot-swappable [`SnapshotStore`].
//! - [`source`] -- [`DataSource`] trait and the `reqwest`-backed [`HttpSource`].
//! - [`pipeline`] -- Fetch, decode, validate, and assemble a [`Dataset`].
//! - [`refresh`] -- `ETag`-driven [`RefreshScheduler`] that keeps the store current.
//! - [`config`] -- Configuration loading from `warscry-config.yaml`.
//!
//! [`SnapshotStore`]: store::SnapshotStore
//! [`DataSource`]: source::DataSource
//! [`HttpSource`]: source::HttpSource
//! [`RefreshScheduler`]: refresh::RefreshScheduler
//! [`Dataset`]: warscry_types::Dataset

pub mod config;
pub mod pipeline;
pub mod refresh;
pub mod source;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
