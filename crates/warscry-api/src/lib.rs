//! HTTP query API for the Warscry dataset.
//!
//! This crate provides an Axum server that exposes:
//!
//! - **Index** (`GET /`) with service info, negotiated as JSON, HTML or
//!   plain text from the `Accept` header
//! - **Health** (`GET /health`) with loaded entity counts
//! - **Query endpoints** (`/fighters`, `/abilities`) that validate the
//!   query string and filter the current snapshot
//! - **Warband endpoints** (`/warbands`, `/warbands/{name}`)
//!
//! # Architecture
//!
//! Every request takes one [`Arc<Dataset>`] from the shared
//! [`SnapshotStore`] and works against it for its whole lifetime, so a
//! refresh completing mid-request never changes what the request sees.
//! Reads never block the refresh scheduler and vice versa.
//!
//! [`Arc<Dataset>`]: warscry_types::Dataset
//! [`SnapshotStore`]: warscry_core::store::SnapshotStore

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::{AppState, ServiceInfo};
