//! Error types for the server binary.
//!
//! [`ServerError`] is the top-level error type that wraps every failure
//! mode during startup and shutdown.

use warscry_core::config::ConfigError;
use warscry_core::pipeline::LoadError;
use warscry_core::refresh::RefreshError;
use warscry_core::source::SourceError;

/// Top-level error for the server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The HTTP client for the remote dataset could not be built.
    #[error("source error: {source}")]
    Source {
        /// The underlying source error.
        #[from]
        source: SourceError,
    },

    /// The mandatory startup load failed; the service cannot serve.
    #[error("startup load failed: {source}")]
    Load {
        /// The underlying load error.
        #[from]
        source: LoadError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("api error: {source}")]
    Api {
        /// The underlying server error.
        #[from]
        source: warscry_api::ServerError,
    },

    /// The refresh scheduler did not shut down cleanly.
    #[error("refresh error: {source}")]
    Refresh {
        /// The underlying scheduler error.
        #[from]
        source: RefreshError,
    },
}
