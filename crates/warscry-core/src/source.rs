//! Remote data sources.
//!
//! The dataset lives in two independently fetchable JSON files, one for
//! fighters and one for abilities and battle traits. A [`DataSource`] can
//! fetch either file in full, or cheaply ask for its change-validator
//! token (an `ETag`) so the refresh scheduler can skip unchanged data.
//!
//! [`HttpSource`] is the production implementation over `reqwest`. Tests
//! substitute an in-memory source.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::ETAG;

/// Which of the two remote files to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The fighters collection.
    Fighters,
    /// The abilities and battle traits collection.
    Abilities,
}

impl SourceKind {
    /// Both kinds, fighters first.
    pub const ALL: [Self; 2] = [Self::Fighters, Self::Abilities];

    /// Lowercase label used in logs and errors.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fighters => "fighters",
            Self::Abilities => "abilities",
        }
    }
}

impl core::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised while talking to a remote source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The request could not be sent or the connection failed.
    #[error("{kind} request to {url} failed: {message}")]
    Transport {
        /// Which source was addressed.
        kind: SourceKind,
        /// The requested URL.
        url: String,
        /// Description of the failure.
        message: String,
    },

    /// The server answered with an unexpected status code.
    #[error("{kind} request to {url} returned status {status}")]
    Status {
        /// Which source was addressed.
        kind: SourceKind,
        /// The requested URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body could not be read.
    #[error("failed to read {kind} body: {message}")]
    Body {
        /// Which source was addressed.
        kind: SourceKind,
        /// Description of the failure.
        message: String,
    },
}

/// A remote origin for the two dataset files.
pub trait DataSource: Send + Sync {
    /// Retrieve the full body of one file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport failure or a non-2xx status.
    fn fetch(&self, kind: SourceKind) -> impl Future<Output = Result<Vec<u8>, SourceError>> + Send;

    /// Retrieve only the change-validator token of one file.
    ///
    /// `Ok(None)` means the source answered but offered no token; callers
    /// treat that as "changed".
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the metadata request fails.
    fn validator(
        &self,
        kind: SourceKind,
    ) -> impl Future<Output = Result<Option<String>, SourceError>> + Send;
}

/// [`DataSource`] over HTTP(S) using `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    fighters_url: String,
    abilities_url: String,
}

impl HttpSource {
    /// Create a source for the given URLs with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        fighters_url: impl Into<String>,
        abilities_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let fighters_url = fighters_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Transport {
                kind: SourceKind::Fighters,
                url: fighters_url.clone(),
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            fighters_url,
            abilities_url: abilities_url.into(),
        })
    }

    /// URL serving the given file.
    pub fn url(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Fighters => &self.fighters_url,
            SourceKind::Abilities => &self.abilities_url,
        }
    }

    fn transport_error(&self, kind: SourceKind, e: &reqwest::Error) -> SourceError {
        SourceError::Transport {
            kind,
            url: self.url(kind).to_owned(),
            message: e.to_string(),
        }
    }
}

impl DataSource for HttpSource {
    async fn fetch(&self, kind: SourceKind) -> Result<Vec<u8>, SourceError> {
        let url = self.url(kind);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(kind, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                kind,
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| SourceError::Body {
            kind,
            message: e.to_string(),
        })?;
        tracing::debug!(source = %kind, bytes = body.len(), "fetched remote file");
        Ok(body.to_vec())
    }

    async fn validator(&self, kind: SourceKind) -> Result<Option<String>, SourceError> {
        let url = self.url(kind);
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| self.transport_error(kind, &e))?;

        if response.status() != StatusCode::OK {
            return Err(SourceError::Status {
                kind,
                url: url.to_owned(),
                status: response.status().as_u16(),
            });
        }

        Ok(response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .filter(|tag| !tag.is_empty())
            .map(ToOwned::to_owned))
    }
}
