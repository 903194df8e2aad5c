//! Shared application state for the query API.

use std::sync::Arc;

use warscry_core::store::SnapshotStore;

/// Static facts about the running service, shown on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Version string reported to clients.
    pub version: String,
    /// Link to the API documentation.
    pub docs_url: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_owned(),
            docs_url: String::from("https://github.com/krisling049/warcry_go"),
        }
    }
}

/// State shared by every handler.
///
/// The store is shared with the refresh scheduler, which is its only
/// writer. Handlers only ever read.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The live dataset.
    pub store: Arc<SnapshotStore>,
    /// Index page details.
    pub info: ServiceInfo,
}

impl AppState {
    /// State over `store` with default service info.
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self {
            store,
            info: ServiceInfo::default(),
        }
    }

    /// Replace the service info.
    #[must_use]
    pub fn with_info(mut self, info: ServiceInfo) -> Self {
        self.info = info;
        self
    }
}
