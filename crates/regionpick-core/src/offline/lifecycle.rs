// crates/regionpick-core/src/offline/lifecycle.rs
use super::manifest::{CacheManifest, FetchStrategy};
use super::storage::{CacheStorage, Fetcher};
use crate::error::{Error, Result};
use std::cell::Cell;

/// Where a worker is in its lifecycle.
///
/// `Parsed → Installing → Installed → Active → Superseded`, or
/// `Installing → Redundant` when install fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Parsed,
    Installing,
    Installed,
    Active,
    Superseded,
    Redundant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Number of URLs stored in the bucket.
    pub cached: usize,
    /// Whether the host should activate without waiting for older workers.
    pub skip_waiting: bool,
}

/// Answer to an intercepted request, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Served<R> {
    Network(R),
    Cache(R),
}

impl<R> Served<R> {
    pub fn into_response(self) -> R {
        match self {
            Served::Network(r) | Served::Cache(r) => r,
        }
    }

    pub fn is_from_cache(&self) -> bool {
        matches!(self, Served::Cache(_))
    }
}

/// One version of the offline cache worker.
///
/// Event handlers take `&self`: the host may deliver fetch events while
/// install or activate are still suspended.
pub struct OfflineWorker<S, N> {
    manifest: CacheManifest,
    storage: S,
    network: N,
    state: Cell<WorkerState>,
}

impl<S, N> OfflineWorker<S, N>
where
    S: CacheStorage,
    N: Fetcher<Request = S::Request, Response = S::Response>,
{
    pub fn new(manifest: CacheManifest, storage: S, network: N) -> Self {
        Self {
            manifest,
            storage,
            network,
            state: Cell::new(WorkerState::Parsed),
        }
    }

    pub fn manifest(&self) -> &CacheManifest {
        &self.manifest
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn state(&self) -> WorkerState {
        self.state.get()
    }

    /// Pre-caches every manifest URL into the versioned bucket.
    ///
    /// The add is all-or-nothing. On failure the worker becomes
    /// [`WorkerState::Redundant`] and never activates, so the previous
    /// version stays in charge.
    pub async fn install(&self) -> Result<InstallOutcome> {
        if self.state() != WorkerState::Parsed {
            return Err(Error::InvalidState(format!(
                "install requested in state {:?}",
                self.state()
            )));
        }
        self.state.set(WorkerState::Installing);
        log::info!(
            "Installing {} ({} assets)",
            self.manifest.cache_name,
            self.manifest.assets.len()
        );

        match self
            .storage
            .add_all(&self.manifest.cache_name, &self.manifest.assets)
            .await
        {
            Ok(()) => {
                self.state.set(WorkerState::Installed);
                Ok(InstallOutcome {
                    cached: self.manifest.assets.len(),
                    skip_waiting: self.manifest.skip_waiting,
                })
            }
            Err(e) => {
                self.state.set(WorkerState::Redundant);
                log::error!("Install of {} failed: {e}", self.manifest.cache_name);
                Err(e)
            }
        }
    }

    /// Deletes every bucket not named by the current manifest and returns
    /// the deleted names.
    pub async fn activate(&self) -> Result<Vec<String>> {
        match self.state() {
            WorkerState::Installed | WorkerState::Active => {}
            other => {
                return Err(Error::InvalidState(format!(
                    "activate requested in state {other:?}"
                )))
            }
        }

        let mut deleted = Vec::new();
        for name in self.storage.bucket_names().await? {
            if name == self.manifest.cache_name {
                continue;
            }
            if self.storage.delete_bucket(&name).await? {
                log::info!("Deleted stale cache {name}");
                deleted.push(name);
            }
        }

        self.state.set(WorkerState::Active);
        Ok(deleted)
    }

    /// Marks this worker as replaced by a newer version.
    pub fn supersede(&self) {
        self.state.set(WorkerState::Superseded);
    }

    /// Answers an intercepted request according to the manifest strategy.
    /// The request goes to the network unchanged.
    ///
    /// When neither the network nor the cache can answer, the network error
    /// is returned as is.
    pub async fn handle_fetch(&self, request: &S::Request) -> Result<Served<S::Response>> {
        match self.manifest.strategy {
            FetchStrategy::NetworkFirst => self.network_first(request).await,
            FetchStrategy::CacheFirst => self.cache_first(request).await,
        }
    }

    async fn network_first(&self, request: &S::Request) -> Result<Served<S::Response>> {
        let network_err = match self.network.fetch(request).await {
            Ok(response) => return Ok(Served::Network(response)),
            Err(e) => e,
        };

        match self.cached(request).await {
            Some(response) => {
                log::debug!(
                    "Network failed for {}, served from cache",
                    self.network.url_of(request)
                );
                Ok(Served::Cache(response))
            }
            None => Err(network_err),
        }
    }

    async fn cache_first(&self, request: &S::Request) -> Result<Served<S::Response>> {
        if let Some(response) = self.cached(request).await {
            return Ok(Served::Cache(response));
        }
        self.network.fetch(request).await.map(Served::Network)
    }

    async fn cached(&self, request: &S::Request) -> Option<S::Response> {
        match self
            .storage
            .lookup(request, self.manifest.fallback_bucket())
            .await
        {
            Ok(found) => found,
            Err(e) => {
                log::warn!(
                    "Cache lookup for {} failed: {e}",
                    self.network.url_of(request)
                );
                None
            }
        }
    }
}
