// crates/regionpick-core/src/offline/memory.rs

//! In-memory network and cache backends.

use super::storage::{CacheStorage, Fetcher};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryResponse {
    pub url: String,
    pub body: Vec<u8>,
}

#[derive(Default)]
struct NetworkState {
    routes: HashMap<String, Vec<u8>>,
    offline: bool,
    requests: Vec<String>,
}

/// A scripted network. URLs without a route are rejected, and
/// [`MemoryNetwork::set_offline`] rejects everything.
///
/// Clones share state.
#[derive(Clone, Default)]
pub struct MemoryNetwork {
    state: Rc<RefCell<NetworkState>>,
}

impl MemoryNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> &Self {
        self.state
            .borrow_mut()
            .routes
            .insert(url.into(), body.into());
        self
    }

    /// Removes a route so the URL starts failing.
    pub fn unroute(&self, url: &str) -> &Self {
        self.state.borrow_mut().routes.remove(url);
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.borrow_mut().offline = offline;
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.borrow().requests.clone()
    }
}

impl Fetcher for MemoryNetwork {
    type Request = str;
    type Response = MemoryResponse;

    fn url_of(&self, url: &str) -> String {
        url.to_string()
    }

    async fn fetch(&self, url: &str) -> Result<MemoryResponse> {
        let mut state = self.state.borrow_mut();
        state.requests.push(url.to_string());

        if state.offline {
            return Err(Error::fetch(url, "network is offline"));
        }
        match state.routes.get(url) {
            Some(body) => Ok(MemoryResponse {
                url: url.to_string(),
                body: body.clone(),
            }),
            None => Err(Error::fetch(url, "no route")),
        }
    }
}

type Bucket<R> = IndexMap<String, R>;

/// Cache buckets held in memory, filled through a [`Fetcher`].
///
/// `add_all` stages every response before committing, so a failed URL
/// leaves the bucket exactly as it was.
pub struct MemoryCacheStorage<N: Fetcher> {
    network: N,
    buckets: RefCell<IndexMap<String, Bucket<N::Response>>>,
}

impl<N> MemoryCacheStorage<N>
where
    N: Fetcher,
    N::Response: Clone,
{
    pub fn new(network: N) -> Self {
        Self {
            network,
            buckets: RefCell::new(IndexMap::new()),
        }
    }

    /// Creates `bucket` if absent.
    pub fn open(&self, bucket: &str) {
        self.buckets
            .borrow_mut()
            .entry(bucket.to_string())
            .or_default();
    }

    /// Stores one response directly, bypassing the network.
    pub fn put(&self, bucket: &str, url: impl Into<String>, response: N::Response) {
        self.buckets
            .borrow_mut()
            .entry(bucket.to_string())
            .or_default()
            .insert(url.into(), response);
    }

    /// URLs stored in `bucket`, or `None` if it does not exist.
    pub fn urls(&self, bucket: &str) -> Option<Vec<String>> {
        self.buckets
            .borrow()
            .get(bucket)
            .map(|b| b.keys().cloned().collect())
    }

    pub fn contains(&self, bucket: &str, url: &str) -> bool {
        self.buckets
            .borrow()
            .get(bucket)
            .is_some_and(|b| b.contains_key(url))
    }
}

impl<N> CacheStorage for MemoryCacheStorage<N>
where
    N: Fetcher<Request = str>,
    N::Response: Clone,
{
    type Request = str;
    type Response = N::Response;

    async fn bucket_names(&self) -> Result<Vec<String>> {
        Ok(self.buckets.borrow().keys().cloned().collect())
    }

    async fn add_all(&self, bucket: &str, urls: &[String]) -> Result<()> {
        self.open(bucket);

        let mut staged = Vec::with_capacity(urls.len());
        for url in urls {
            let response = self.network.fetch(url.as_str()).await?;
            staged.push((url.clone(), response));
        }

        let mut buckets = self.buckets.borrow_mut();
        let target = buckets.entry(bucket.to_string()).or_default();
        target.extend(staged);
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<bool> {
        Ok(self.buckets.borrow_mut().shift_remove(bucket).is_some())
    }

    async fn lookup(&self, url: &str, bucket: Option<&str>) -> Result<Option<Self::Response>> {
        let buckets = self.buckets.borrow();
        let found = match bucket {
            Some(name) => buckets.get(name).and_then(|b| b.get(url)),
            None => buckets.values().find_map(|b| b.get(url)),
        };
        Ok(found.cloned())
    }
}
