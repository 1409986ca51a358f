// crates/regionpick-core/src/offline/mod.rs

//! # Offline Asset Cache
//!
//! The install / activate / fetch lifecycle of a background caching worker,
//! written against two small traits so it runs the same over the browser's
//! `CacheStorage` and over the in-memory backends used in tests.
//!
//! - [`CacheManifest`]: which URLs to pre-cache, under which versioned name
//! - [`Fetcher`] / [`CacheStorage`]: the network and the bucket store
//! - [`OfflineWorker`]: the lifecycle itself

pub mod lifecycle;
pub mod manifest;
pub mod memory;
pub mod storage;

pub use lifecycle::{InstallOutcome, OfflineWorker, Served, WorkerState};
pub use manifest::{CacheManifest, FallbackScope, FetchStrategy};
pub use memory::{MemoryCacheStorage, MemoryNetwork, MemoryResponse};
pub use storage::{CacheStorage, Fetcher};
