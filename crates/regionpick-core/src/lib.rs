// crates/regionpick-core/src/lib.rs

//! regionpick-core
//!
//! Platform-neutral building blocks for two browser-side concerns:
//!
//! - a country/region picker ([`picker::RegionPicker`]) that preselects a
//!   country from the user's language and keeps the region dropdown in sync
//! - an offline asset cache ([`offline::OfflineWorker`]) with an
//!   install / activate / fetch lifecycle over versioned cache buckets
//!
//! Both talk to their host only through traits ([`options::SelectableOptions`],
//! [`i18n::Localizer`], [`loader::DatasetSource`], [`offline::Fetcher`],
//! [`offline::CacheStorage`]). The `regionpick-wasm` crate implements them
//! on top of the DOM and the service-worker APIs.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod i18n;
pub mod language;
pub mod loader;
pub mod model;
pub mod offline;
pub mod options;
pub mod picker;
pub mod text;

// Re-exports
pub use crate::error::{Error, Result};
pub use crate::model::{Country, CountryDataset, DatasetStats, RegionEntry};
pub use crate::picker::RegionPicker;

pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::i18n::{Catalog, FnLocalizer, Localizer};
    pub use crate::language::{infer_default_country, Language, DEFAULT_COUNTRY};
    pub use crate::loader::{DatasetSource, JsonSource};
    pub use crate::model::{Country, CountryDataset, DatasetStats, RegionEntry};
    pub use crate::offline::{
        CacheManifest, CacheStorage, Fetcher, OfflineWorker, Served, WorkerState,
    };
    pub use crate::options::{MemorySelect, SelectOption, SelectableOptions};
    pub use crate::picker::RegionPicker;

    #[cfg(feature = "files")]
    pub use crate::loader::FileSource;
}
