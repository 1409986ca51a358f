// crates/regionpick-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (files, HTTP, decompression, snapshots) and
//! hands validated [`CountryDataset`]s to the picker through the
//! [`DatasetSource`] trait.

use crate::error::Result;
use crate::model::CountryDataset;

#[cfg(feature = "files")]
mod common_io;
#[cfg(feature = "files")]
mod file;
#[cfg(feature = "fetch")]
mod http;

#[cfg(feature = "files")]
pub use file::FileSource;
#[cfg(feature = "fetch")]
pub use http::HttpSource;

/// Path the host page serves the dataset from.
pub const DATASET_PATH: &str = "/data/countries.json";

/// Directory holding the sample dataset shipped with this crate.
#[cfg(feature = "files")]
pub fn default_data_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[cfg(feature = "files")]
pub fn default_dataset_filename() -> &'static str {
    "countries.json"
}

/// Anything that can produce the country dataset.
///
/// Loading may suspend (network, disk). Implementations must not retry and
/// must not return a partially parsed dataset.
#[allow(async_fn_in_trait)]
pub trait DatasetSource {
    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;

    async fn load(&self) -> Result<CountryDataset>;
}

/// JSON already held in memory (embedded assets, tests).
#[derive(Debug, Clone)]
pub struct JsonSource {
    label: String,
    bytes: Vec<u8>,
}

impl JsonSource {
    pub fn new(label: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            bytes: bytes.into(),
        }
    }
}

impl DatasetSource for JsonSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn load(&self) -> Result<CountryDataset> {
        CountryDataset::from_json_slice(&self.bytes)
    }
}

/// An already loaded dataset.
impl DatasetSource for CountryDataset {
    fn describe(&self) -> String {
        format!("in-memory dataset ({} countries)", self.len())
    }

    async fn load(&self) -> Result<CountryDataset> {
        Ok(self.clone())
    }
}
