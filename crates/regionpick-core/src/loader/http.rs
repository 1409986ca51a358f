// crates/regionpick-core/src/loader/http.rs
#![cfg(feature = "fetch")]

use super::DatasetSource;
use crate::error::{Error, Result};
use crate::model::CountryDataset;

/// Dataset served over HTTP. Uses the blocking client, so it is meant for
/// the CLI, not for the browser build.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn load_blocking(&self) -> Result<CountryDataset> {
        let response = reqwest::blocking::get(&self.url)
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::fetch(&self.url, e))?;
        let bytes = response.bytes().map_err(|e| Error::fetch(&self.url, e))?;
        CountryDataset::from_json_slice(&bytes)
    }
}

impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn load(&self) -> Result<CountryDataset> {
        self.load_blocking()
    }
}
