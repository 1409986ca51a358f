// crates/regionpick-core/src/model.rs
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A Country entry as published by the dataset endpoint.
///
/// `regions` maps a region id to its translation key. The mapping carries no
/// meaningful order, but source order is kept so that sorting ties resolve
/// the same way on every load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    #[serde(rename = "nameKey")]
    pub name_key: String,
    #[serde(
        default,
        serialize_with = "regions_as_some",
        deserialize_with = "null_as_empty"
    )]
    pub regions: IndexMap<String, String>,
}

/// `"regions": null` reads the same as an absent field.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<IndexMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

// Mirrors `null_as_empty` so binary snapshots read back what they wrote.
fn regions_as_some<S>(regions: &IndexMap<String, String>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    Some(regions).serialize(serializer)
}

impl Country {
    pub fn new(code: impl Into<String>, name_key: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name_key: name_key.into(),
            regions: IndexMap::new(),
        }
    }

    /// Builder-style helper, mostly for tests and demos.
    pub fn with_region(mut self, id: impl Into<String>, key: impl Into<String>) -> Self {
        self.regions.insert(id.into(), key.into());
        self
    }

    pub fn has_regions(&self) -> bool {
        !self.regions.is_empty()
    }
}

/// Wire shape of the dataset resource: `{ "countries": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub(crate) struct DatasetRaw {
    pub countries: Vec<Country>,
}

/// The loaded, read-only country dataset.
///
/// Invariants, checked by [`CountryDataset::from_countries`]:
/// - at least one country
/// - every `code` is unique
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CountryDataset {
    countries: Vec<Country>,
}

/// Simple aggregate statistics for a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub countries: usize,
    pub regions: usize,
}

impl CountryDataset {
    pub fn from_countries(countries: Vec<Country>) -> Result<Self> {
        if countries.is_empty() {
            return Err(Error::InvalidData("dataset contains no countries".into()));
        }

        let mut seen = HashSet::with_capacity(countries.len());
        for c in &countries {
            // find() ignores case, so "sk" and "SK" would shadow each other
            if !seen.insert(c.code.to_ascii_uppercase()) {
                return Err(Error::InvalidData(format!(
                    "duplicate country code: {}",
                    c.code
                )));
            }
        }

        Ok(Self { countries })
    }

    /// Parses the JSON wire shape and validates it.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let raw: DatasetRaw = serde_json::from_slice(bytes)?;
        Self::from_countries(raw.countries)
    }

    pub fn from_json_reader(reader: impl std::io::Read) -> Result<Self> {
        let raw: DatasetRaw = serde_json::from_reader(reader)?;
        Self::from_countries(raw.countries)
    }

    /// Countries in dataset order.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Looks up a country by code (ASCII case-insensitive).
    pub fn find(&self, code: &str) -> Option<&Country> {
        // Linear scan is fine for a few dozen entries
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            countries: self.countries.len(),
            regions: self.countries.iter().map(|c| c.regions.len()).sum(),
        }
    }
}

/// A region expanded for display: id, translation key and the localized name
/// it sorts by.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegionEntry {
    pub id: String,
    pub key: String,
    #[serde(rename = "localizedName")]
    pub localized_name: String,
}
