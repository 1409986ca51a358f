//! regionpick-cli
//! ==============
//!
//! Command-line companion to `regionpick-core`. The binary (`regionpick`)
//! loads a country dataset and a translation catalog, then drives the same
//! [`RegionPicker`] the browser build uses over in-memory controls, so what
//! it prints is what the page would render.
//!
//! Basic usage:
//!
//! ```text
//! regionpick countries
//! regionpick --lang cs regions CZ
//! regionpick default-country en-US
//! regionpick manifest crates/regionpick-wasm/config/cache-manifest.json
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

use anyhow::{bail, Context};
use regionpick_core::i18n::Catalog;
use regionpick_core::language::primary_subtag;
use regionpick_core::loader::{default_data_dir, default_dataset_filename, FileSource};
use regionpick_core::offline::CacheManifest;
use regionpick_core::options::MemorySelect;
use regionpick_core::{CountryDataset, RegionPicker};
use std::path::PathBuf;

pub type CliPicker = RegionPicker<MemorySelect, Catalog>;

/// Where the dataset comes from.
#[derive(Debug, Clone)]
pub enum DatasetLocation {
    File { path: PathBuf, snapshot: bool },
    Url(String),
}

impl DatasetLocation {
    pub fn bundled() -> Self {
        DatasetLocation::File {
            path: default_data_dir().join(default_dataset_filename()),
            snapshot: false,
        }
    }

    pub fn load(&self) -> anyhow::Result<CountryDataset> {
        match self {
            DatasetLocation::File { path, snapshot } => FileSource::new(path)
                .with_snapshot(*snapshot)
                .load_blocking()
                .with_context(|| format!("loading dataset {}", path.display())),
            #[cfg(feature = "fetch")]
            DatasetLocation::Url(url) => regionpick_core::loader::HttpSource::new(url)
                .load_blocking()
                .with_context(|| format!("downloading dataset {url}")),
            #[cfg(not(feature = "fetch"))]
            DatasetLocation::Url(url) => {
                bail!("cannot download {url}: regionpick was built without the `fetch` feature")
            }
        }
    }
}

/// Loads `path`, or the bundled catalog for the language if one ships,
/// or an empty catalog that shows raw keys.
pub fn load_catalog(path: Option<&str>, lang: &str) -> anyhow::Result<Catalog> {
    if let Some(path) = path {
        let bytes = std::fs::read(path).with_context(|| format!("reading catalog {path}"))?;
        return Catalog::from_json_slice(lang, &bytes)
            .with_context(|| format!("parsing catalog {path}"));
    }

    let bundled = default_data_dir().join(format!("catalog.{}.json", primary_subtag(lang)));
    if bundled.exists() {
        let bytes = std::fs::read(&bundled)?;
        return Ok(Catalog::from_json_slice(lang, &bytes)?);
    }

    log::info!("No catalog for '{lang}'; showing translation keys");
    Ok(Catalog::new(lang))
}

pub fn build_picker(dataset: CountryDataset, catalog: Catalog) -> CliPicker {
    RegionPicker::with_dataset(MemorySelect::new(), MemorySelect::new(), catalog, dataset)
}

pub fn stats_lines(picker: &CliPicker) -> Vec<String> {
    let Some(dataset) = picker.dataset() else {
        return vec!["No dataset loaded".to_string()];
    };
    let stats = dataset.stats();
    vec![
        "Dataset statistics:".to_string(),
        format!("  Countries: {}", stats.countries),
        format!("  Regions: {}", stats.regions),
    ]
}

/// One line per rendered country option, default marked with `*`.
pub fn country_lines(picker: &CliPicker) -> Vec<String> {
    picker
        .country_control()
        .options()
        .into_iter()
        .filter(|o| !o.is_placeholder())
        .map(|o| {
            let mark = if o.selected { '*' } else { ' ' };
            format!("{mark} {:<4} {}", o.value, o.label)
        })
        .collect()
}

pub fn region_lines(picker: &mut CliPicker, code: &str) -> anyhow::Result<Vec<String>> {
    let code = code.trim().to_ascii_uppercase();
    if !picker.select_country(&code) {
        bail!("Country {code} not found");
    }
    Ok(picker
        .region_entries(&code)
        .into_iter()
        .map(|r| format!("{:<5} {}", r.id, r.localized_name))
        .collect())
}

pub fn manifest_lines(path: &str) -> anyhow::Result<Vec<String>> {
    let manifest =
        CacheManifest::load_from_path(path).with_context(|| format!("invalid manifest {path}"))?;

    let mut lines = vec![
        format!("Cache name:     {}", manifest.cache_name),
        format!("Strategy:       {:?}", manifest.strategy),
        format!("Fallback scope: {:?}", manifest.fallback_scope),
        format!("Skip waiting:   {}", manifest.skip_waiting),
        format!("Assets ({}):", manifest.assets.len()),
    ];
    lines.extend(manifest.assets.iter().map(|a| format!("  {a}")));
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled_picker(lang: &str) -> CliPicker {
        let dataset = DatasetLocation::bundled().load().unwrap();
        build_picker(dataset, load_catalog(None, lang).unwrap())
    }

    #[test]
    fn countries_mark_inferred_default() {
        let picker = bundled_picker("cs-CZ");
        let lines = country_lines(&picker);
        assert_eq!(lines.len(), 7);
        assert!(lines.iter().any(|l| l.starts_with("* CZ")));
        assert_eq!(lines.iter().filter(|l| l.starts_with('*')).count(), 1);
    }

    #[test]
    fn slovak_regions_are_sorted() {
        let mut picker = bundled_picker("sk");
        let lines = region_lines(&mut picker, "sk").unwrap();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].ends_with("Banskobystrický kraj"));
        assert!(lines[7].ends_with("Žilinský kraj"));
    }

    #[test]
    fn unknown_country_is_an_error() {
        let mut picker = bundled_picker("sk");
        assert!(region_lines(&mut picker, "XX").is_err());
    }

    #[test]
    fn missing_catalog_shows_keys() {
        let catalog = load_catalog(None, "fr").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn stats_count_regions() {
        let picker = bundled_picker("sk");
        assert_eq!(stats_lines(&picker)[2], "  Regions: 32");
    }
}
