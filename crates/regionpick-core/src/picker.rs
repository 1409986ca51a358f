// crates/regionpick-core/src/picker.rs

//! # Region Picker
//!
//! Keeps the region dropdown consistent with whichever country is selected
//! and preselects a country inferred from the user's language on first
//! render.
//!
//! ```rust
//! use regionpick_core::prelude::*;
//!
//! let dataset = CountryDataset::from_countries(vec![
//!     Country::new("SK", "country.sk")
//!         .with_region("KE", "region.ke")
//!         .with_region("BA", "region.ba"),
//!     Country::new("CZ", "country.cz"),
//! ])
//! .unwrap();
//!
//! let catalog = Catalog::new("sk")
//!     .with("region.ba", "Bratislavský kraj")
//!     .with("region.ke", "Košický kraj");
//!
//! let picker = RegionPicker::with_dataset(
//!     MemorySelect::new(),
//!     MemorySelect::new(),
//!     catalog,
//!     dataset,
//! );
//! assert_eq!(picker.selected_country().as_deref(), Some("SK"));
//! let names: Vec<_> = picker
//!     .region_entries("SK")
//!     .into_iter()
//!     .map(|r| r.localized_name)
//!     .collect();
//! assert_eq!(names, ["Bratislavský kraj", "Košický kraj"]);
//! ```

use crate::error::Result;
use crate::i18n::Localizer;
use crate::language;
use crate::loader::DatasetSource;
use crate::model::{CountryDataset, RegionEntry};
use crate::options::{SelectOption, SelectableOptions};
use crate::text::collate;
use std::cell::RefCell;
use std::rc::Rc;

/// Element id of the country dropdown in the host page.
pub const COUNTRY_CONTROL_ID: &str = "country";
/// Element id of the region dropdown in the host page.
pub const REGION_CONTROL_ID: &str = "region";

/// Translation key of the first, empty country option.
pub const COUNTRY_PLACEHOLDER_KEY: &str = "select_country";
/// Translation key of the first, empty region option.
pub const REGION_PLACEHOLDER_KEY: &str = "select_region";

pub struct RegionPicker<C, L> {
    country: C,
    region: C,
    localizer: L,
    dataset: Option<Rc<CountryDataset>>,
}

impl<C: SelectableOptions, L: Localizer> RegionPicker<C, L> {
    /// A picker without data. Call [`RegionPicker::initialize`] or
    /// [`RegionPicker::install_dataset`] before expecting options.
    pub fn new(country: C, region: C, localizer: L) -> Self {
        Self {
            country,
            region,
            localizer,
            dataset: None,
        }
    }

    /// A picker over an already loaded dataset, rendered immediately.
    pub fn with_dataset(country: C, region: C, localizer: L, dataset: CountryDataset) -> Self {
        let mut picker = Self::new(country, region, localizer);
        picker.install_dataset(dataset);
        picker
    }

    /// Loads the dataset from `source` and renders the country options.
    ///
    /// Failures are logged and returned unchanged; nothing is retried and
    /// the controls are not touched.
    pub async fn initialize<S: DatasetSource>(&mut self, source: &S) -> Result<()> {
        match source.load().await {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} countries from {}",
                    dataset.len(),
                    source.describe()
                );
                self.install_dataset(dataset);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load country dataset from {}: {e}", source.describe());
                Err(e)
            }
        }
    }

    /// Stores a dataset loaded elsewhere and renders the country options.
    pub fn install_dataset(&mut self, dataset: CountryDataset) {
        self.dataset = Some(Rc::new(dataset));
        self.populate_country_options();
    }

    pub fn dataset(&self) -> Option<&CountryDataset> {
        self.dataset.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.dataset.is_some()
    }

    /// Default country for `tag`, or for the localizer's current language
    /// when `tag` is `None`.
    pub fn infer_default_country(&self, tag: Option<&str>) -> &'static str {
        match tag {
            Some(tag) => language::infer_default_country(tag),
            None => language::infer_default_country(&self.localizer.current_language()),
        }
    }

    /// Rebuilds the country dropdown: placeholder first, then every country
    /// in dataset order with the inferred default selected. Regions are
    /// recomputed afterwards.
    ///
    /// Before a dataset is available this only logs a warning.
    pub fn populate_country_options(&mut self) {
        let Some(dataset) = self.dataset.clone() else {
            log::warn!("Country options requested before the dataset was loaded; skipping");
            return;
        };

        let default = self.infer_default_country(None);

        let mut options = Vec::with_capacity(dataset.len() + 1);
        options.push(SelectOption::placeholder(
            self.localizer.t(COUNTRY_PLACEHOLDER_KEY),
        ));
        options.extend(dataset.countries().iter().map(|c| {
            SelectOption::new(&c.code, self.localizer.t(&c.name_key))
                .selected(c.code.eq_ignore_ascii_case(default))
        }));

        self.country.render(&options);
        self.recompute_region_options();
    }

    /// Rebuilds the region dropdown for the currently selected country.
    /// Unknown countries and countries without regions leave only the
    /// placeholder.
    pub fn recompute_region_options(&mut self) {
        let code = self.country.selected().unwrap_or_default();

        let entries = self.region_entries(&code);
        let mut options = Vec::with_capacity(entries.len() + 1);
        options.push(SelectOption::placeholder(
            self.localizer.t(REGION_PLACEHOLDER_KEY),
        ));
        options.extend(
            entries
                .into_iter()
                .map(|r| SelectOption::new(r.id, r.localized_name)),
        );

        log::debug!("Rendering {} region options for '{code}'", options.len() - 1);
        self.region.render(&options);
    }

    /// Regions of `code` sorted by localized name. Ties keep dataset order.
    pub fn region_entries(&self, code: &str) -> Vec<RegionEntry> {
        let Some(country) = self.dataset.as_ref().and_then(|d| d.find(code)) else {
            return Vec::new();
        };

        let mut entries: Vec<RegionEntry> = country
            .regions
            .iter()
            .map(|(id, key)| RegionEntry {
                id: id.clone(),
                key: key.clone(),
                localized_name: self.localizer.t(key),
            })
            .collect();

        // sort_by is stable
        entries.sort_by(|a, b| collate(&a.localized_name, &b.localized_name));
        entries
    }

    /// Selects `code` programmatically (e.g. restoring a saved form) and
    /// recomputes the regions. Returns `false` if no such option exists.
    pub fn select_country(&mut self, code: &str) -> bool {
        let found = self.country.select(code);
        if found {
            self.recompute_region_options();
        }
        found
    }

    pub fn select_region(&mut self, id: &str) -> bool {
        self.region.select(id)
    }

    /// Live country value; `None` when the control is missing or the
    /// placeholder is selected.
    pub fn selected_country(&self) -> Option<String> {
        non_empty(self.country.selected())
    }

    /// Live region value; `None` when the control is missing or the
    /// placeholder is selected.
    pub fn selected_region(&self) -> Option<String> {
        non_empty(self.region.selected())
    }

    pub fn localizer(&self) -> &L {
        &self.localizer
    }

    pub fn country_control(&self) -> &C {
        &self.country
    }

    pub fn region_control(&self) -> &C {
        &self.region
    }
}

impl<C, L> RegionPicker<C, L>
where
    C: SelectableOptions + 'static,
    L: Localizer + 'static,
{
    /// Moves the picker into shared ownership and recomputes regions
    /// whenever the country control reports a change.
    pub fn attach(self) -> Rc<RefCell<Self>> {
        let picker = Rc::new(RefCell::new(self));
        let weak = Rc::downgrade(&picker);

        picker
            .borrow_mut()
            .country
            .on_change(Box::new(move || {
                let Some(picker) = weak.upgrade() else {
                    return;
                };
                match picker.try_borrow_mut() {
                    Ok(mut picker) => picker.recompute_region_options(),
                    Err(_) => log::warn!("Country change ignored: picker is busy"),
                };
            }));

        picker
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use crate::model::Country;
    use crate::options::MemorySelect;

    fn dataset() -> CountryDataset {
        CountryDataset::from_countries(vec![
            Country::new("SK", "k.sk")
                .with_region("r1", "k1")
                .with_region("r2", "k2"),
            Country::new("CZ", "k.cz"),
        ])
        .unwrap()
    }

    fn catalog(lang: &str) -> Catalog {
        Catalog::new(lang)
            .with(COUNTRY_PLACEHOLDER_KEY, "Choose country")
            .with(REGION_PLACEHOLDER_KEY, "Choose region")
            .with("k.sk", "Slovakia")
            .with("k.cz", "Czechia")
            // r1 sorts after r2 once localized
            .with("k1", "Zemplín")
            .with("k2", "Abov")
    }

    #[test]
    fn ambient_language_drives_default() {
        let picker = RegionPicker::new(MemorySelect::new(), MemorySelect::new(), catalog("cs-CZ"));
        assert_eq!(picker.infer_default_country(None), "CZ");
        assert_eq!(picker.infer_default_country(Some("pl")), "PL");
    }

    #[test]
    fn populate_marks_default_and_fills_regions() {
        let country = MemorySelect::new();
        let region = MemorySelect::new();
        let picker =
            RegionPicker::with_dataset(country.clone(), region.clone(), catalog("sk"), dataset());

        assert_eq!(country.values(), ["", "SK", "CZ"]);
        assert_eq!(country.labels(), ["Choose country", "Slovakia", "Czechia"]);
        assert_eq!(picker.selected_country().as_deref(), Some("SK"));

        assert_eq!(region.values(), ["", "r2", "r1"]);
        assert_eq!(region.labels(), ["Choose region", "Abov", "Zemplín"]);
        assert_eq!(picker.selected_region(), None);
    }

    #[test]
    fn country_without_regions_leaves_placeholder_only() {
        let region = MemorySelect::new();
        let mut picker =
            RegionPicker::with_dataset(MemorySelect::new(), region.clone(), catalog("sk"), dataset());

        assert!(picker.select_country("CZ"));
        assert_eq!(region.values(), [""]);

        assert!(picker.select_country("SK"));
        assert_eq!(region.values(), ["", "r2", "r1"]);
        assert!(picker.select_region("r1"));
        assert_eq!(picker.selected_region().as_deref(), Some("r1"));
    }

    #[test]
    fn lowercase_codes_still_get_the_default() {
        let dataset = CountryDataset::from_countries(vec![
            Country::new("cz", "k.cz"),
            Country::new("sk", "k.sk").with_region("r1", "k1"),
        ])
        .unwrap();
        let region = MemorySelect::new();
        let picker =
            RegionPicker::with_dataset(MemorySelect::new(), region.clone(), catalog("sk"), dataset);

        assert_eq!(picker.selected_country().as_deref(), Some("sk"));
        assert_eq!(region.values(), ["", "r1"]);
    }

    #[test]
    fn unmapped_default_falls_back_to_first_option() {
        let dataset = CountryDataset::from_countries(vec![Country::new("AT", "k.at")]).unwrap();
        let region = MemorySelect::new();
        let picker =
            RegionPicker::with_dataset(MemorySelect::new(), region.clone(), catalog("sk"), dataset);

        // SK is not in the dataset, so the placeholder stays selected
        assert_eq!(picker.selected_country(), None);
        assert_eq!(region.values(), [""]);
    }

    #[test]
    fn populate_before_dataset_is_a_no_op() {
        let country = MemorySelect::new();
        let mut picker = RegionPicker::new(country.clone(), MemorySelect::new(), catalog("sk"));

        picker.populate_country_options();
        picker.populate_country_options();

        assert!(!picker.is_ready());
        assert_eq!(country.render_count(), 0);
        assert!(country.options().is_empty());
    }

    #[test]
    fn missing_controls_report_none() {
        let picker = RegionPicker::with_dataset(
            MemorySelect::detached(),
            MemorySelect::detached(),
            catalog("sk"),
            dataset(),
        );
        assert_eq!(picker.selected_country(), None);
        assert_eq!(picker.selected_region(), None);
    }

    #[test]
    fn equal_names_keep_dataset_order() {
        let dataset = CountryDataset::from_countries(vec![Country::new("SK", "k.sk")
            .with_region("b", "same")
            .with_region("a", "same")
            .with_region("c", "other")])
        .unwrap();
        let picker = RegionPicker::with_dataset(
            MemorySelect::new(),
            MemorySelect::new(),
            Catalog::new("sk").with("same", "Nitra").with("other", "Mesto"),
            dataset,
        );
        let ids: Vec<_> = picker.region_entries("SK").into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }

    #[test]
    fn change_event_recomputes_after_attach() {
        let country = MemorySelect::new();
        let region = MemorySelect::new();
        let picker =
            RegionPicker::with_dataset(country.clone(), region.clone(), catalog("sk"), dataset())
                .attach();

        assert_eq!(region.values(), ["", "r2", "r1"]);
        assert!(country.choose("CZ"));
        assert_eq!(region.values(), [""]);
        assert_eq!(picker.borrow().selected_country().as_deref(), Some("CZ"));
    }
}
