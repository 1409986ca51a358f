// crates/regionpick-wasm/src/picker.rs
use crate::dom::DomSelect;
use crate::errors::to_js;
use crate::fetch::HttpDatasetSource;
use js_sys::{Function, Promise};
use regionpick_core::i18n::Localizer;
use regionpick_core::loader::{DatasetSource, DATASET_PATH};
use regionpick_core::picker::{COUNTRY_CONTROL_ID, REGION_CONTROL_ID};
use regionpick_core::RegionPicker;
use serde_wasm_bindgen::to_value;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;

/// Where the page's current language comes from.
#[derive(Debug, Clone)]
pub enum LanguageSource {
    /// A tag set once, replaced only through `setLanguage`.
    Fixed(String),
    /// A JS function returning the tag, called every time it is needed.
    Getter(Function),
}

impl LanguageSource {
    /// A function becomes a getter; anything else is read as a fixed tag
    /// (empty when it is not a string).
    pub fn from_js(value: JsValue) -> Self {
        match value.dyn_into::<Function>() {
            Ok(getter) => LanguageSource::Getter(getter),
            Err(value) => LanguageSource::Fixed(value.as_string().unwrap_or_default()),
        }
    }

    fn read(&self) -> String {
        match self {
            LanguageSource::Fixed(tag) => tag.clone(),
            LanguageSource::Getter(getter) => match getter.call0(&JsValue::NULL) {
                Ok(v) => v.as_string().unwrap_or_default(),
                Err(e) => {
                    log::warn!("Current language getter failed: {e:?}");
                    String::new()
                }
            },
        }
    }
}

/// Translation through a JS `t(key)` callback, plus the page's current
/// language.
pub struct JsLocalizer {
    translate: Function,
    language: Rc<RefCell<LanguageSource>>,
}

impl JsLocalizer {
    pub fn new(translate: Function, language: LanguageSource) -> Self {
        Self {
            translate,
            language: Rc::new(RefCell::new(language)),
        }
    }
}

impl Localizer for JsLocalizer {
    fn t(&self, key: &str) -> String {
        match self.translate.call1(&JsValue::NULL, &JsValue::from_str(key)) {
            Ok(v) => v.as_string().unwrap_or_else(|| key.to_string()),
            Err(e) => {
                log::warn!("Translation of '{key}' failed: {e:?}");
                key.to_string()
            }
        }
    }

    fn current_language(&self) -> String {
        self.language.borrow().read()
    }
}

type DomPicker = RegionPicker<DomSelect, JsLocalizer>;

/// Country/region picker bound to `#country` and `#region`.
///
/// ```javascript
/// import init, { LocationPicker } from 'regionpick-wasm';
///
/// await init();
/// const picker = new LocationPicker((key) => i18n.t(key), () => i18n.currentLanguage);
/// await picker.initialize();           // GET /data/countries.json
/// form.country = picker.selectedCountry();
/// ```
#[wasm_bindgen]
pub struct LocationPicker {
    inner: Rc<RefCell<DomPicker>>,
    language: Rc<RefCell<LanguageSource>>,
}

#[wasm_bindgen]
impl LocationPicker {
    /// `current_language` is either a getter function, read on demand, or a
    /// fixed tag.
    #[wasm_bindgen(constructor)]
    pub fn new(translate: Function, current_language: JsValue) -> LocationPicker {
        let localizer = JsLocalizer::new(translate, LanguageSource::from_js(current_language));
        let language = Rc::clone(&localizer.language);
        let picker = RegionPicker::new(
            DomSelect::new(COUNTRY_CONTROL_ID),
            DomSelect::new(REGION_CONTROL_ID),
            localizer,
        );
        LocationPicker {
            inner: picker.attach(),
            language,
        }
    }

    /// Fetches the dataset (default `/data/countries.json`) and renders the
    /// country options. The promise rejects on fetch or parse failure.
    pub fn initialize(&self, url: Option<String>) -> Promise {
        let picker = Rc::clone(&self.inner);
        let source = HttpDatasetSource::new(url.unwrap_or_else(|| DATASET_PATH.to_string()));

        future_to_promise(async move {
            // No RefCell borrow is held while the request is in flight
            let dataset = match source.load().await {
                Ok(dataset) => dataset,
                Err(e) => {
                    log::error!("Failed to load country dataset from {}: {e}", source.describe());
                    return Err(to_js(e));
                }
            };
            log::info!("Loaded {} countries", dataset.len());
            picker.borrow_mut().install_dataset(dataset);
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = inferDefaultCountry)]
    pub fn infer_default_country(&self, language_tag: Option<String>) -> String {
        self.inner
            .borrow()
            .infer_default_country(language_tag.as_deref())
            .to_string()
    }

    #[wasm_bindgen(js_name = populateCountryOptions)]
    pub fn populate_country_options(&self) {
        self.inner.borrow_mut().populate_country_options();
    }

    #[wasm_bindgen(js_name = recomputeRegionOptions)]
    pub fn recompute_region_options(&self) {
        self.inner.borrow_mut().recompute_region_options();
    }

    /// Pins the ambient language (replacing any getter) and re-renders
    /// with fresh labels.
    #[wasm_bindgen(js_name = setLanguage)]
    pub fn set_language(&self, language: String) {
        *self.language.borrow_mut() = LanguageSource::Fixed(language);
        self.inner.borrow_mut().populate_country_options();
    }

    #[wasm_bindgen(js_name = selectCountry)]
    pub fn select_country(&self, code: &str) -> bool {
        self.inner.borrow_mut().select_country(code)
    }

    #[wasm_bindgen(js_name = selectRegion)]
    pub fn select_region(&self, id: &str) -> bool {
        self.inner.borrow_mut().select_region(id)
    }

    #[wasm_bindgen(js_name = selectedCountry)]
    pub fn selected_country(&self) -> Option<String> {
        self.inner.borrow().selected_country()
    }

    #[wasm_bindgen(js_name = selectedRegion)]
    pub fn selected_region(&self) -> Option<String> {
        self.inner.borrow().selected_region()
    }

    /// Sorted `{ id, key, localizedName }` records for a country.
    pub fn regions(&self, country_code: &str) -> Result<JsValue, JsValue> {
        let entries = self.inner.borrow().region_entries(country_code);
        to_value(&entries).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.inner.borrow().is_ready()
    }
}
