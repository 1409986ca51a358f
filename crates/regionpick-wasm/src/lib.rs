//! regionpick-wasm — WebAssembly bindings for regionpick-core
//!
//! This crate exposes the two browser-side pieces of `regionpick-core` to
//! JavaScript:
//!
//! - `LocationPicker`: the country/region dropdown pair bound to the
//!   `#country` and `#region` elements of the page
//! - `registerOfflineWorker()`: the install / activate / fetch handlers of
//!   the service worker, pre-caching the asset list compiled in from
//!   `config/cache-manifest.json`
//!
//! Quick start (page)
//! ------------------
//! ```javascript
//! import init, { LocationPicker, inferDefaultCountry } from 'regionpick-wasm';
//!
//! async function main() {
//!   await init();
//!   console.log(inferDefaultCountry('de-AT')); // "DE"
//!
//!   const picker = new LocationPicker((key) => i18n.t(key), () => i18n.currentLanguage);
//!   await picker.initialize();
//! }
//! main();
//! ```
//!
//! Quick start (service worker)
//! ----------------------------
//! ```javascript
//! importScripts('/pkg/regionpick_wasm.js');
//! wasm_bindgen('/pkg/regionpick_wasm_bg.wasm')
//!   .then(() => wasm_bindgen.registerOfflineWorker());
//! ```
//!
//! Notes
//! -----
//! - Log output goes to the browser console through the `log` facade.
//! - Bump `cache_name` in the manifest whenever the asset list changes;
//!   activation deletes every other bucket.
mod cache;
mod dom;
mod errors;
mod fetch;
mod logging;
mod picker;
mod worker;

use wasm_bindgen::prelude::*;

pub use cache::BrowserCacheStorage;
pub use dom::DomSelect;
pub use fetch::{BrowserFetcher, HttpDatasetSource};
pub use logging::init_logging;
pub use picker::{JsLocalizer, LanguageSource, LocationPicker};
pub use worker::{cache_name, embedded_manifest, register_offline_worker};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    init_logging(log::LevelFilter::Info);
    log::debug!("regionpick-wasm initialized");
}

/* --------------------------------------------------------------------------
   Free helpers
-------------------------------------------------------------------------- */

/// Default country for a locale tag (`"cs-CZ"` → `"CZ"`, unknown → `"SK"`).
#[wasm_bindgen(js_name = inferDefaultCountry)]
pub fn infer_default_country(language_tag: &str) -> String {
    regionpick_core::language::infer_default_country(language_tag).to_string()
}

/// Raises or lowers console verbosity (`"error"` … `"trace"`).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter: log::LevelFilter = level
        .parse()
        .map_err(|_| JsValue::from_str(&format!("unknown log level: {level}")))?;
    init_logging(filter);
    Ok(())
}
