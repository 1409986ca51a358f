// crates/regionpick-wasm/src/worker.rs

//! Service-worker glue: wires `install`, `activate` and `fetch` events of
//! the global scope to an [`OfflineWorker`] built from the embedded
//! manifest.

use crate::cache::BrowserCacheStorage;
use crate::errors::{describe, to_js};
use crate::fetch::BrowserFetcher;
use once_cell::sync::OnceCell;
use regionpick_core::offline::{CacheManifest, OfflineWorker};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{ExtendableEvent, FetchEvent, ServiceWorkerGlobalScope};

/// Bump `cache_name` in this file whenever the asset list changes.
static MANIFEST_JSON: &str = include_str!("../config/cache-manifest.json");

static MANIFEST: OnceCell<CacheManifest> = OnceCell::new();

type BrowserWorker = OfflineWorker<BrowserCacheStorage, BrowserFetcher>;

/// The manifest compiled into this build.
pub fn embedded_manifest() -> regionpick_core::Result<&'static CacheManifest> {
    MANIFEST.get_or_try_init(|| CacheManifest::from_json_slice(MANIFEST_JSON.as_bytes()))
}

/// Name of the cache bucket this build installs into.
#[wasm_bindgen(js_name = cacheName)]
pub fn cache_name() -> Result<String, JsValue> {
    embedded_manifest()
        .map(|m| m.cache_name.clone())
        .map_err(to_js)
}

/// Registers the lifecycle handlers. Call once from the service-worker
/// script after the module is initialized:
///
/// ```javascript
/// importScripts('/pkg/regionpick_wasm.js');
/// wasm_bindgen('/pkg/regionpick_wasm_bg.wasm').then(() => wasm_bindgen.registerOfflineWorker());
/// ```
#[wasm_bindgen(js_name = registerOfflineWorker)]
pub fn register_offline_worker() -> Result<(), JsValue> {
    let scope: ServiceWorkerGlobalScope = js_sys::global()
        .dyn_into()
        .map_err(|_| JsValue::from_str("registerOfflineWorker must run in a service worker"))?;

    let manifest = embedded_manifest().map_err(to_js)?.clone();
    let storage = BrowserCacheStorage::new(scope.caches()?);
    let worker = Rc::new(OfflineWorker::new(manifest, storage, BrowserFetcher));

    bind_install(&scope, Rc::clone(&worker))?;
    bind_activate(&scope, Rc::clone(&worker))?;
    bind_fetch(&scope, worker)?;

    log::info!(
        "Offline worker registered for {}",
        embedded_manifest().map_err(to_js)?.cache_name
    );
    Ok(())
}

fn bind_install(scope: &ServiceWorkerGlobalScope, worker: Rc<BrowserWorker>) -> Result<(), JsValue> {
    let sw = scope.clone();
    let handler = Closure::<dyn FnMut(ExtendableEvent)>::new(move |event: ExtendableEvent| {
        let worker = Rc::clone(&worker);
        let sw = sw.clone();
        let work = future_to_promise(async move {
            let outcome = worker.install().await.map_err(to_js)?;
            log::info!("Cached {} assets", outcome.cached);
            if outcome.skip_waiting {
                JsFuture::from(sw.skip_waiting()?).await?;
            }
            Ok(JsValue::UNDEFINED)
        });
        // A rejected promise here keeps the new version from activating
        if let Err(e) = event.wait_until(&work) {
            log::error!("install: waitUntil failed: {}", describe(&e));
        }
    });
    scope.add_event_listener_with_callback("install", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn bind_activate(scope: &ServiceWorkerGlobalScope, worker: Rc<BrowserWorker>) -> Result<(), JsValue> {
    let sw = scope.clone();
    let handler = Closure::<dyn FnMut(ExtendableEvent)>::new(move |event: ExtendableEvent| {
        let worker = Rc::clone(&worker);
        let sw = sw.clone();
        let work = future_to_promise(async move {
            let deleted = worker.activate().await.map_err(to_js)?;
            if !deleted.is_empty() {
                log::info!("Removed {} stale cache(s): {}", deleted.len(), deleted.join(", "));
            }
            JsFuture::from(sw.clients().claim()).await?;
            Ok(JsValue::UNDEFINED)
        });
        if let Err(e) = event.wait_until(&work) {
            log::error!("activate: waitUntil failed: {}", describe(&e));
        }
    });
    scope.add_event_listener_with_callback("activate", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn bind_fetch(scope: &ServiceWorkerGlobalScope, worker: Rc<BrowserWorker>) -> Result<(), JsValue> {
    let handler = Closure::<dyn FnMut(FetchEvent)>::new(move |event: FetchEvent| {
        let request = event.request();
        // The Cache API only stores GET; everything else goes straight out
        if request.method() != "GET" {
            return;
        }

        let worker = Rc::clone(&worker);
        let answer = future_to_promise(async move {
            let served = worker.handle_fetch(&request).await.map_err(to_js)?;
            Ok(served.into_response().into())
        });
        if let Err(e) = event.respond_with(&answer) {
            log::error!("fetch: respondWith failed: {}", describe(&e));
        }
    });
    scope.add_event_listener_with_callback("fetch", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
