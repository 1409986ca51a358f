// crates/regionpick-wasm/src/cache.rs
use crate::errors::cache_error;
use js_sys::Array;
use regionpick_core::offline::CacheStorage;
use regionpick_core::Result;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Cache, Request, Response};

/// The browser's `CacheStorage` (`self.caches`).
#[derive(Debug, Clone)]
pub struct BrowserCacheStorage {
    caches: web_sys::CacheStorage,
}

impl BrowserCacheStorage {
    pub fn new(caches: web_sys::CacheStorage) -> Self {
        Self { caches }
    }

    async fn open(&self, bucket: &str) -> Result<Cache> {
        JsFuture::from(self.caches.open(bucket))
            .await
            .map_err(|e| cache_error("caches.open", e))?
            .dyn_into::<Cache>()
            .map_err(|e| cache_error("caches.open", e))
    }

    async fn has(&self, bucket: &str) -> Result<bool> {
        let found = JsFuture::from(self.caches.has(bucket))
            .await
            .map_err(|e| cache_error("caches.has", e))?;
        Ok(found.as_bool().unwrap_or(false))
    }
}

fn as_response(value: JsValue) -> Result<Option<Response>> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    value
        .dyn_into::<Response>()
        .map(Some)
        .map_err(|e| cache_error("cache.match", e))
}

impl CacheStorage for BrowserCacheStorage {
    type Request = Request;
    type Response = Response;

    async fn bucket_names(&self) -> Result<Vec<String>> {
        let keys = JsFuture::from(self.caches.keys())
            .await
            .map_err(|e| cache_error("caches.keys", e))?;
        Ok(Array::from(&keys)
            .iter()
            .filter_map(|k| k.as_string())
            .collect())
    }

    async fn add_all(&self, bucket: &str, urls: &[String]) -> Result<()> {
        let cache = self.open(bucket).await?;
        let requests: Array = urls.iter().map(|u| JsValue::from_str(u)).collect();

        // Cache.addAll is atomic: one failed request stores nothing
        JsFuture::from(cache.add_all_with_str_sequence(&requests))
            .await
            .map_err(|e| cache_error("cache.addAll", e))?;
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<bool> {
        let deleted = JsFuture::from(self.caches.delete(bucket))
            .await
            .map_err(|e| cache_error("caches.delete", e))?;
        Ok(deleted.as_bool().unwrap_or(false))
    }

    async fn lookup(&self, request: &Request, bucket: Option<&str>) -> Result<Option<Response>> {
        let found = match bucket {
            None => JsFuture::from(self.caches.match_with_request(request)).await,
            Some(name) => {
                // open() would create the bucket as a side effect
                if !self.has(name).await? {
                    return Ok(None);
                }
                let cache = self.open(name).await?;
                JsFuture::from(cache.match_with_request(request)).await
            }
        };
        as_response(found.map_err(|e| cache_error("cache.match", e))?)
    }
}
