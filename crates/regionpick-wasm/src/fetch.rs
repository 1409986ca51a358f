// crates/regionpick-wasm/src/fetch.rs
use crate::errors::describe;
use js_sys::{Promise, Uint8Array};
use regionpick_core::loader::DatasetSource;
use regionpick_core::offline::Fetcher;
use regionpick_core::{CountryDataset, Error, Result};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, Response};

/// What to hand to `fetch()`: a bare URL, or an intercepted request that
/// must go out with its own headers, credentials and modes.
enum Target<'a> {
    Url(&'a str),
    Request(&'a Request),
}

/// `fetch()` of whichever global scope we run in (page or worker).
fn global_fetch(target: Target<'_>) -> std::result::Result<Promise, JsValue> {
    let global = js_sys::global();
    if let Some(window) = global.dyn_ref::<web_sys::Window>() {
        return Ok(match target {
            Target::Url(url) => window.fetch_with_str(url),
            Target::Request(request) => window.fetch_with_request(request),
        });
    }
    if let Some(worker) = global.dyn_ref::<web_sys::WorkerGlobalScope>() {
        return Ok(match target {
            Target::Url(url) => worker.fetch_with_str(url),
            Target::Request(request) => worker.fetch_with_request(request),
        });
    }
    Err(JsValue::from_str("fetch is not available in this global scope"))
}

async fn send(target: Target<'_>, url: &str) -> Result<Response> {
    let promise = global_fetch(target).map_err(|e| Error::fetch(url, describe(&e)))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| Error::fetch(url, describe(&e)))?;
    value
        .dyn_into::<Response>()
        .map_err(|e| Error::fetch(url, describe(&e)))
}

/// The browser network. Only promise rejections count as failures; an HTTP
/// error status is still a response.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserFetcher;

impl Fetcher for BrowserFetcher {
    type Request = Request;
    type Response = Response;

    fn url_of(&self, request: &Request) -> String {
        request.url()
    }

    async fn fetch(&self, request: &Request) -> Result<Response> {
        send(Target::Request(request), &request.url()).await
    }
}

/// The country dataset served by the host page.
#[derive(Debug, Clone)]
pub struct HttpDatasetSource {
    url: String,
}

impl HttpDatasetSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl DatasetSource for HttpDatasetSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn load(&self) -> Result<CountryDataset> {
        let response = send(Target::Url(&self.url), &self.url).await?;
        if !response.ok() {
            return Err(Error::fetch(
                &self.url,
                format!("HTTP {}", response.status()),
            ));
        }

        let buffer = response
            .array_buffer()
            .map_err(|e| Error::fetch(&self.url, describe(&e)))?;
        let buffer = JsFuture::from(buffer)
            .await
            .map_err(|e| Error::fetch(&self.url, describe(&e)))?;

        let bytes = Uint8Array::new(&buffer).to_vec();
        CountryDataset::from_json_slice(&bytes)
    }
}
