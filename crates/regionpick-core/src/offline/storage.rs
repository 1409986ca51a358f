// crates/regionpick-core/src/offline/storage.rs
use crate::error::Result;

/// The network as seen by the worker. Any failure (offline, DNS, refused)
/// is an `Err`; there are no timeouts.
///
/// `Request` is whatever the host intercepts: a bare URL in memory, the full
/// request object (headers, credentials, modes) in the browser. It is sent
/// on as is.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    type Request: ?Sized;
    type Response;

    /// URL of `request`, for log lines.
    fn url_of(&self, request: &Self::Request) -> String;

    async fn fetch(&self, request: &Self::Request) -> Result<Self::Response>;
}

/// Named buckets of request → response pairs.
#[allow(async_fn_in_trait)]
pub trait CacheStorage {
    type Request: ?Sized;
    type Response;

    /// Existing bucket names, oldest first.
    async fn bucket_names(&self) -> Result<Vec<String>>;

    /// Opens (creating if absent) `bucket` and stores a response for every
    /// URL. All-or-nothing: if any URL cannot be fetched, none of them is
    /// stored and the error is returned.
    async fn add_all(&self, bucket: &str, urls: &[String]) -> Result<()>;

    /// Returns `true` if the bucket existed.
    async fn delete_bucket(&self, bucket: &str) -> Result<bool>;

    /// Finds a stored response matching `request`, in `bucket` only or, with
    /// `None`, in every bucket oldest first.
    async fn lookup(
        &self,
        request: &Self::Request,
        bucket: Option<&str>,
    ) -> Result<Option<Self::Response>>;
}
