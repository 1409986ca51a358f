// crates/regionpick-core/src/offline/manifest.rs
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How intercepted requests are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStrategy {
    /// Network first, cache when the network rejects.
    #[default]
    NetworkFirst,
    /// Cache first, network on a miss.
    CacheFirst,
}

/// Which buckets the cache fallback may read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackScope {
    /// Any bucket, including ones from previous versions not yet deleted.
    #[default]
    AnyBucket,
    /// Only the bucket named by the current manifest.
    CurrentBucket,
}

fn default_skip_waiting() -> bool {
    true
}

/// The fixed list of URLs pre-cached at install time, and the versioned
/// bucket they go into.
///
/// Changing `cache_name` (e.g. `app-cache-v88` -> `app-cache-v89`) is the
/// only way to invalidate what earlier versions cached.
///
/// ```rust
/// use regionpick_core::offline::{CacheManifest, FetchStrategy};
///
/// let manifest = CacheManifest::from_json_slice(br#"{
///     "cache_name": "app-cache-v88",
///     "assets": ["/", "/js/app.js"]
/// }"#).unwrap();
/// assert_eq!(manifest.strategy, FetchStrategy::NetworkFirst);
/// assert!(manifest.skip_waiting);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheManifest {
    pub cache_name: String,
    pub assets: Vec<String>,
    #[serde(default)]
    pub strategy: FetchStrategy,
    #[serde(default)]
    pub fallback_scope: FallbackScope,
    /// Take over from a running older worker right after install.
    #[serde(default = "default_skip_waiting")]
    pub skip_waiting: bool,
}

impl CacheManifest {
    pub fn new<I, S>(cache_name: impl Into<String>, assets: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let manifest = Self {
            cache_name: cache_name.into(),
            assets: assets.into_iter().map(Into::into).collect(),
            strategy: FetchStrategy::default(),
            fallback_scope: FallbackScope::default(),
            skip_waiting: true,
        };
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn with_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_fallback_scope(mut self, scope: FallbackScope) -> Self {
        self.fallback_scope = scope;
        self
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let manifest: Self = serde_json::from_slice(bytes)?;
        manifest.validate()?;
        Ok(manifest)
    }

    #[cfg(feature = "files")]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            Error::NotFound(format!("Manifest not found at {}: {}", path.display(), e))
        })?;
        Self::from_json_slice(&bytes)
    }

    /// Checks the name is set and the asset list is non-empty and free of
    /// duplicates.
    pub fn validate(&self) -> Result<()> {
        if self.cache_name.trim().is_empty() {
            return Err(Error::InvalidData("manifest cache_name is empty".into()));
        }
        if self.assets.is_empty() {
            return Err(Error::InvalidData("manifest lists no assets".into()));
        }

        let mut seen = HashSet::with_capacity(self.assets.len());
        for asset in &self.assets {
            if asset.trim().is_empty() {
                return Err(Error::InvalidData("manifest contains an empty URL".into()));
            }
            if !seen.insert(asset.as_str()) {
                return Err(Error::InvalidData(format!(
                    "manifest lists {asset} more than once"
                )));
            }
        }
        Ok(())
    }

    /// Bucket the fallback lookup is restricted to, if any.
    pub fn fallback_bucket(&self) -> Option<&str> {
        match self.fallback_scope {
            FallbackScope::AnyBucket => None,
            FallbackScope::CurrentBucket => Some(self.cache_name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_optional_fields() {
        let m = CacheManifest::from_json_slice(
            br#"{
                "cache_name": "v2",
                "assets": ["/a.js"],
                "strategy": "cache_first",
                "fallback_scope": "current_bucket",
                "skip_waiting": false
            }"#,
        )
        .unwrap();
        assert_eq!(m.strategy, FetchStrategy::CacheFirst);
        assert_eq!(m.fallback_bucket(), Some("v2"));
        assert!(!m.skip_waiting);
    }

    #[test]
    fn rejects_bad_manifests() {
        assert!(CacheManifest::new("", ["/a.js"]).is_err());
        assert!(CacheManifest::new("v1", Vec::<String>::new()).is_err());
        let err = CacheManifest::new("v1", ["/a.js", "/a.js"]).unwrap_err();
        assert!(err.to_string().contains("/a.js more than once"));
    }

    #[test]
    fn unknown_strategy_is_a_json_error() {
        let err = CacheManifest::from_json_slice(
            br#"{ "cache_name": "v1", "assets": ["/"], "strategy": "stale_while_revalidate" }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
