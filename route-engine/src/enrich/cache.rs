//! Caching layer for image lookups.
//!
//! Lookups are keyed by lowercased city and country. Misses (`None`) are
//! cached too; errors are not, so a failed city is retried next time.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::Country;

use super::{EnrichError, ImageSource};

/// Cache key: (city, country), both lowercased.
type ImageKey = (String, String);

/// Configuration for the image cache.
#[derive(Debug, Clone)]
pub struct ImageCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 500,
        }
    }
}

/// Image source with caching.
///
/// Wraps any [`ImageSource`] and caches its answers.
pub struct CachedImageSource<S> {
    inner: S,
    images: MokaCache<ImageKey, Option<String>>,
}

impl<S: ImageSource> CachedImageSource<S> {
    /// Create a new cached source.
    pub fn new(inner: S, config: &ImageCacheConfig) -> Self {
        let images = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, images }
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.images.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.images.invalidate_all();
    }
}

impl<S: ImageSource> ImageSource for CachedImageSource<S> {
    async fn fetch_city_image(&self, city: &str, country: &Country) -> Result<Option<String>, EnrichError> {
        let key = (city.to_lowercase(), country.as_str().to_lowercase());

        if let Some(cached) = self.images.get(&key).await {
            trace!(city, "Image cache hit");
            return Ok(cached);
        }

        let url = self.inner.fetch_city_image(city, country).await?;
        self.images.insert(key, url.clone()).await;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Answers every city, failing for "Atlantis".
    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl ImageSource for CountingSource {
        async fn fetch_city_image(&self, city: &str, _country: &Country) -> Result<Option<String>, EnrichError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match city {
                "Atlantis" => Err(EnrichError::Api {
                    status: 503,
                    message: "unavailable".to_string(),
                }),
                "Nowhere" => Ok(None),
                _ => Ok(Some(format!("https://img.test/{city}.jpg"))),
            }
        }
    }

    #[tokio::test]
    async fn repeated_lookups_hit_cache() {
        let source = CachedImageSource::new(CountingSource::default(), &ImageCacheConfig::default());
        let thailand = Country::new("Thailand");

        let first = source.fetch_city_image("Bangkok", &thailand).await.unwrap();
        let second = source.fetch_city_image("bangkok", &thailand).await.unwrap();

        assert_eq!(first.as_deref(), Some("https://img.test/Bangkok.jpg"));
        assert_eq!(first, second);
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn misses_are_cached() {
        let source = CachedImageSource::new(CountingSource::default(), &ImageCacheConfig::default());
        let x = Country::new("X");

        assert!(source.fetch_city_image("Nowhere", &x).await.unwrap().is_none());
        assert!(source.fetch_city_image("Nowhere", &x).await.unwrap().is_none());
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let source = CachedImageSource::new(CountingSource::default(), &ImageCacheConfig::default());
        let x = Country::unknown();

        assert!(source.fetch_city_image("Atlantis", &x).await.is_err());
        assert!(source.fetch_city_image("Atlantis", &x).await.is_err());
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let source = CachedImageSource::new(CountingSource::default(), &ImageCacheConfig::default());
        let japan = Country::new("Japan");

        source.fetch_city_image("Kyoto", &japan).await.unwrap();
        source.invalidate_all();
        source.fetch_city_image("Kyoto", &japan).await.unwrap();
        assert_eq!(source.inner.calls.load(Ordering::SeqCst), 2);
    }
}
