//! Supplementary city data for display.
//!
//! Nothing here affects routing. Fetches are best effort: a failure for
//! one city degrades to a missing image for that city only.

mod batch;
mod cache;
mod client;
mod error;

pub use batch::{CityImage, fetch_city_images};
pub use cache::{CachedImageSource, ImageCacheConfig};
pub use client::{HttpImageClient, ImageClientConfig};
pub use error::EnrichError;

use crate::domain::Country;

/// Source of city images.
///
/// This abstraction allows enrichment to be tested without a network.
#[allow(async_fn_in_trait)]
pub trait ImageSource {
    /// URL of an image for the city, or `None` if the source has none.
    async fn fetch_city_image(&self, city: &str, country: &Country) -> Result<Option<String>, EnrichError>;
}
