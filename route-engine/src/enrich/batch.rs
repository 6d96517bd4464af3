//! Throttled image fetching.

use futures::future::join_all;
use tracing::debug;

use crate::domain::Country;

use super::ImageSource;

/// Image lookup result for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityImage {
    pub city: String,
    pub country: Country,
    /// `None` when the source has no image or the fetch failed.
    pub url: Option<String>,
}

/// Fetch images for `cities` in sequential waves of at most `window`
/// concurrent requests.
///
/// Each wave is awaited in full before the next starts. A failed fetch
/// yields `None` for that city and never aborts the wave. Results are in
/// input order. A `window` of zero is treated as one.
pub async fn fetch_city_images<S: ImageSource>(
    source: &S,
    cities: &[(String, Country)],
    window: usize,
) -> Vec<CityImage> {
    let mut images = Vec::with_capacity(cities.len());

    for wave in cities.chunks(window.max(1)) {
        let futures: Vec<_> = wave
            .iter()
            .map(|(city, country)| async move {
                let result = source.fetch_city_image(city, country).await;
                (city, country, result)
            })
            .collect();

        let results = join_all(futures).await;

        for (city, country, result) in results {
            let url = match result {
                Ok(url) => url,
                Err(e) => {
                    debug!(
                        city = %city,
                        error = %e,
                        "Failed to fetch city image, using placeholder"
                    );
                    None
                }
            };
            images.push(CityImage {
                city: city.clone(),
                country: country.clone(),
                url,
            });
        }
    }

    images
}
