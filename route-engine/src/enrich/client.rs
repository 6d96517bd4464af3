//! HTTP image service client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;

use crate::domain::Country;

use super::ImageSource;
use super::error::EnrichError;

/// Default base URL for the image service.
const DEFAULT_BASE_URL: &str = "https://images.travel-data.invalid/v1";

/// Image lookup response.
#[derive(Debug, Deserialize)]
struct ImageResponse {
    url: Option<String>,
}

/// Configuration for the image client.
#[derive(Debug, Clone)]
pub struct ImageClientConfig {
    /// API key for x-apikey header authentication
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ImageClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the image service.
#[derive(Debug, Clone)]
pub struct HttpImageClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpImageClient {
    /// Create a new image client.
    pub fn new(config: ImageClientConfig) -> Result<Self, EnrichError> {
        let mut headers = HeaderMap::new();

        let api_key_header =
            HeaderValue::from_str(&config.api_key).map_err(|_| EnrichError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
        headers.insert(HeaderName::from_static("x-apikey"), api_key_header);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl ImageSource for HttpImageClient {
    async fn fetch_city_image(&self, city: &str, country: &Country) -> Result<Option<String>, EnrichError> {
        let url = format!("{}/images", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("city", city), ("country", country.as_str())])
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(EnrichError::Unauthorized);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let response: ImageResponse =
            serde_json::from_str(&body).map_err(|e| EnrichError::Json {
                message: e.to_string(),
            })?;

        Ok(response.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ImageClientConfig::new("test-api-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_overrides() {
        let config = ImageClientConfig::new("test-api-key")
            .with_base_url("http://localhost:8080/")
            .with_timeout_secs(2);
        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.timeout_secs, 2);

        let client = HttpImageClient::new(config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn rejects_unprintable_api_key() {
        let config = ImageClientConfig::new("bad\nkey");
        assert!(matches!(
            HttpImageClient::new(config),
            Err(EnrichError::Api { status: 0, .. })
        ));
    }

    #[test]
    fn response_without_url() {
        let parsed: ImageResponse = serde_json::from_str(r#"{"url": null}"#).unwrap();
        assert!(parsed.url.is_none());
    }
}
