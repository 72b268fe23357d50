//! HTTP client for the OpenWeatherMap geocoding and forecast APIs.
//!
//! Wraps `reqwest` with API key management, typed response deserialization
//! and the city → coordinates → forecast → summary translation the
//! `/weather` endpoint needs.

use std::time::Duration;

use reqwest::{Client, Url};
use weatherq_core::{Coordinates, WeatherSummary};

use crate::error::OwmError;
use crate::normalize::summarize_forecast;
use crate::types::{ForecastResponse, GeocodeMatch};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/";
const GEOCODE_PATH: &str = "geo/1.0/direct";
const FORECAST_PATH: &str = "data/2.5/forecast";

/// Client for the OpenWeatherMap REST API.
///
/// Use [`OwmClient::new`] for production or [`OwmClient::with_base_url`] to
/// point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct OwmClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl OwmClient {
    /// Creates a client pointed at the production OpenWeatherMap API.
    ///
    /// # Errors
    ///
    /// Returns [`OwmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, OwmError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`OwmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`OwmError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, OwmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so relative endpoint paths join under the
        // base instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| OwmError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Resolves a free-text city name to its best geocoding match.
    ///
    /// Only the first candidate is requested and returned; there is no
    /// disambiguation.
    ///
    /// # Errors
    ///
    /// - [`OwmError::NotFound`] if the endpoint returns no candidates.
    /// - [`OwmError::Http`] on network failure or non-2xx HTTP status.
    /// - [`OwmError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn geocode(&self, city: &str) -> Result<GeocodeMatch, OwmError> {
        let url = self.build_url(GEOCODE_PATH, &[("q", city), ("limit", "1")])?;
        let body = self.request_json(&url).await?;

        let matches: Vec<GeocodeMatch> =
            serde_json::from_value(body).map_err(|e| OwmError::Deserialize {
                context: format!("geocode(q={city})"),
                source: e,
            })?;

        let first = matches.into_iter().next().ok_or_else(|| OwmError::NotFound {
            query: city.to_string(),
        })?;

        tracing::debug!(
            query = city,
            name = %first.name,
            country = %first.country,
            lat = first.lat,
            lon = first.lon,
            "geocoded city"
        );
        Ok(first)
    }

    /// Fetches the raw 3-hour-step forecast series for a coordinate pair, in
    /// metric units.
    ///
    /// # Errors
    ///
    /// - [`OwmError::Http`] on network failure or non-2xx HTTP status.
    /// - [`OwmError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn forecast(&self, coords: Coordinates) -> Result<ForecastResponse, OwmError> {
        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();
        let url = self.build_url(
            FORECAST_PATH,
            &[("lat", &lat), ("lon", &lon), ("units", "metric")],
        )?;
        let body = self.request_json(&url).await?;

        serde_json::from_value(body).map_err(|e| OwmError::Deserialize {
            context: format!("forecast(lat={lat}, lon={lon})"),
            source: e,
        })
    }

    /// Fetches and normalizes the weather for a coordinate pair.
    ///
    /// # Errors
    ///
    /// Any error from [`OwmClient::forecast`] or
    /// [`summarize_forecast`](crate::normalize::summarize_forecast).
    pub async fn summary_for_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherSummary, OwmError> {
        let response = self.forecast(coords).await?;
        summarize_forecast(&response)
    }

    /// Geocodes `city`, then fetches and normalizes its weather.
    ///
    /// The summary is named after the geocoding match rather than the
    /// forecast's nearest station, so the returned `city` geocodes back to
    /// the same place.
    ///
    /// # Errors
    ///
    /// [`OwmError::NotFound`] when the city has no match, otherwise any error
    /// from [`OwmClient::summary_for_coordinates`].
    pub async fn summary_for_city(&self, city: &str) -> Result<WeatherSummary, OwmError> {
        let found = self.geocode(city).await?;
        let mut summary = self
            .summary_for_coordinates(Coordinates {
                lat: found.lat,
                lon: found.lon,
            })
            .await?;

        if summary.city != found.name {
            tracing::debug!(station = %summary.city, city = %found.name, "renaming to geocoded city");
        }
        summary.city = found.name;
        if !found.country.is_empty() {
            summary.country = found.country;
        }
        Ok(summary)
    }

    /// Builds the full request URL with percent-encoded query parameters and
    /// the API key appended last.
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, OwmError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| OwmError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("appid", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body as
    /// JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, OwmError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| OwmError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}
