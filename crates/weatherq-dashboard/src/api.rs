//! Weather lookups against the weatherq server's `/weather` endpoint.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};
use weatherq_core::{Coordinates, WeatherSummary};

use crate::error::DashboardError;

/// Port through which the dashboard resolves a city or coordinate pair.
pub trait WeatherApi {
    fn by_city(&self, city: &str) -> impl Future<Output = Result<WeatherSummary, DashboardError>>;

    fn by_coordinates(
        &self,
        coords: Coordinates,
    ) -> impl Future<Output = Result<WeatherSummary, DashboardError>>;
}

/// [`WeatherApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpWeatherApi {
    client: Client,
    weather_url: Url,
}

impl HttpWeatherApi {
    /// Creates a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidServerUrl`] if `base_url` does not
    /// parse, or [`DashboardError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, DashboardError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let weather_url = Url::parse(&normalised)
            .and_then(|base| base.join("weather"))
            .map_err(|e| DashboardError::InvalidServerUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            weather_url,
        })
    }

    /// Issues the GET and maps the body. Error statuses are not raised on
    /// their own: the server always explains them in an `{"error": ...}`
    /// body, which becomes [`DashboardError::Lookup`].
    async fn fetch(&self, query: &[(&str, &str)]) -> Result<WeatherSummary, DashboardError> {
        let mut url = self.weather_url.clone();
        url.query_pairs_mut().extend_pairs(query);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| DashboardError::Decode {
                context: format!("weather response ({status})"),
                source: e,
            })?;

        if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
            tracing::debug!(%status, error = message, "weather lookup rejected");
            return Err(DashboardError::Lookup(message.to_string()));
        }

        serde_json::from_value(value).map_err(|e| DashboardError::Decode {
            context: "weather summary".to_string(),
            source: e,
        })
    }
}

impl WeatherApi for HttpWeatherApi {
    async fn by_city(&self, city: &str) -> Result<WeatherSummary, DashboardError> {
        self.fetch(&[("city", city)]).await
    }

    async fn by_coordinates(&self, coords: Coordinates) -> Result<WeatherSummary, DashboardError> {
        let lat = coords.lat.to_string();
        let lon = coords.lon.to_string();
        self.fetch(&[("lat", &lat), ("lon", &lon)]).await
    }
}
