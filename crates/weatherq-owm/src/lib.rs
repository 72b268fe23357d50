//! OpenWeatherMap client: city geocoding, 5-day/3-hour forecasts, and the
//! normalization of a forecast series into a [`weatherq_core::WeatherSummary`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::OwmClient;
pub use error::OwmError;
pub use normalize::{is_night_hour, summarize_forecast};
pub use types::{ForecastCity, ForecastInterval, ForecastResponse, GeocodeMatch};
