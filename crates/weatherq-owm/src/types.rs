//! OpenWeatherMap response types.
//!
//! Only the fields the normalizer consumes are modelled; everything else in
//! the upstream payloads is ignored by serde.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// geo/1.0/direct
// ---------------------------------------------------------------------------

/// One candidate from the direct geocoding endpoint, which returns a JSON array.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeMatch {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: String,
}

// ---------------------------------------------------------------------------
// data/2.5/forecast
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastInterval>,
    pub city: ForecastCity,
}

/// One 3-hour step of the forecast series.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastInterval {
    /// Interval start, Unix seconds UTC.
    pub dt: i64,
    pub main: IntervalMain,
    pub wind: IntervalWind,
    /// Usually a single element; the first is the primary condition.
    #[serde(default)]
    pub weather: Vec<IntervalWeather>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntervalMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntervalWind {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntervalWeather {
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    #[serde(default)]
    pub country: String,
    /// Offset from UTC in seconds.
    #[serde(default)]
    pub timezone: i32,
}
