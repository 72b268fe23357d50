use serde::{Deserialize, Serialize};

/// Upper bound on distinct-day entries in [`WeatherSummary::forecast`].
pub const MAX_FORECAST_DAYS: usize = 5;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One city's current conditions plus a short distinct-day forecast.
///
/// This is the JSON body of a successful `GET /weather` and the record held by
/// the dashboard's city store, so the field names follow the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub city: String,
    /// ISO 3166 country code, e.g. `"BD"`.
    pub country: String,
    pub current: CurrentConditions,
    /// At most [`MAX_FORECAST_DAYS`] entries, chronological, distinct `date` labels.
    pub forecast: Vec<DayForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Degrees Celsius.
    pub temp: f64,
    /// Degrees Celsius.
    pub feels_like: f64,
    /// Relative humidity, 0-100.
    pub humidity: u8,
    /// Metres per second.
    pub wind_speed: f64,
    pub description: String,
    /// Upstream icon code such as `"01n"`. Informational only.
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "isNight")]
    pub is_night: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    /// Short weekday label (`"Mon"`, `"Tue"`, ...).
    pub date: String,
    /// Degrees Celsius, sampled from the first interval seen for the day.
    pub temp: f64,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "isNight")]
    pub is_night: bool,
}
