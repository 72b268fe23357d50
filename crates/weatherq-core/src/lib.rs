//! Shared domain types for weatherq: the weather summary wire shape, icon
//! classification, temperature formatting and application configuration.

pub mod app_config;
pub mod config;
pub mod icon;
pub mod temperature;
pub mod weather;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::load_app_config;
pub use icon::{classify, IconKey};
pub use temperature::{format_temp, TemperatureUnit};
pub use weather::{Coordinates, CurrentConditions, DayForecast, WeatherSummary, MAX_FORECAST_DAYS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
