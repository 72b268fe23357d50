use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "3000";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation live here, decoupled from the process environment so
/// tests can drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // WEATHERQ_BIND_ADDR wins; a bare PORT (as most hosts inject) binds all interfaces.
    let (bind_var, raw_bind) = match lookup("WEATHERQ_BIND_ADDR") {
        Ok(addr) => ("WEATHERQ_BIND_ADDR", addr),
        Err(_) => (
            "PORT",
            format!("{DEFAULT_BIND_HOST}:{}", or_default("PORT", DEFAULT_PORT)),
        ),
    };
    let bind_addr = raw_bind
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: bind_var.to_string(),
            reason: e.to_string(),
        })?;

    let weather_api_key = require("WEATHER_API_KEY")?;
    let log_level = or_default("WEATHERQ_LOG_LEVEL", "info");
    let owm_base_url = or_default("WEATHERQ_OWM_BASE_URL", "https://api.openweathermap.org");
    let request_timeout_secs = parse_u64("WEATHERQ_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("WEATHERQ_USER_AGENT", "weatherq/0.1 (weather-dashboard)");

    Ok(AppConfig {
        bind_addr,
        log_level,
        weather_api_key,
        owm_base_url,
        request_timeout_secs,
        user_agent,
    })
}
