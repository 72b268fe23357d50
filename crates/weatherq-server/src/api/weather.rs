use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use weatherq_core::{Coordinates, WeatherSummary};

use crate::error::WeatherError;
use crate::middleware::RequestId;

use super::AppState;

/// Raw `/weather` query string. Values are kept as strings so that a bad
/// coordinate surfaces as our own JSON error rather than an extractor
/// rejection.
#[derive(Debug, Default, Deserialize)]
pub(super) struct WeatherQuery {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// What a `/weather` request asks for once the query is validated.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum LookupTarget {
    City(String),
    Coordinates(Coordinates),
}

/// Coordinates win when both are present; otherwise a non-blank city is used.
pub(super) fn resolve_target(query: &WeatherQuery) -> Result<LookupTarget, WeatherError> {
    let lat = parse_coordinate(query.lat.as_deref());
    let lon = parse_coordinate(query.lon.as_deref());

    if let (Some(lat), Some(lon)) = (lat, lon) {
        return Ok(LookupTarget::Coordinates(Coordinates { lat, lon }));
    }

    query
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| LookupTarget::City(c.to_string()))
        .ok_or(WeatherError::Input)
}

fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

pub(super) async fn get_weather(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherSummary>, WeatherError> {
    let target = resolve_target(&query)?;

    let result = match &target {
        LookupTarget::City(city) => state.owm.summary_for_city(city).await,
        LookupTarget::Coordinates(coords) => state.owm.summary_for_coordinates(*coords).await,
    };

    let summary = result.map_err(|e| WeatherError::from_upstream(&req_id.0, e))?;
    tracing::info!(
        request_id = %req_id.0,
        city = %summary.city,
        days = summary.forecast.len(),
        "weather lookup served"
    );
    Ok(Json(summary))
}
