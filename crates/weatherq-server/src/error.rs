use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use weatherq_owm::OwmError;

/// Failures of a `/weather` lookup.
///
/// Every variant reaches the client as a bare `{"error": "..."}` body; the
/// upstream detail is only logged.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City not found")]
    NotFound,

    #[error("Failed to fetch weather")]
    Upstream(#[source] OwmError),

    #[error("Location required")]
    Input,
}

impl WeatherError {
    /// Classifies an upstream client error, logging anything that is not a
    /// plain geocoding miss.
    pub fn from_upstream(request_id: &str, error: OwmError) -> Self {
        if error.is_not_found() {
            tracing::info!(request_id, error = %error, "city lookup found no match");
            Self::NotFound
        } else {
            tracing::error!(request_id, error = %error, "upstream weather lookup failed");
            Self::Upstream(error)
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Input => StatusCode::BAD_REQUEST,
        }
    }
}

/// JSON error body shared by handlers and middleware.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
