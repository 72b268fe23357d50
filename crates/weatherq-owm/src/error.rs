use thiserror::Error;

/// Errors returned by the OpenWeatherMap client.
#[derive(Debug, Error)]
pub enum OwmError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The geocoding endpoint returned no match for the query.
    #[error("no geocoding match for \"{query}\"")]
    NotFound { query: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload parsed but cannot be turned into a weather summary.
    #[error("malformed forecast payload: {0}")]
    Malformed(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl OwmError {
    /// Whether this error means the location does not exist upstream, as
    /// opposed to the upstream service failing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
