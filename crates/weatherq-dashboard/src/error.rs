use thiserror::Error;

/// Errors surfaced by the dashboard. None of them is fatal; the controller
/// turns each into a user-visible notice and leaves its state untouched.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The weather server answered with an `{"error": ...}` body.
    #[error("{0}")]
    Lookup(String),

    /// Network failure talking to the weather server.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The key-value store could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("could not decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid server URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
}
