use thiserror::Error;

/// Errors returned by the weather provider client.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("weather provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed but lacked a field the report needs.
    #[error("weather response missing {0}")]
    MissingField(&'static str),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
