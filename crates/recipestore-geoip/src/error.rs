use thiserror::Error;

/// Errors returned while locating the caller by IP address.
#[derive(Debug, Error)]
pub enum GeoipError {
    /// Network or TLS failure, or a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint URL could not be parsed.
    #[error("invalid geolocation URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The response body was not the expected JSON shape.
    #[error("JSON deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The service answered without a usable `loc` field.
    #[error("no usable location in response: {0}")]
    NoLocation(String),
}
