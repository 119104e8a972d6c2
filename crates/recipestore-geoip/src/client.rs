//! Approximate caller location from an ipinfo-style lookup.
//!
//! The endpoint answers `GET` with a JSON object whose `loc` field holds
//! `"latitude,longitude"`. The result is city-level at best.

use std::time::Duration;

use recipestore_core::Coordinates;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::GeoipError;

pub const DEFAULT_GEOIP_URL: &str = "https://ipinfo.io/json";

#[derive(Debug, Deserialize)]
struct LookupResponse {
    loc: Option<String>,
}

/// Client for a single IP geolocation endpoint.
pub struct GeoipClient {
    client: Client,
    url: Url,
}

impl GeoipClient {
    /// Creates a client for [`DEFAULT_GEOIP_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`GeoipError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, GeoipError> {
        Self::with_url(DEFAULT_GEOIP_URL, timeout_secs)
    }

    /// Creates a client for an explicit endpoint (configured or mocked).
    ///
    /// # Errors
    ///
    /// Returns [`GeoipError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`GeoipError::InvalidUrl`] if `url` does not parse.
    pub fn with_url(url: &str, timeout_secs: u64) -> Result<Self, GeoipError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("recipestore/0.1")
            .build()?;
        let parsed = Url::parse(url).map_err(|e| GeoipError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            url: parsed,
        })
    }

    /// Look up the caller's approximate coordinates.
    ///
    /// # Errors
    ///
    /// - [`GeoipError::Http`] on network failure or non-2xx status.
    /// - [`GeoipError::Deserialize`] if the body is not a JSON object.
    /// - [`GeoipError::NoLocation`] if `loc` is missing or out of range.
    pub async fn locate(&self) -> Result<Coordinates, GeoipError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        let lookup: LookupResponse = serde_json::from_str(&body)?;
        let loc = lookup
            .loc
            .ok_or_else(|| GeoipError::NoLocation("missing 'loc' field".to_string()))?;
        let coordinates = parse_loc(&loc)?;
        tracing::debug!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "located caller by IP"
        );
        Ok(coordinates)
    }
}

/// Parse a `"latitude,longitude"` pair.
fn parse_loc(raw: &str) -> Result<Coordinates, GeoipError> {
    let bad = || GeoipError::NoLocation(format!("'{raw}' is not a latitude,longitude pair"));
    let (lat, lon) = raw.split_once(',').ok_or_else(bad)?;
    let latitude = lat.trim().parse::<f64>().map_err(|_| bad())?;
    let longitude = lon.trim().parse::<f64>().map_err(|_| bad())?;
    let coordinates = Coordinates::new(latitude, longitude);
    if !coordinates.is_valid() {
        return Err(bad());
    }
    Ok(coordinates)
}
