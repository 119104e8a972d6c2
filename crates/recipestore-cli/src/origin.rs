//! Starting point for location-based commands: explicit coordinates or an
//! IP lookup.

use anyhow::{bail, Context};
use clap::Args;
use recipestore_core::{AppConfig, Coordinates};
use recipestore_geoip::GeoipClient;

use crate::shops::checked_location;

const GEOIP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Args)]
pub(crate) struct OriginArgs {
    /// Latitude of the starting point
    #[arg(long, allow_hyphen_values = true, required_unless_present = "here", requires = "lon")]
    pub lat: Option<f64>,
    /// Longitude of the starting point
    #[arg(long, allow_hyphen_values = true, required_unless_present = "here", requires = "lat")]
    pub lon: Option<f64>,
    /// Start from the approximate location of this machine's public IP
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub here: bool,
}

/// Work out the starting coordinates, querying the configured geolocation
/// endpoint when `--here` was given.
///
/// # Errors
///
/// Returns an error if the coordinates are out of range or the lookup fails.
pub(crate) async fn resolve_origin(
    args: &OriginArgs,
    config: &AppConfig,
) -> anyhow::Result<Coordinates> {
    if !args.here {
        let (Some(lat), Some(lon)) = (args.lat, args.lon) else {
            bail!("both --lat and --lon are required unless --here is given");
        };
        return checked_location(lat, lon);
    }

    let client = GeoipClient::with_url(&config.geoip_url, GEOIP_TIMEOUT_SECS)?;
    let origin = client
        .locate()
        .await
        .with_context(|| format!("could not locate this machine via {}", config.geoip_url))?;
    println!("Using approximate location {origin} from IP lookup.");
    tracing::info!(%origin, "origin resolved from IP");
    Ok(origin)
}
