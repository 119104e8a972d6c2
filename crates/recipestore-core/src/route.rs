//! Directions links for a resolved shopping trip.
//!
//! Only the URL is built here; opening it and ordering the stops is left to
//! the maps provider (`optimize:true`).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::distance::Coordinates;
use crate::model::CandidateShop;

pub const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/?api=1";

/// Form-encoding set: everything but ASCII alphanumerics and `-._~`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Build a driving-directions URL from `origin` through every shop as a waypoint.
///
/// Waypoints keep the order of `shops`. With no shops the bare base URL is
/// returned.
#[must_use]
pub fn build_route_url(origin: Coordinates, shops: &[CandidateShop]) -> String {
    if shops.is_empty() {
        return DIRECTIONS_BASE_URL.to_string();
    }

    let waypoints = shops
        .iter()
        .map(|shop| shop.shop.location.to_string())
        .collect::<Vec<_>>()
        .join("|");

    let params = [
        ("origin", origin.to_string()),
        ("travelmode", "driving".to_string()),
        ("waypoints", format!("optimize:true|{waypoints}")),
    ];

    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, QUERY_VALUE)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{DIRECTIONS_BASE_URL}&{query}")
}
