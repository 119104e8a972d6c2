pub mod client;
pub mod error;

pub use client::{GeoipClient, DEFAULT_GEOIP_URL};
pub use error::GeoipError;
