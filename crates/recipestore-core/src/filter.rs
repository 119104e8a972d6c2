use crate::distance::{distance_km, Coordinates};
use crate::model::{CandidateShop, Shop};

/// Keep the shops whose geodesic distance from `origin` is at most `radius_km`.
///
/// Input order is preserved. A non-positive radius keeps only shops at
/// distance exactly zero (none at all when negative). An empty result is not
/// an error here; the resolver reports it as `NoShops`.
#[must_use]
pub fn shops_within_radius(shops: &[Shop], origin: Coordinates, radius_km: f64) -> Vec<CandidateShop> {
    shops
        .iter()
        .filter_map(|shop| {
            let distance = distance_km(origin, shop.location);
            (distance <= radius_km).then(|| CandidateShop {
                shop: shop.clone(),
                distance_km: distance,
            })
        })
        .collect()
}
