//! Which recipes can be cooked from what nearby shops stock.
//!
//! Only ingredient names are compared; quantity and unit are ignored, so a
//! recipe is in season as soon as every ingredient appears somewhere nearby.

use serde::Serialize;
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogError};
use crate::distance::Coordinates;
use crate::filter::shops_within_radius;
use crate::inventory::load_inventory_index;
use crate::model::{CandidateShop, RecipeSummary};

/// Outcome of an in-season lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InSeason {
    /// The catalog holds no recipes at all.
    NoRecipes,
    /// No shop lies within the search radius.
    NoShops,
    /// Recipes whose every ingredient is stocked nearby, in catalog order.
    /// May be empty.
    Recipes { recipes: Vec<RecipeSummary> },
}

/// List the recipes whose ingredients are all stocked by some shop within
/// `radius_km` of `origin`.
///
/// Shops are narrowed with the same radius filter as resolution and their
/// inventory is read in one bulk fetch. A recipe without ingredients is
/// trivially in season.
///
/// # Errors
///
/// Returns [`CatalogError`] if any catalog read fails.
pub async fn in_season_recipes<C: Catalog>(
    catalog: &C,
    origin: Coordinates,
    radius_km: f64,
) -> Result<InSeason, CatalogError> {
    let recipes = catalog.fetch_recipes().await?;
    if recipes.is_empty() {
        return Ok(InSeason::NoRecipes);
    }

    let shops = catalog.fetch_all_shops().await?;
    let candidates = shops_within_radius(&shops, origin, radius_km);
    if candidates.is_empty() {
        return Ok(InSeason::NoShops);
    }

    let shop_ids: Vec<Uuid> = candidates.iter().map(CandidateShop::id).collect();
    let index = load_inventory_index(catalog, &shop_ids).await?;
    let stocked = index.stocked_names();

    let mut in_season = Vec::new();
    for recipe in recipes {
        let ingredients = catalog.fetch_ingredients(recipe.id).await?;
        if ingredients
            .iter()
            .all(|req| stocked.contains(req.name.as_str()))
        {
            in_season.push(recipe);
        }
    }

    tracing::debug!(
        nearby = candidates.len(),
        stocked = stocked.len(),
        matches = in_season.len(),
        "in-season lookup complete"
    );
    Ok(InSeason::Recipes { recipes: in_season })
}

#[cfg(test)]
#[path = "season_test.rs"]
mod tests;
