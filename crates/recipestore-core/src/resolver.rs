//! Ingredient-to-shop assignment.
//!
//! Given a recipe's requirements and the shops near the user, find a set of
//! shops that together cover every requirement, preferring one shop that
//! carries everything.

use serde::Serialize;
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogError};
use crate::distance::Coordinates;
use crate::filter::shops_within_radius;
use crate::inventory::{load_inventory_index, InventoryIndex};
use crate::model::{dedupe_by_name, CandidateShop, IngredientRequirement};

/// One requirement and the shop chosen to supply it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignedIngredient {
    pub requirement: IngredientRequirement,
    pub shop: CandidateShop,
}

/// Ingredient → shop mapping, in recipe requirement order.
///
/// Every requirement of the recipe appears exactly once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Assignment {
    items: Vec<AssignedIngredient>,
}

impl Assignment {
    #[must_use]
    pub fn shop_for(&self, ingredient: &str) -> Option<&CandidateShop> {
        self.items
            .iter()
            .find(|item| item.requirement.name == ingredient)
            .map(|item| &item.shop)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssignedIngredient> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct supplying shops in first-assigned order.
    #[must_use]
    pub fn distinct_shops(&self) -> Vec<CandidateShop> {
        let mut seen: Vec<Uuid> = Vec::new();
        let mut shops = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.shop.id()) {
                seen.push(item.shop.id());
                shops.push(item.shop.clone());
            }
        }
        shops
    }

    /// Ingredient names grouped under each supplying shop.
    #[must_use]
    pub fn ingredients_by_shop(&self) -> Vec<(CandidateShop, Vec<&str>)> {
        self.distinct_shops()
            .into_iter()
            .map(|shop| {
                let names = self
                    .items
                    .iter()
                    .filter(|item| item.shop.id() == shop.id())
                    .map(|item| item.requirement.name.as_str())
                    .collect();
                (shop, names)
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a AssignedIngredient;
    type IntoIter = std::slice::Iter<'a, AssignedIngredient>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Outcome of one resolution. Exactly one variant per call; there are no
/// partial results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resolution {
    /// The recipe has no ingredient requirements.
    NoIngredients,
    /// No shop lies within the search radius.
    NoShops,
    /// No nearby shop can supply this ingredient.
    Unavailable { ingredient: String },
    /// Everything comes from one shop. `shops` lists every shop that could
    /// have covered the recipe alone (or the single converged shop).
    Single {
        shops: Vec<CandidateShop>,
        assignment: Assignment,
    },
    /// Several shops are needed; `shops` is deduplicated and sorted nearest first.
    Multiple {
        shops: Vec<CandidateShop>,
        assignment: Assignment,
    },
    /// A data-access fault aborted the resolution.
    Error { message: String },
}

impl Resolution {
    #[must_use]
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Resolution::Single { assignment, .. } | Resolution::Multiple { assignment, .. } => {
                Some(assignment)
            }
            _ => None,
        }
    }

    /// Every qualifying shop for `Single`; the deduplicated suppliers,
    /// nearest first, for `Multiple`. Routes are built from this list.
    #[must_use]
    pub fn shops(&self) -> &[CandidateShop] {
        match self {
            Resolution::Single { shops, .. } | Resolution::Multiple { shops, .. } => shops,
            _ => &[],
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Resolution::NoIngredients => "no_ingredients",
            Resolution::NoShops => "no_shops",
            Resolution::Unavailable { .. } => "unavailable",
            Resolution::Single { .. } => "single",
            Resolution::Multiple { .. } => "multiple",
            Resolution::Error { .. } => "error",
        }
    }
}

fn sort_nearest_first(shops: &mut [CandidateShop]) {
    // stable sort keeps input order among equal distances
    shops.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}

/// Nearest candidate that fulfills `requirement`; ties go to the first one seen.
fn nearest_supplier<'a>(
    requirement: &IngredientRequirement,
    candidates: &'a [CandidateShop],
    index: &InventoryIndex,
) -> Option<&'a CandidateShop> {
    candidates
        .iter()
        .filter(|shop| index.fulfills(shop.id(), requirement))
        .fold(None, |best: Option<&CandidateShop>, shop| match best {
            Some(current) if current.distance_km <= shop.distance_km => Some(current),
            _ => Some(shop),
        })
}

/// Assign every requirement to a candidate shop.
///
/// Pure: works only on the data handed in. Candidates are considered in the
/// order given, which decides ties.
#[must_use]
pub fn resolve_assignment(
    requirements: &[IngredientRequirement],
    candidates: &[CandidateShop],
    index: &InventoryIndex,
) -> Resolution {
    if requirements.is_empty() {
        return Resolution::NoIngredients;
    }
    if candidates.is_empty() {
        return Resolution::NoShops;
    }

    let single_shops: Vec<CandidateShop> = candidates
        .iter()
        .filter(|shop| index.fulfills_all(shop.id(), requirements))
        .cloned()
        .collect();

    if let Some(chosen) = single_shops.first() {
        let items = requirements
            .iter()
            .map(|req| AssignedIngredient {
                requirement: req.clone(),
                shop: chosen.clone(),
            })
            .collect();
        tracing::debug!(
            qualifying = single_shops.len(),
            shop = %chosen.name(),
            "single shop covers recipe"
        );
        return Resolution::Single {
            shops: single_shops,
            assignment: Assignment { items },
        };
    }

    let mut items = Vec::with_capacity(requirements.len());
    for req in requirements {
        let Some(shop) = nearest_supplier(req, candidates, index) else {
            tracing::debug!(ingredient = %req.name, "no nearby shop supplies ingredient");
            return Resolution::Unavailable {
                ingredient: req.name.clone(),
            };
        };
        items.push(AssignedIngredient {
            requirement: req.clone(),
            shop: shop.clone(),
        });
    }

    let assignment = Assignment { items };
    let mut shops = assignment.distinct_shops();
    sort_nearest_first(&mut shops);
    tracing::debug!(shops = shops.len(), "per-ingredient assignment complete");

    if shops.len() > 1 {
        Resolution::Multiple { shops, assignment }
    } else {
        Resolution::Single { shops, assignment }
    }
}

/// Resolve a recipe against the catalog, surfacing data-access faults as `Err`.
///
/// # Errors
///
/// Returns [`CatalogError`] if any catalog read fails.
pub async fn try_resolve<C: Catalog>(
    catalog: &C,
    recipe_id: i64,
    origin: Coordinates,
    radius_km: f64,
) -> Result<Resolution, CatalogError> {
    let requirements = dedupe_by_name(catalog.fetch_ingredients(recipe_id).await?);
    if requirements.is_empty() {
        return Ok(Resolution::NoIngredients);
    }

    let shops = catalog.fetch_all_shops().await?;
    let candidates = shops_within_radius(&shops, origin, radius_km);
    tracing::debug!(
        recipe_id,
        total_shops = shops.len(),
        nearby = candidates.len(),
        radius_km,
        "filtered shops by radius"
    );
    if candidates.is_empty() {
        return Ok(Resolution::NoShops);
    }

    let shop_ids: Vec<Uuid> = candidates.iter().map(CandidateShop::id).collect();
    let index = load_inventory_index(catalog, &shop_ids).await?;

    Ok(resolve_assignment(&requirements, &candidates, &index))
}

/// Resolve a recipe against the catalog.
///
/// Any data-access fault becomes [`Resolution::Error`]; nothing is retried.
pub async fn resolve<C: Catalog>(
    catalog: &C,
    recipe_id: i64,
    origin: Coordinates,
    radius_km: f64,
) -> Resolution {
    match try_resolve(catalog, recipe_id, origin, radius_km).await {
        Ok(resolution) => resolution,
        Err(err) => {
            tracing::warn!(recipe_id, error = %err, "resolution aborted by catalog error");
            Resolution::Error {
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
