//! In-memory [`Catalog`] shared by the async matcher tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

use crate::catalog::{Catalog, CatalogError};
use crate::distance::Coordinates;
use crate::model::{IngredientRequirement, InventoryEntry, RecipeSummary, Shop};

/// Kilometres per degree of longitude on the equator.
const KM_PER_DEGREE: f64 = 111.319_491;

#[derive(Default)]
pub(crate) struct MemoryCatalog {
    recipes: BTreeMap<i64, (String, Vec<IngredientRequirement>)>,
    shops: Vec<Shop>,
    inventory: Vec<InventoryEntry>,
    pub(crate) fail_shops: bool,
    pub(crate) fail_inventory: bool,
    inventory_calls: AtomicUsize,
}

impl MemoryCatalog {
    pub(crate) fn with_recipe(self, id: i64, reqs: &[(&str, f64, &str)]) -> Self {
        self.with_named_recipe(id, &format!("recipe {id}"), reqs)
    }

    pub(crate) fn with_named_recipe(
        mut self,
        id: i64,
        name: &str,
        reqs: &[(&str, f64, &str)],
    ) -> Self {
        let reqs = reqs
            .iter()
            .map(|(name, qty, unit)| IngredientRequirement::new(*name, *qty, *unit))
            .collect();
        self.recipes.insert(id, (name.to_string(), reqs));
        self
    }

    /// Add a shop on the equator, `km` east of the origin, with the given stock.
    pub(crate) fn with_shop(
        mut self,
        name: &str,
        km: f64,
        stock: &[(&str, f64, &str)],
    ) -> (Self, Uuid) {
        let id = Uuid::new_v4();
        self.shops.push(Shop {
            id,
            name: name.to_string(),
            location: Coordinates::new(0.0, km / KM_PER_DEGREE),
        });
        for (ingredient, qty, unit) in stock {
            self.inventory.push(InventoryEntry {
                shop_id: id,
                ingredient_name: (*ingredient).to_string(),
                quantity: *qty,
                unit: (*unit).to_string(),
            });
        }
        (self, id)
    }

    pub(crate) fn inventory_calls(&self) -> usize {
        self.inventory_calls.load(Ordering::SeqCst)
    }
}

impl Catalog for MemoryCatalog {
    async fn fetch_recipes(&self) -> Result<Vec<RecipeSummary>, CatalogError> {
        Ok(self
            .recipes
            .iter()
            .map(|(id, (name, _))| RecipeSummary {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn fetch_ingredients(
        &self,
        recipe_id: i64,
    ) -> Result<Vec<IngredientRequirement>, CatalogError> {
        Ok(self
            .recipes
            .get(&recipe_id)
            .map(|(_, reqs)| reqs.clone())
            .unwrap_or_default())
    }

    async fn fetch_all_shops(&self) -> Result<Vec<Shop>, CatalogError> {
        if self.fail_shops {
            return Err(CatalogError::backend(std::io::Error::other(
                "connection reset",
            )));
        }
        Ok(self.shops.clone())
    }

    async fn fetch_inventory(&self, shop_ids: &[Uuid]) -> Result<Vec<InventoryEntry>, CatalogError> {
        self.inventory_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inventory {
            return Err(CatalogError::backend(std::io::Error::other(
                "inventory table locked",
            )));
        }
        Ok(self
            .inventory
            .iter()
            .filter(|e| shop_ids.contains(&e.shop_id))
            .cloned()
            .collect())
    }
}
