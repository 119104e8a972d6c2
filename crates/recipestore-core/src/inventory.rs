use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::catalog::{Catalog, CatalogError};
use crate::model::{IngredientRequirement, InventoryEntry, StockLevel};

/// Per-shop stock, keyed by shop id and then ingredient name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryIndex {
    shops: HashMap<Uuid, HashMap<String, StockLevel>>,
}

impl InventoryIndex {
    /// Group bulk-fetched rows by shop.
    ///
    /// If a shop lists the same ingredient twice, the later row wins.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = InventoryEntry>) -> Self {
        let mut shops: HashMap<Uuid, HashMap<String, StockLevel>> = HashMap::new();
        for entry in entries {
            shops.entry(entry.shop_id).or_default().insert(
                entry.ingredient_name,
                StockLevel {
                    quantity: entry.quantity,
                    unit: entry.unit,
                },
            );
        }
        Self { shops }
    }

    #[must_use]
    pub fn stock(&self, shop_id: Uuid, ingredient: &str) -> Option<&StockLevel> {
        self.shops.get(&shop_id)?.get(ingredient)
    }

    /// Whether `shop_id` stocks `requirement` in the right unit and enough of it.
    #[must_use]
    pub fn fulfills(&self, shop_id: Uuid, requirement: &IngredientRequirement) -> bool {
        self.stock(shop_id, &requirement.name)
            .is_some_and(|stock| stock.covers(requirement))
    }

    /// Whether `shop_id` fulfills every requirement on its own.
    #[must_use]
    pub fn fulfills_all(&self, shop_id: Uuid, requirements: &[IngredientRequirement]) -> bool {
        requirements.iter().all(|req| self.fulfills(shop_id, req))
    }

    #[must_use]
    pub fn shop_count(&self) -> usize {
        self.shops.len()
    }

    /// Names of every ingredient any indexed shop lists, whatever the amount.
    #[must_use]
    pub fn stocked_names(&self) -> HashSet<&str> {
        self.shops
            .values()
            .flat_map(HashMap::keys)
            .map(String::as_str)
            .collect()
    }
}

/// Build the index for `shop_ids` from a single bulk inventory read.
///
/// An empty id list returns an empty index without touching the catalog.
///
/// # Errors
///
/// Returns [`CatalogError`] if the inventory fetch fails.
pub async fn load_inventory_index<C: Catalog>(
    catalog: &C,
    shop_ids: &[Uuid],
) -> Result<InventoryIndex, CatalogError> {
    if shop_ids.is_empty() {
        return Ok(InventoryIndex::default());
    }
    let entries = catalog.fetch_inventory(shop_ids).await?;
    tracing::debug!(
        shops = shop_ids.len(),
        rows = entries.len(),
        "loaded inventory"
    );
    Ok(InventoryIndex::from_entries(entries))
}
