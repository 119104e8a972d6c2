//! [`Catalog`] backed by a Postgres pool.

use recipestore_core::{
    Catalog, CatalogError, IngredientRequirement, InventoryEntry, RecipeSummary, Shop,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{fetch_inventory_for_shops, list_recipe_ingredients, list_recipes, list_shops};

/// Request-scoped reads over a shared pool. Each method checks out its own
/// connection; nothing is held between calls.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Catalog for PgCatalog {
    async fn fetch_recipes(&self) -> Result<Vec<RecipeSummary>, CatalogError> {
        let rows = list_recipes(&self.pool)
            .await
            .map_err(CatalogError::backend)?;
        Ok(rows.into_iter().map(RecipeSummary::from).collect())
    }

    async fn fetch_ingredients(
        &self,
        recipe_id: i64,
    ) -> Result<Vec<IngredientRequirement>, CatalogError> {
        let rows = list_recipe_ingredients(&self.pool, recipe_id)
            .await
            .map_err(CatalogError::backend)?;
        Ok(rows.into_iter().map(IngredientRequirement::from).collect())
    }

    async fn fetch_all_shops(&self) -> Result<Vec<Shop>, CatalogError> {
        let rows = list_shops(&self.pool)
            .await
            .map_err(CatalogError::backend)?;
        Ok(rows.into_iter().map(Shop::from).collect())
    }

    async fn fetch_inventory(&self, shop_ids: &[Uuid]) -> Result<Vec<InventoryEntry>, CatalogError> {
        let rows = fetch_inventory_for_shops(&self.pool, shop_ids)
            .await
            .map_err(CatalogError::backend)?;
        Ok(rows.into_iter().map(InventoryEntry::from).collect())
    }
}
