//! Bulk inventory reads backing the matcher's inventory index.

use recipestore_core::InventoryEntry;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// One `shop_inventory` row keyed by the shop's public id.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InventoryRow {
    pub shop_id: Uuid,
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: String,
}

impl From<InventoryRow> for InventoryEntry {
    fn from(row: InventoryRow) -> Self {
        InventoryEntry {
            shop_id: row.shop_id,
            ingredient_name: row.ingredient_name,
            quantity: row.quantity,
            unit: row.unit,
        }
    }
}

/// Fetch the inventory of every shop in `shop_ids` in a single round-trip.
///
/// Returns an empty list without querying when `shop_ids` is empty.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn fetch_inventory_for_shops(
    pool: &PgPool,
    shop_ids: &[Uuid],
) -> Result<Vec<InventoryRow>, DbError> {
    if shop_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, InventoryRow>(
        "SELECT s.public_id AS shop_id, i.ingredient_name, i.quantity, i.unit \
         FROM shop_inventory i \
         JOIN shops s ON s.id = i.shop_id \
         WHERE s.public_id = ANY($1) \
         ORDER BY i.id",
    )
    .bind(shop_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
