//! Database operations for the `shops` and `shop_inventory` tables.

use chrono::{DateTime, Utc};
use recipestore_core::{dedupe_by_name, Coordinates, IngredientRequirement, Shop};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::inventory::InventoryRow;
use crate::{map_unique_violation, DbError};

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `shops` table.
///
/// `id` is the internal key used by `shop_inventory`; `public_id` is the
/// identifier exposed to the matcher.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShopRow {
    pub id: i64,
    pub public_id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShopRow {
    #[must_use]
    pub fn location(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

impl From<ShopRow> for Shop {
    fn from(row: ShopRow) -> Self {
        Shop {
            id: row.public_id,
            location: Coordinates::new(row.latitude, row.longitude),
            name: row.name,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns every shop in insertion order.
///
/// The order is stable across calls; the matcher relies on it to break ties.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_shops(pool: &PgPool) -> Result<Vec<ShopRow>, DbError> {
    let rows = sqlx::query_as::<_, ShopRow>(
        "SELECT id, public_id, name, latitude, longitude, created_at, updated_at \
         FROM shops \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the shop with exactly this name, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_shop_by_name(pool: &PgPool, name: &str) -> Result<Option<ShopRow>, DbError> {
    let row = sqlx::query_as::<_, ShopRow>(
        "SELECT id, public_id, name, latitude, longitude, created_at, updated_at \
         FROM shops \
         WHERE name = $1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns one shop's inventory in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_shop_inventory(
    pool: &PgPool,
    public_id: Uuid,
) -> Result<Vec<InventoryRow>, DbError> {
    let rows = sqlx::query_as::<_, InventoryRow>(
        "SELECT s.public_id AS shop_id, i.ingredient_name, i.quantity, i.unit \
         FROM shop_inventory i \
         JOIN shops s ON s.id = i.shop_id \
         WHERE s.public_id = $1 \
         ORDER BY i.id",
    )
    .bind(public_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert a shop with a fresh public id and its inventory, in one transaction.
///
/// # Errors
///
/// Returns [`DbError::AlreadyExists`] if the name is taken, or
/// [`DbError::Sqlx`] if any statement fails.
pub async fn create_shop(
    pool: &PgPool,
    name: &str,
    location: Coordinates,
    inventory: &[IngredientRequirement],
) -> Result<Uuid, DbError> {
    let public_id = Uuid::new_v4();
    let mut tx = pool.begin().await?;

    let shop_id: i64 = sqlx::query_scalar(
        "INSERT INTO shops (public_id, name, latitude, longitude) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(public_id)
    .bind(name)
    .bind(location.latitude)
    .bind(location.longitude)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| map_unique_violation(e, name))?;

    replace_shop_inventory(&mut *tx, shop_id, inventory).await?;
    tx.commit().await?;

    tracing::debug!(%public_id, name, items = inventory.len(), "shop created");
    Ok(public_id)
}

/// Update a shop's name and location and replace its inventory atomically.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no shop has `public_id`,
/// [`DbError::AlreadyExists`] if `new_name` belongs to another shop, or
/// [`DbError::Sqlx`] if any statement fails.
pub async fn update_shop(
    pool: &PgPool,
    public_id: Uuid,
    new_name: &str,
    location: Coordinates,
    inventory: &[IngredientRequirement],
) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    let shop_id: Option<i64> = sqlx::query_scalar(
        "UPDATE shops \
         SET name = $1, latitude = $2, longitude = $3, updated_at = NOW() \
         WHERE public_id = $4 \
         RETURNING id",
    )
    .bind(new_name)
    .bind(location.latitude)
    .bind(location.longitude)
    .bind(public_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| map_unique_violation(e, new_name))?;

    let shop_id = shop_id.ok_or(DbError::NotFound)?;
    replace_shop_inventory(&mut *tx, shop_id, inventory).await?;
    tx.commit().await?;
    Ok(())
}

/// Delete a shop; its inventory goes with it via `ON DELETE CASCADE`.
///
/// Returns `true` if a row was deleted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn delete_shop(pool: &PgPool, public_id: Uuid) -> Result<bool, DbError> {
    let deleted = sqlx::query("DELETE FROM shops WHERE public_id = $1")
        .bind(public_id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(deleted > 0)
}

/// Replace every inventory row of the shop with internal id `shop_id`.
///
/// A shop stocks each ingredient at most once; repeated names collapse to
/// their last value.
pub(crate) async fn replace_shop_inventory(
    conn: &mut PgConnection,
    shop_id: i64,
    inventory: &[IngredientRequirement],
) -> Result<(), DbError> {
    sqlx::query("DELETE FROM shop_inventory WHERE shop_id = $1")
        .bind(shop_id)
        .execute(&mut *conn)
        .await?;

    let unique = dedupe_by_name(inventory.to_vec());
    if unique.is_empty() {
        return Ok(());
    }

    let names: Vec<String> = unique.iter().map(|i| i.name.clone()).collect();
    let quantities: Vec<f64> = unique.iter().map(|i| i.quantity).collect();
    let units: Vec<String> = unique.iter().map(|i| i.unit.clone()).collect();

    sqlx::query(
        "INSERT INTO shop_inventory (shop_id, ingredient_name, quantity, unit) \
         SELECT $1, * FROM UNNEST($2::text[], $3::float8[], $4::text[])",
    )
    .bind(shop_id)
    .bind(&names)
    .bind(&quantities)
    .bind(&units)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
