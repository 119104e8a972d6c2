use recipestore_core::CatalogFile;
use sqlx::PgPool;
use uuid::Uuid;

use crate::recipes::replace_recipe_ingredients;
use crate::shops::replace_shop_inventory;
use crate::DbError;

/// Counts of rows touched by [`seed_catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub recipes: usize,
    pub shops: usize,
}

/// Upsert recipes and shops from a catalog file, matched by name.
///
/// Existing rows keep their ids; their ingredient and inventory lists are
/// replaced wholesale. All writes run inside a single transaction; if any
/// operation fails the entire batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_catalog(pool: &PgPool, catalog: &CatalogFile) -> Result<SeedSummary, DbError> {
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    for recipe in &catalog.recipes {
        let recipe_id: i64 = sqlx::query_scalar(
            "INSERT INTO recipes (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET updated_at = NOW() \
             RETURNING id",
        )
        .bind(&recipe.name)
        .fetch_one(&mut *tx)
        .await?;

        replace_recipe_ingredients(&mut *tx, recipe_id, &recipe.ingredients).await?;
        summary.recipes += 1;
    }

    for shop in &catalog.shops {
        let shop_id: i64 = sqlx::query_scalar(
            "INSERT INTO shops (public_id, name, latitude, longitude) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (name) DO UPDATE SET \
                 latitude = EXCLUDED.latitude, \
                 longitude = EXCLUDED.longitude, \
                 updated_at = NOW() \
             RETURNING id",
        )
        .bind(Uuid::new_v4())
        .bind(&shop.name)
        .bind(shop.latitude)
        .bind(shop.longitude)
        .fetch_one(&mut *tx)
        .await?;

        replace_shop_inventory(&mut *tx, shop_id, &shop.inventory).await?;
        summary.shops += 1;
    }

    tx.commit().await?;
    tracing::info!(
        recipes = summary.recipes,
        shops = summary.shops,
        "catalog seeded"
    );
    Ok(summary)
}
