//! Database operations for the `recipes` and `recipe_ingredients` tables.

use chrono::{DateTime, Utc};
use recipestore_core::{dedupe_by_name, IngredientRequirement, RecipeSummary};
use sqlx::{PgConnection, PgPool};

use crate::{map_unique_violation, DbError};

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `recipes` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecipeRow> for RecipeSummary {
    fn from(row: RecipeRow) -> Self {
        RecipeSummary {
            id: row.id,
            name: row.name,
        }
    }
}

/// A row from the `recipe_ingredients` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeIngredientRow {
    pub recipe_id: i64,
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: String,
}

impl From<RecipeIngredientRow> for IngredientRequirement {
    fn from(row: RecipeIngredientRow) -> Self {
        IngredientRequirement {
            name: row.ingredient_name,
            quantity: row.quantity,
            unit: row.unit,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns all recipes in creation order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recipes(pool: &PgPool) -> Result<Vec<RecipeRow>, DbError> {
    let rows = sqlx::query_as::<_, RecipeRow>(
        "SELECT id, name, created_at, updated_at FROM recipes ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the recipe with exactly this name, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_recipe_by_name(pool: &PgPool, name: &str) -> Result<Option<RecipeRow>, DbError> {
    let row = sqlx::query_as::<_, RecipeRow>(
        "SELECT id, name, created_at, updated_at FROM recipes WHERE name = $1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns the ingredient requirements of one recipe in insertion order.
///
/// An unknown `recipe_id` yields an empty list.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recipe_ingredients(
    pool: &PgPool,
    recipe_id: i64,
) -> Result<Vec<RecipeIngredientRow>, DbError> {
    let rows = sqlx::query_as::<_, RecipeIngredientRow>(
        "SELECT recipe_id, ingredient_name, quantity, unit \
         FROM recipe_ingredients \
         WHERE recipe_id = $1 \
         ORDER BY id",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert a recipe and its ingredients in one transaction, returning its id.
///
/// # Errors
///
/// Returns [`DbError::AlreadyExists`] if the name is taken, or
/// [`DbError::Sqlx`] if any statement fails.
pub async fn create_recipe(
    pool: &PgPool,
    name: &str,
    ingredients: &[IngredientRequirement],
) -> Result<i64, DbError> {
    let mut tx = pool.begin().await?;

    let recipe_id: i64 = sqlx::query_scalar("INSERT INTO recipes (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, name))?;

    replace_recipe_ingredients(&mut *tx, recipe_id, ingredients).await?;
    tx.commit().await?;

    tracing::debug!(recipe_id, name, ingredients = ingredients.len(), "recipe created");
    Ok(recipe_id)
}

/// Rename a recipe and replace its full ingredient list atomically.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no recipe has `recipe_id`,
/// [`DbError::AlreadyExists`] if `new_name` belongs to another recipe, or
/// [`DbError::Sqlx`] if any statement fails.
pub async fn update_recipe(
    pool: &PgPool,
    recipe_id: i64,
    new_name: &str,
    ingredients: &[IngredientRequirement],
) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query("UPDATE recipes SET name = $1, updated_at = NOW() WHERE id = $2")
        .bind(new_name)
        .bind(recipe_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, new_name))?
        .rows_affected();
    if updated == 0 {
        return Err(DbError::NotFound);
    }

    replace_recipe_ingredients(&mut *tx, recipe_id, ingredients).await?;
    tx.commit().await?;
    Ok(())
}

/// Delete a recipe; its ingredients go with it via `ON DELETE CASCADE`.
///
/// Returns `true` if a row was deleted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn delete_recipe(pool: &PgPool, recipe_id: i64) -> Result<bool, DbError> {
    let deleted = sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(deleted > 0)
}

/// Replace every ingredient row of `recipe_id` with `ingredients`.
///
/// Repeated names collapse to their last value before the batch insert; the
/// table holds one row per `(recipe_id, ingredient_name)`.
pub(crate) async fn replace_recipe_ingredients(
    conn: &mut PgConnection,
    recipe_id: i64,
    ingredients: &[IngredientRequirement],
) -> Result<(), DbError> {
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;

    let unique = dedupe_by_name(ingredients.to_vec());
    if unique.is_empty() {
        return Ok(());
    }

    let names: Vec<String> = unique.iter().map(|i| i.name.clone()).collect();
    let quantities: Vec<f64> = unique.iter().map(|i| i.quantity).collect();
    let units: Vec<String> = unique.iter().map(|i| i.unit.clone()).collect();

    sqlx::query(
        "INSERT INTO recipe_ingredients (recipe_id, ingredient_name, quantity, unit) \
         SELECT $1, * FROM UNNEST($2::text[], $3::float8[], $4::text[])",
    )
    .bind(recipe_id)
    .bind(&names)
    .bind(&quantities)
    .bind(&units)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
