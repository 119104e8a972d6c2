//! The `in-season` command: list recipes whose ingredients are all on sale
//! nearby.

use recipestore_core::{in_season_recipes, Coordinates, InSeason};
use recipestore_db::PgCatalog;

use crate::find::check_radius;

/// # Errors
///
/// Returns an error if the radius is invalid, a catalog read fails, or the
/// result cannot be serialized.
pub(crate) async fn run_in_season(
    pool: &sqlx::PgPool,
    origin: Coordinates,
    radius_km: f64,
    json: bool,
) -> anyhow::Result<()> {
    check_radius(radius_km)?;

    let catalog = PgCatalog::new(pool.clone());
    let result = in_season_recipes(&catalog, origin, radius_km).await?;
    if let InSeason::Recipes { recipes } = &result {
        tracing::info!(matches = recipes.len(), radius_km, "in-season lookup");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_in_season(&result, radius_km));
    }
    Ok(())
}

pub(crate) fn render_in_season(result: &InSeason, radius_km: f64) -> String {
    match result {
        InSeason::NoRecipes => "No recipes in the catalog.\n".to_string(),
        InSeason::NoShops => format!("No shops within {radius_km} km of the starting point.\n"),
        InSeason::Recipes { recipes } if recipes.is_empty() => format!(
            "No recipe has every ingredient available within {radius_km} km.\n"
        ),
        InSeason::Recipes { recipes } => {
            let mut out =
                String::from("Recipes in season (all ingredients available nearby):\n");
            for recipe in recipes {
                out.push_str(&format!("- {}\n", recipe.name));
            }
            out
        }
    }
}
