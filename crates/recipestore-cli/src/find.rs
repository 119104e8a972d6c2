//! The `find` command: resolve a recipe against nearby shops and print where
//! to buy each ingredient.

use anyhow::bail;
use recipestore_core::{build_route_url, resolve, Coordinates, Resolution, ShoppingList};
use recipestore_db::PgCatalog;

use crate::recipes::find_recipe;

#[derive(Debug, Clone)]
pub(crate) struct FindRequest {
    pub recipe: String,
    pub origin: Coordinates,
    pub radius_km: f64,
    pub route: bool,
    pub json: bool,
}

/// Resolve the requested recipe from the given origin.
///
/// Every outcome, including a catalog failure reported as
/// [`Resolution::Error`], is printed rather than returned as an error.
///
/// # Errors
///
/// Returns an error if the radius is invalid, the recipe does not exist, or
/// the resolution cannot be serialized.
pub(crate) async fn run_find(pool: &sqlx::PgPool, request: &FindRequest) -> anyhow::Result<()> {
    let origin = request.origin;
    check_radius(request.radius_km)?;

    let recipe = find_recipe(pool, &request.recipe).await?;
    let catalog = PgCatalog::new(pool.clone());
    let resolution = resolve(&catalog, recipe.id, origin, request.radius_km).await;
    tracing::info!(
        recipe = %recipe.name,
        outcome = resolution.kind(),
        radius_km = request.radius_km,
        "recipe resolved"
    );

    if request.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    print!(
        "{}",
        render_resolution(&recipe.name, &resolution, request.radius_km)
    );
    if request.route {
        if let Some(url) = route_url(origin, &resolution) {
            println!();
            println!("Route: {url}");
        }
    }
    Ok(())
}

pub(crate) fn check_radius(radius_km: f64) -> anyhow::Result<()> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        bail!("radius must be a positive number of kilometres, got {radius_km}");
    }
    Ok(())
}

/// Directions URL through every shop the resolution names.
fn route_url(origin: Coordinates, resolution: &Resolution) -> Option<String> {
    let shops = resolution.shops();
    if shops.is_empty() {
        return None;
    }
    Some(build_route_url(origin, shops))
}

/// Human-readable report for one resolution outcome.
pub(crate) fn render_resolution(recipe: &str, resolution: &Resolution, radius_km: f64) -> String {
    match resolution {
        Resolution::NoIngredients => {
            format!("Recipe '{recipe}' has no ingredients; nothing to buy.\n")
        }
        Resolution::NoShops => {
            format!("No shops within {radius_km} km of the starting point.\n")
        }
        Resolution::Unavailable { ingredient } => format!(
            "No shop within {radius_km} km stocks enough {ingredient} for '{recipe}'.\n"
        ),
        Resolution::Error { message } => {
            format!("Could not resolve '{recipe}': {message}\n")
        }
        Resolution::Single { shops, .. } => {
            let mut out = String::new();
            if let Some(chosen) = shops.first() {
                out.push_str(&format!(
                    "Everything for '{recipe}' is available at {} ({:.2} km).\n",
                    chosen.name(),
                    chosen.distance_km
                ));
            }
            let others: Vec<&str> = shops
                .iter()
                .skip(1)
                .map(recipestore_core::CandidateShop::name)
                .collect();
            if !others.is_empty() {
                out.push_str(&format!("Also fully stocked: {}\n", others.join(", ")));
            }
            push_shopping_list(&mut out, resolution);
            out
        }
        Resolution::Multiple { shops, assignment } => {
            let grouped = assignment.ingredients_by_shop();
            let mut out = format!("'{recipe}' needs {} shops:\n", shops.len());
            for shop in shops {
                let items = grouped
                    .iter()
                    .find(|(supplier, _)| supplier.id() == shop.id())
                    .map(|(_, names)| names.join(", "))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "  {:<32}{:>8.2} km  {items}\n",
                    shop.name(),
                    shop.distance_km
                ));
            }
            push_shopping_list(&mut out, resolution);
            out
        }
    }
}

fn push_shopping_list(out: &mut String, resolution: &Resolution) {
    if let Some(list) = ShoppingList::from_resolution(resolution) {
        out.push('\n');
        out.push_str("Shopping list:\n");
        out.push_str(&list.to_string());
    }
}
