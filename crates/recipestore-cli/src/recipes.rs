//! Recipe management command handlers.

use anyhow::bail;
use clap::Subcommand;
use recipestore_core::IngredientRequirement;
use recipestore_db::RecipeRow;

use crate::parse_item;

/// Sub-commands available under `recipes`.
#[derive(Debug, Subcommand)]
pub enum RecipesCommands {
    /// List every recipe
    List,
    /// Show one recipe and its ingredients
    Show {
        /// Recipe name
        name: String,
    },
    /// Create a recipe
    Add {
        /// Recipe name
        #[arg(long)]
        name: String,
        /// Ingredient as name:quantity:unit (repeatable)
        #[arg(long = "ingredient", value_parser = parse_item, required = true)]
        ingredients: Vec<IngredientRequirement>,
    },
    /// Replace a recipe's ingredients, optionally renaming it
    Update {
        /// Current recipe name
        name: String,
        /// New name
        #[arg(long)]
        rename: Option<String>,
        /// Ingredient as name:quantity:unit (repeatable)
        #[arg(long = "ingredient", value_parser = parse_item, required = true)]
        ingredients: Vec<IngredientRequirement>,
    },
    /// Delete a recipe
    Delete {
        /// Recipe name
        name: String,
    },
}

pub(crate) async fn run(pool: &sqlx::PgPool, command: RecipesCommands) -> anyhow::Result<()> {
    match command {
        RecipesCommands::List => run_recipes_list(pool).await,
        RecipesCommands::Show { name } => run_recipes_show(pool, &name).await,
        RecipesCommands::Add { name, ingredients } => {
            ensure_positive(&ingredients)?;
            let id = recipestore_db::create_recipe(pool, &name, &ingredients).await?;
            println!("created recipe '{name}' (id {id})");
            Ok(())
        }
        RecipesCommands::Update {
            name,
            rename,
            ingredients,
        } => {
            ensure_positive(&ingredients)?;
            let recipe = find_recipe(pool, &name).await?;
            let new_name = rename.as_deref().unwrap_or(&name);
            recipestore_db::update_recipe(pool, recipe.id, new_name, &ingredients).await?;
            println!("updated recipe '{new_name}'");
            Ok(())
        }
        RecipesCommands::Delete { name } => {
            let recipe = find_recipe(pool, &name).await?;
            recipestore_db::delete_recipe(pool, recipe.id).await?;
            println!("deleted recipe '{name}'");
            Ok(())
        }
    }
}

/// Recipes may only require strictly positive amounts.
fn ensure_positive(ingredients: &[IngredientRequirement]) -> anyhow::Result<()> {
    if let Some(zero) = ingredients.iter().find(|i| i.quantity <= 0.0) {
        bail!("ingredient '{}' needs a quantity above zero", zero.name);
    }
    Ok(())
}

pub(crate) async fn find_recipe(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<RecipeRow> {
    recipestore_db::get_recipe_by_name(pool, name)
        .await?
        .ok_or_else(|| anyhow::anyhow!("recipe '{name}' not found"))
}

async fn run_recipes_list(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let recipes = recipestore_db::list_recipes(pool).await?;
    if recipes.is_empty() {
        println!("no recipes found; run `db seed` or `recipes add` first");
        return Ok(());
    }

    println!("{:<8}{:<32}UPDATED", "ID", "NAME");
    for recipe in &recipes {
        println!(
            "{:<8}{:<32}{}",
            recipe.id,
            recipe.name,
            recipe.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

async fn run_recipes_show(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<()> {
    let recipe = find_recipe(pool, name).await?;
    let ingredients = recipestore_db::list_recipe_ingredients(pool, recipe.id).await?;

    println!("Recipe: {} (id {})", recipe.name, recipe.id);
    println!();
    if ingredients.is_empty() {
        println!("(no ingredients)");
        return Ok(());
    }
    println!("{:<24}{:>10}  UNIT", "INGREDIENT", "QUANTITY");
    for row in &ingredients {
        println!(
            "{:<24}{:>10}  {}",
            row.ingredient_name, row.quantity, row.unit
        );
    }
    Ok(())
}
