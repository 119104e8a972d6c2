//! Shop management command handlers.

use anyhow::bail;
use clap::Subcommand;
use recipestore_core::{Coordinates, IngredientRequirement};
use recipestore_db::ShopRow;

use crate::parse_item;

/// Sub-commands available under `shops`.
#[derive(Debug, Subcommand)]
pub enum ShopsCommands {
    /// List every shop
    List,
    /// Show one shop and its inventory
    Show {
        /// Shop name
        name: String,
    },
    /// Create a shop
    Add {
        /// Shop name
        #[arg(long)]
        name: String,
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Stocked item as name:quantity:unit (repeatable)
        #[arg(long = "item", value_parser = parse_item)]
        items: Vec<IngredientRequirement>,
    },
    /// Move a shop or replace its inventory
    Update {
        /// Current shop name
        name: String,
        /// New name
        #[arg(long)]
        rename: Option<String>,
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Stocked item as name:quantity:unit (repeatable)
        #[arg(long = "item", value_parser = parse_item)]
        items: Vec<IngredientRequirement>,
    },
    /// Delete a shop
    Delete {
        /// Shop name
        name: String,
    },
}

pub(crate) async fn run(pool: &sqlx::PgPool, command: ShopsCommands) -> anyhow::Result<()> {
    match command {
        ShopsCommands::List => run_shops_list(pool).await,
        ShopsCommands::Show { name } => run_shops_show(pool, &name).await,
        ShopsCommands::Add {
            name,
            lat,
            lon,
            items,
        } => {
            let location = checked_location(lat, lon)?;
            let public_id = recipestore_db::create_shop(pool, &name, location, &items).await?;
            println!("created shop '{name}' ({public_id})");
            Ok(())
        }
        ShopsCommands::Update {
            name,
            rename,
            lat,
            lon,
            items,
        } => {
            let location = checked_location(lat, lon)?;
            let shop = find_shop(pool, &name).await?;
            let new_name = rename.as_deref().unwrap_or(&name);
            recipestore_db::update_shop(pool, shop.public_id, new_name, location, &items).await?;
            println!("updated shop '{new_name}'");
            Ok(())
        }
        ShopsCommands::Delete { name } => {
            let shop = find_shop(pool, &name).await?;
            recipestore_db::delete_shop(pool, shop.public_id).await?;
            println!("deleted shop '{name}'");
            Ok(())
        }
    }
}

/// Reject coordinates outside the valid latitude/longitude range.
pub(crate) fn checked_location(lat: f64, lon: f64) -> anyhow::Result<Coordinates> {
    let location = Coordinates::new(lat, lon);
    if !location.is_valid() {
        bail!("coordinates {lat},{lon} are out of range");
    }
    Ok(location)
}

async fn find_shop(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<ShopRow> {
    recipestore_db::get_shop_by_name(pool, name)
        .await?
        .ok_or_else(|| anyhow::anyhow!("shop '{name}' not found"))
}

async fn run_shops_list(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let shops = recipestore_db::list_shops(pool).await?;
    if shops.is_empty() {
        println!("no shops found; run `db seed` or `shops add` first");
        return Ok(());
    }

    println!("{:<32}{:<24}ID", "NAME", "LOCATION");
    for shop in &shops {
        println!("{:<32}{:<24}{}", shop.name, shop.location().to_string(), shop.public_id);
    }
    Ok(())
}

async fn run_shops_show(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<()> {
    let shop = find_shop(pool, name).await?;
    let inventory = recipestore_db::list_shop_inventory(pool, shop.public_id).await?;

    println!("Shop: {} ({})", shop.name, shop.public_id);
    println!("Location: {}", shop.location());
    println!();
    if inventory.is_empty() {
        println!("(nothing in stock)");
        return Ok(());
    }
    println!("{:<24}{:>10}  UNIT", "ITEM", "QUANTITY");
    for row in &inventory {
        println!("{:<24}{:>10}  {}", row.ingredient_name, row.quantity, row.unit);
    }
    Ok(())
}
