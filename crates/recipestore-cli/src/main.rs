use clap::{Parser, Subcommand};
use recipestore_core::IngredientRequirement;
use tracing_subscriber::EnvFilter;

mod db;
mod find;
mod origin;
mod recipes;
mod season;
mod shops;

use db::DbCommands;
use origin::OriginArgs;
use recipes::RecipesCommands;
use shops::ShopsCommands;

#[derive(Debug, Parser)]
#[command(name = "recipestore-cli")]
#[command(about = "Find nearby shops that can supply a recipe")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Manage recipes and their ingredient requirements
    Recipes {
        #[command(subcommand)]
        command: RecipesCommands,
    },
    /// Manage shops and their inventory
    Shops {
        #[command(subcommand)]
        command: ShopsCommands,
    },
    /// Work out where to buy every ingredient of a recipe
    Find {
        /// Recipe name
        #[arg(long)]
        recipe: String,
        #[command(flatten)]
        origin: OriginArgs,
        /// Search radius in kilometres (defaults to `RECIPESTORE_DEFAULT_RADIUS_KM`)
        #[arg(long)]
        radius: Option<f64>,
        /// Also print a directions URL through the assigned shops
        #[arg(long)]
        route: bool,
        /// Print the raw resolution as JSON
        #[arg(long)]
        json: bool,
    },
    /// List recipes whose every ingredient is stocked by a nearby shop
    InSeason {
        #[command(flatten)]
        origin: OriginArgs,
        /// Search radius in kilometres (defaults to `RECIPESTORE_DEFAULT_RADIUS_KM`)
        #[arg(long)]
        radius: Option<f64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse a `name:quantity:unit` triple into an ingredient requirement.
///
/// The name may itself contain colons; quantity and unit are taken from the
/// right.
fn parse_item(raw: &str) -> Result<IngredientRequirement, String> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(unit), Some(quantity), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected name:quantity:unit, got '{raw}'"));
    };

    let name = name.trim();
    let unit = unit.trim();
    if name.is_empty() || unit.is_empty() {
        return Err(format!("name and unit must not be empty in '{raw}'"));
    }

    let quantity = quantity
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid quantity in '{raw}': {e}"))?;
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(format!("quantity must be a non-negative number in '{raw}'"));
    }

    Ok(IngredientRequirement::new(name, quantity, unit))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("recipestore-cli: run with --help to list commands");
        return Ok(());
    };

    let config = recipestore_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = recipestore_db::PoolConfig::from_app_config(&config);
    let pool = recipestore_db::connect_pool(&config.database_url, pool_config).await?;
    tracing::debug!(env = %config.env, "connected to database");

    match command {
        Commands::Db { command } => db::run(&pool, &config, command).await,
        Commands::Recipes { command } => recipes::run(&pool, command).await,
        Commands::Shops { command } => shops::run(&pool, command).await,
        Commands::Find {
            recipe,
            origin,
            radius,
            route,
            json,
        } => {
            let request = find::FindRequest {
                recipe,
                origin: origin::resolve_origin(&origin, &config).await?,
                radius_km: radius.unwrap_or(config.default_radius_km),
                route,
                json,
            };
            find::run_find(&pool, &request).await
        }
        Commands::InSeason {
            origin,
            radius,
            json,
        } => {
            let origin = origin::resolve_origin(&origin, &config).await?;
            let radius_km = radius.unwrap_or(config.default_radius_km);
            season::run_in_season(&pool, origin, radius_km, json).await
        }
    }
}

#[cfg(test)]
mod tests;
