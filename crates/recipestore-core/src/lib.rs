pub mod app_config;
pub mod catalog;
pub mod catalog_file;
pub mod config;
pub mod distance;
pub mod filter;
pub mod inventory;
pub mod model;
pub mod resolver;
pub mod route;
pub mod season;
pub mod shopping_list;
#[cfg(test)]
mod test_support;

pub use app_config::{AppConfig, Environment};
pub use catalog::{Catalog, CatalogError};
pub use catalog_file::{load_catalog, parse_catalog, CatalogFile, RecipeConfig, ShopConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use distance::{distance_km, Coordinates};
pub use filter::shops_within_radius;
pub use inventory::{load_inventory_index, InventoryIndex};
pub use model::{
    dedupe_by_name, CandidateShop, IngredientRequirement, InventoryEntry, RecipeSummary, Shop,
    StockLevel,
};
pub use resolver::{resolve, resolve_assignment, try_resolve, AssignedIngredient, Assignment, Resolution};
pub use route::{build_route_url, DIRECTIONS_BASE_URL};
pub use season::{in_season_recipes, InSeason};
pub use shopping_list::{ShoppingList, ShoppingListLine};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
