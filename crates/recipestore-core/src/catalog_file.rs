//! YAML seed file describing recipes and shops.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distance::Coordinates;
use crate::model::IngredientRequirement;
use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeConfig {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientRequirement>,
}

/// A stocked item. Same shape as a requirement; quantity may be zero.
pub type StockConfig = IngredientRequirement;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub inventory: Vec<StockConfig>,
}

impl ShopConfig {
    #[must_use]
    pub fn location(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub recipes: Vec<RecipeConfig>,
    #[serde(default)]
    pub shops: Vec<ShopConfig>,
}

/// Load and validate a catalog file from disk.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_catalog(&content)
}

/// Parse and validate catalog YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_catalog(content: &str) -> Result<CatalogFile, ConfigError> {
    let catalog: CatalogFile = serde_yaml::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &CatalogFile) -> Result<(), ConfigError> {
    let mut seen_recipes = HashSet::new();
    for recipe in &catalog.recipes {
        if recipe.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "recipe name must be non-empty".to_string(),
            ));
        }
        if !seen_recipes.insert(recipe.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate recipe name: '{}'",
                recipe.name
            )));
        }

        let mut seen_ingredients = HashSet::new();
        for ingredient in &recipe.ingredients {
            validate_item_name(&recipe.name, ingredient)?;
            if !(ingredient.quantity.is_finite() && ingredient.quantity > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "recipe '{}' needs a positive quantity for '{}', got {}",
                    recipe.name, ingredient.name, ingredient.quantity
                )));
            }
            if !seen_ingredients.insert(ingredient.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "recipe '{}' lists '{}' more than once",
                    recipe.name, ingredient.name
                )));
            }
        }
    }

    let mut seen_shops = HashSet::new();
    for shop in &catalog.shops {
        if shop.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "shop name must be non-empty".to_string(),
            ));
        }
        if !seen_shops.insert(shop.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate shop name: '{}'",
                shop.name
            )));
        }
        if !shop.location().is_valid() {
            return Err(ConfigError::Validation(format!(
                "shop '{}' has out-of-range coordinates ({}, {})",
                shop.name, shop.latitude, shop.longitude
            )));
        }
        for item in &shop.inventory {
            validate_item_name(&shop.name, item)?;
            if !(item.quantity.is_finite() && item.quantity >= 0.0) {
                return Err(ConfigError::Validation(format!(
                    "shop '{}' has a negative quantity for '{}'",
                    shop.name, item.name
                )));
            }
        }
    }

    Ok(())
}

fn validate_item_name(owner: &str, item: &IngredientRequirement) -> Result<(), ConfigError> {
    if item.name.trim().is_empty() || item.unit.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "'{owner}' has an item with an empty name or unit"
        )));
    }
    Ok(())
}
