use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::distance::Coordinates;

/// An ingredient a recipe needs, with the quantity and unit required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRequirement {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl IngredientRequirement {
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// Collapse repeated names.
///
/// The first occurrence keeps its position; the last occurrence supplies the
/// quantity and unit.
#[must_use]
pub fn dedupe_by_name(items: Vec<IngredientRequirement>) -> Vec<IngredientRequirement> {
    let mut unique: Vec<IngredientRequirement> = Vec::with_capacity(items.len());
    for item in items {
        if let Some(existing) = unique.iter_mut().find(|u| u.name == item.name) {
            *existing = item;
        } else {
            unique.push(item);
        }
    }
    unique
}

/// How much of one ingredient a shop has on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    pub quantity: f64,
    pub unit: String,
}

impl StockLevel {
    /// Whether this stock covers `requirement`.
    ///
    /// Units must match exactly (case-sensitive, no conversion) and the
    /// stocked quantity must be at least the required quantity.
    #[must_use]
    pub fn covers(&self, requirement: &IngredientRequirement) -> bool {
        self.unit == requirement.unit && self.quantity >= requirement.quantity
    }
}

/// A stored recipe's identity, without its ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: Uuid,
    pub name: String,
    pub location: Coordinates,
}

/// One row of a shop's inventory as returned by the bulk inventory fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub shop_id: Uuid,
    pub ingredient_name: String,
    pub quantity: f64,
    pub unit: String,
}

/// A shop inside the search radius, annotated with its distance from the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateShop {
    pub shop: Shop,
    pub distance_km: f64,
}

impl CandidateShop {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.shop.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.shop.name
    }
}
