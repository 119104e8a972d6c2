use serde::Serialize;

use crate::resolver::Resolution;

/// One thing to buy and where to buy it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListLine {
    pub ingredient: String,
    pub quantity: f64,
    pub unit: String,
    pub shop_name: String,
    pub distance_km: f64,
}

/// Flat shopping list derived from a resolved assignment, in recipe order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShoppingList {
    pub lines: Vec<ShoppingListLine>,
}

impl ShoppingList {
    /// Returns `None` for any outcome that has no assignment.
    #[must_use]
    pub fn from_resolution(resolution: &Resolution) -> Option<Self> {
        let assignment = resolution.assignment()?;
        let lines = assignment
            .iter()
            .map(|item| ShoppingListLine {
                ingredient: item.requirement.name.clone(),
                quantity: item.requirement.quantity,
                unit: item.requirement.unit.clone(),
                shop_name: item.shop.name().to_string(),
                distance_km: item.shop.distance_km,
            })
            .collect();
        Some(Self { lines })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl std::fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(
                f,
                "{}: {} {} - buy from {} ({:.2} km)",
                line.ingredient, line.quantity, line.unit, line.shop_name, line.distance_km
            )?;
        }
        Ok(())
    }
}
