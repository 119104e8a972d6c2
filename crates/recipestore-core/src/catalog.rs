//! Read-side repository seam between the matcher and whatever stores recipes
//! and shops.

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::model::{IngredientRequirement, InventoryEntry, RecipeSummary, Shop};

/// A data-access fault raised by a [`Catalog`] backend.
///
/// The original cause is kept as a boxed source so callers can log it, but the
/// matcher only ever surfaces its message.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CatalogError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// The reads the matcher needs.
///
/// Implementations are request-scoped: every call is an independent read and
/// no transaction spans a whole resolution.
pub trait Catalog {
    /// Every recipe, in the store's stable retrieval order.
    fn fetch_recipes(&self) -> impl Future<Output = Result<Vec<RecipeSummary>, CatalogError>> + Send;

    /// Ingredient requirements for one recipe. An unknown recipe yields an
    /// empty list.
    fn fetch_ingredients(
        &self,
        recipe_id: i64,
    ) -> impl Future<Output = Result<Vec<IngredientRequirement>, CatalogError>> + Send;

    /// Every shop, in the store's stable retrieval order.
    fn fetch_all_shops(&self) -> impl Future<Output = Result<Vec<Shop>, CatalogError>> + Send;

    /// All inventory rows for the given shops, in one bulk read.
    fn fetch_inventory(
        &self,
        shop_ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<InventoryEntry>, CatalogError>> + Send;
}
