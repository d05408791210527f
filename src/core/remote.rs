/// Remote recipe source
///
/// The "remote" is a static catalog bundled into the binary; fetching it
/// stands in for a real API call. Individual malformed records are dropped
/// rather than failing the whole batch.

use crate::db::Recipe;
use crate::error::{RecipeError, Result};
use async_trait::async_trait;

/// Bundled catalog, embedded at compile time
const BUNDLED_CATALOG: &str = include_str!("../../assets/recipes.json");

/// Contract for fetching the full recipe list from a remote source
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch all recipes; fails with a connectivity or format error
    async fn fetch_recipes(&self) -> Result<Vec<Recipe>>;
}

/// A source that simulates an API call by reading the bundled JSON catalog
#[derive(Debug, Default)]
pub struct BundledRecipeSource;

impl BundledRecipeSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RecipeSource for BundledRecipeSource {
    async fn fetch_recipes(&self) -> Result<Vec<Recipe>> {
        decode_catalog(BUNDLED_CATALOG)
    }
}

/// Decode a catalog document, skipping records that are missing required
/// fields instead of failing the batch
fn decode_catalog(raw: &str) -> Result<Vec<Recipe>> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| RecipeError::Decode(e.to_string()))?;

    let recipes = records
        .into_iter()
        .filter_map(|record| serde_json::from_value::<Recipe>(record).ok())
        .collect();

    Ok(recipes)
}
