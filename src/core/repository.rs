/// Recipe repository
///
/// Single source of truth for the recipe collection. Mediates between the
/// remote source and the local store, and broadcasts the full list to
/// observers on every change.

use crate::core::images::ImageStore;
use crate::core::remote::RecipeSource;
use crate::db::{Recipe, RecipeStore};
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::watch;

/// Owns the canonical in-memory recipe list
///
/// Every successful mutation reloads the list from the store and publishes it
/// exactly once; failed operations publish nothing. The full reload keeps the
/// published list in lockstep with store contents at an O(n) cost per
/// mutation, which is fine at this data size.
///
/// Concurrent mutators are not coordinated here; callers serialize calls or
/// accept last-write-wins ordering on the published snapshot.
pub struct RecipeRepository {
    source: Arc<dyn RecipeSource>,
    store: Arc<dyn RecipeStore>,
    recipes: watch::Sender<Vec<Recipe>>,
}

impl RecipeRepository {
    /// Create a repository seeded from the local store (no network call)
    pub async fn new(source: Arc<dyn RecipeSource>, store: Arc<dyn RecipeStore>) -> Self {
        let initial = store.fetch_all().await;
        let (recipes, _) = watch::channel(initial);

        Self {
            source,
            store,
            recipes,
        }
    }

    /// Current snapshot of the recipe list
    pub fn recipes(&self) -> Vec<Recipe> {
        self.recipes.borrow().clone()
    }

    /// Subscribe to list changes
    ///
    /// The receiver holds the current snapshot and is notified on every
    /// subsequent publish.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Recipe>> {
        self.recipes.subscribe()
    }

    /// Fetch the remote catalog and reconcile it into the local store
    ///
    /// Fetch and store errors propagate to the caller; on failure the
    /// in-memory snapshot is left untouched, so stale-but-available data
    /// survives a bad sync. Upserts run sequentially and the first store
    /// error surfaces without rolling back earlier rows.
    pub async fn sync(&self) -> Result<()> {
        let remote = self.source.fetch_recipes().await?;
        self.store.save_all(&remote).await?;

        self.refresh().await;
        Ok(())
    }

    /// Upsert a single recipe
    ///
    /// No validation happens here; that is the create flow's job.
    pub async fn add_recipe(&self, recipe: Recipe) -> Result<()> {
        self.store.save_all(std::slice::from_ref(&recipe)).await?;

        self.refresh().await;
        Ok(())
    }

    /// Delete a recipe by its id
    pub async fn delete_recipe(&self, recipe: &Recipe) -> Result<()> {
        self.store.delete_by_id(&recipe.id).await?;

        self.refresh().await;
        Ok(())
    }

    /// Delete a recipe and, after the delete succeeds, remove its locally
    /// stored photo if it has one
    pub async fn delete_recipe_with_image(
        &self,
        recipe: &Recipe,
        images: &ImageStore,
    ) -> Result<()> {
        self.delete_recipe(recipe).await?;

        if let Some(url) = &recipe.image_url {
            images.delete_if_local(url);
        }

        Ok(())
    }

    /// Reload the list from the store and publish it
    async fn refresh(&self) {
        let list = self.store.fetch_all().await;
        self.recipes.send_replace(list);
    }
}
