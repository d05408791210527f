/// SQL query functions for the recipe store
///
/// Defines the narrow save/fetch/delete contract the repository depends on,
/// and implements it for the pooled SQLite database.

use crate::db::models::{Recipe, RecipeRow};
use crate::db::Database;
use crate::error::Result;
use async_trait::async_trait;

/// Local storage contract for recipes
///
/// `fetch_all` never fails outward: "no local data yet" is a normal state, so
/// internal read problems degrade to an empty list instead of erroring.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Upsert recipes by id; never creates duplicate ids
    async fn save_all(&self, recipes: &[Recipe]) -> Result<()>;

    /// All stored recipes, sorted by title ascending
    async fn fetch_all(&self) -> Vec<Recipe>;

    /// Delete by id; no-op when the id is absent
    async fn delete_by_id(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl RecipeStore for Database {
    async fn save_all(&self, recipes: &[Recipe]) -> Result<()> {
        self.save_recipes(recipes).await
    }

    async fn fetch_all(&self) -> Vec<Recipe> {
        self.fetch_recipes().await
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.delete_recipe(id).await
    }
}

impl Database {
    /// Upsert a batch of recipes
    ///
    /// Rows are written sequentially; the first storage error surfaces and
    /// earlier rows in the batch are not rolled back.
    pub async fn save_recipes(&self, recipes: &[Recipe]) -> Result<()> {
        for recipe in recipes {
            let ingredients = serde_json::to_string(&recipe.ingredients)?;
            let instructions = serde_json::to_string(&recipe.instructions)?;
            let dietary = serde_json::to_string(&recipe.dietary_attributes)?;

            sqlx::query(
                r#"
                INSERT INTO recipes
                    (id, title, description, servings, ingredients, instructions,
                     dietary_attributes, image_url, creator_id)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    description = excluded.description,
                    servings = excluded.servings,
                    ingredients = excluded.ingredients,
                    instructions = excluded.instructions,
                    dietary_attributes = excluded.dietary_attributes,
                    image_url = excluded.image_url,
                    creator_id = excluded.creator_id
                "#,
            )
            .bind(&recipe.id)
            .bind(&recipe.title)
            .bind(&recipe.description)
            .bind(recipe.servings as i64)
            .bind(ingredients)
            .bind(instructions)
            .bind(dietary)
            .bind(&recipe.image_url)
            .bind(&recipe.creator_id)
            .execute(self.pool())
            .await?;
        }

        Ok(())
    }

    /// Get all stored recipes, sorted by title ascending
    ///
    /// Never fails: read errors degrade to an empty list and blob decode
    /// problems degrade per field (see `RecipeRow::into_recipe`).
    pub async fn fetch_recipes(&self) -> Vec<Recipe> {
        let rows = sqlx::query_as::<_, RecipeRow>("SELECT * FROM recipes ORDER BY title ASC")
            .fetch_all(self.pool())
            .await
            .unwrap_or_default();

        rows.into_iter().map(RecipeRow::into_recipe).collect()
    }

    /// Delete a recipe by id
    ///
    /// Deleting an id that does not exist is a no-op, not an error.
    pub async fn delete_recipe(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Get a preference value
    pub async fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM preferences WHERE key = ?")
                .bind(key)
                .fetch_optional(self.pool())
                .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Set a preference
    pub async fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO preferences (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(self.pool())
            .await?;

        Ok(())
    }
}
