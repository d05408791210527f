/// Recipe creation flow
///
/// Form-shaped draft that validates and builds a Recipe. Validation lives
/// here, before the repository ever sees the recipe; the repository itself
/// performs none.

use crate::core::user::UserContext;
use crate::db::{DietaryAttributes, Ingredient, Recipe};
use crate::error::{RecipeError, Result};

/// In-progress recipe form state
#[derive(Debug, Clone, Default)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub dietary_attributes: DietaryAttributes,
    /// Bare file name returned by `ImageStore::save`, or a remote URL
    pub image_url: Option<String>,
}

impl RecipeDraft {
    /// Validate the form and build the recipe, stamping the current user as
    /// creator and generating a fresh id
    ///
    /// Blank ingredient and instruction rows (leftover form placeholders)
    /// are dropped.
    pub fn build(self, user: &UserContext) -> Result<Recipe> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(RecipeError::Validation("title is required".to_string()));
        }
        if self.servings < 1 {
            return Err(RecipeError::Validation(
                "servings must be at least 1".to_string(),
            ));
        }

        let ingredients = self
            .ingredients
            .into_iter()
            .filter(|i| !i.name.trim().is_empty())
            .collect();
        let instructions = self
            .instructions
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();

        Ok(Recipe::new(
            title,
            self.description,
            self.servings,
            ingredients,
            instructions,
            self.dietary_attributes,
            self.image_url,
            Some(user.user_id.clone()),
        ))
    }
}
