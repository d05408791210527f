/// Data models for recipes
///
/// Recipe and friends are immutable value types; "mutation" means saving a
/// replacement record. Rows map to the sqlite table and use sqlx, with the
/// list-shaped fields stored as JSON blobs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeSet;
use uuid::Uuid;

fn generated_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_servings() -> u32 {
    1
}

/// A single cooking recipe
///
/// Decoding tolerates missing optional fields: everything except `id` and
/// `title` falls back to a sensible default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub dietary_attributes: DietaryAttributes,
    /// Absolute http(s) URL, or a bare file name resolved against the local
    /// image directory at read time (the absolute path is not stable across
    /// installs).
    #[serde(default)]
    pub image_url: Option<String>,
    /// None means seed data, not owned by any user
    #[serde(default)]
    pub creator_id: Option<String>,
}

impl Recipe {
    /// Build a recipe with a freshly generated id
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        servings: u32,
        ingredients: Vec<Ingredient>,
        instructions: Vec<String>,
        dietary_attributes: DietaryAttributes,
        image_url: Option<String>,
        creator_id: Option<String>,
    ) -> Self {
        Self {
            id: generated_id(),
            title: title.into(),
            description: description.into(),
            servings,
            ingredients,
            instructions,
            dietary_attributes,
            image_url,
            creator_id,
        }
    }

    /// Lowercased ingredient names, used by the filter predicates
    pub fn ingredient_names_lowercase(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .map(|i| i.name.to_lowercase())
            .collect()
    }
}

/// One ingredient line of a recipe
///
/// Quantity is free text ("2 cups"); nothing ever parses it numerically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default = "generated_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            id: generated_id(),
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

/// Dietary flags for a recipe
///
/// Absent flags decode as false; there is no "unset" state in practice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietaryAttributes {
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub sugar_free: bool,
}

impl DietaryAttributes {
    /// Display tags for the attributes that are set, in fixed order
    /// (vegetarian, vegan, gluten-free, sugar-free)
    pub fn active_tags(&self) -> Vec<DietTag> {
        let mut tags = Vec::new();
        if self.vegetarian {
            tags.push(DietTag::new("Vegetarian", "leaf", "green"));
        }
        if self.vegan {
            tags.push(DietTag::new("Vegan", "sprout", "teal"));
        }
        if self.gluten_free {
            tags.push(DietTag::new("Gluten Free", "wheat-off", "orange"));
        }
        if self.sugar_free {
            tags.push(DietTag::new("Sugar Free", "cube-off", "pink"));
        }
        tags
    }
}

/// A renderable dietary tag: label plus icon/color hints for the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DietTag {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl DietTag {
    fn new(label: &'static str, icon: &'static str, color: &'static str) -> Self {
        Self { label, icon, color }
    }
}

/// All possible filter states for the search screen
///
/// Ingredient terms are kept lowercase; the UI lowercases on entry and the
/// predicates assume it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub sugar_free: bool,
    pub min_servings: u32,
    pub included_ingredients: BTreeSet<String>,
    pub excluded_ingredients: BTreeSet<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            vegetarian: false,
            vegan: false,
            gluten_free: false,
            sugar_free: false,
            min_servings: 1,
            included_ingredients: BTreeSet::new(),
            excluded_ingredients: BTreeSet::new(),
        }
    }
}

impl FilterCriteria {
    /// True when any field deviates from its default (used for a filter badge)
    pub fn is_active(&self) -> bool {
        self.vegetarian
            || self.vegan
            || self.gluten_free
            || self.sugar_free
            || self.min_servings > 1
            || !self.included_ingredients.is_empty()
            || !self.excluded_ingredients.is_empty()
    }
}

/// Raw sqlite row for a recipe
///
/// List-shaped fields live in TEXT columns as JSON.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub servings: i64,
    pub ingredients: String,
    pub instructions: String,
    pub dietary_attributes: String,
    pub image_url: Option<String>,
    pub creator_id: Option<String>,
}

impl RecipeRow {
    /// Decode the JSON blob columns back into model shapes
    ///
    /// Each blob falls back to empty/default on decode failure instead of
    /// failing the whole record.
    pub fn into_recipe(self) -> Recipe {
        let ingredients = serde_json::from_str(&self.ingredients).unwrap_or_default();
        let instructions = serde_json::from_str(&self.instructions).unwrap_or_default();
        let dietary_attributes =
            serde_json::from_str(&self.dietary_attributes).unwrap_or_default();

        Recipe {
            id: self.id,
            title: self.title,
            description: self.description,
            servings: self.servings.max(1) as u32,
            ingredients,
            instructions,
            dietary_attributes,
            image_url: self.image_url,
            creator_id: self.creator_id,
        }
    }
}
