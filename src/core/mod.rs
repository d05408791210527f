/// Core functionality modules
///
/// Contains the main business logic for syncing, searching, filtering,
/// and presenting recipes.

pub mod create;
pub mod dashboard;
pub mod images;
pub mod remote;
pub mod repository;
pub mod search;
pub mod user;

pub use create::RecipeDraft;
pub use dashboard::{DashboardSelection, DashboardSelector};
pub use images::{ImageLocation, ImageStore};
pub use remote::{BundledRecipeSource, RecipeSource};
pub use repository::RecipeRepository;
pub use search::{SearchEngine, SearchStats};
pub use user::UserContext;
