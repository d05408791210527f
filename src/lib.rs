/// plateful library
///
/// Core functionality for the local-first recipe box.

pub mod core;
pub mod db;
pub mod error;

// Re-exports for convenience
pub use db::Database;
pub use error::{RecipeError, Result};
