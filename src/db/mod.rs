/// Database module for plateful
///
/// Handles all local persistence using SQLite and sqlx.
/// Implements connection pooling for performance.

pub mod connection;
pub mod models;
pub mod queries;

pub use connection::Database;
pub use models::*;
pub use queries::RecipeStore;
