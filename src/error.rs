/// Error types for plateful
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for plateful operations
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote catalog could not be reached
    #[error("Could not fetch the recipe catalog: {0}")]
    Fetch(String),

    /// Remote catalog was reachable but unreadable
    #[error("Recipe catalog format error: {0}")]
    Decode(String),

    /// Recipe photo could not be written to disk
    #[error("Could not save recipe photo: {0}")]
    ImageSave(String),

    /// Create-flow form checks failed
    #[error("Invalid recipe: {0}")]
    Validation(String),
}

/// Result type alias for plateful operations
pub type Result<T> = std::result::Result<T, RecipeError>;

/// Convert RecipeError to a user-friendly error message
impl RecipeError {
    pub fn user_message(&self) -> String {
        match self {
            RecipeError::Database(e) => {
                format!("Database error occurred. Please try again. Details: {}", e)
            }
            RecipeError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            RecipeError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            RecipeError::Fetch(msg) => {
                format!("Could not reach the recipe catalog. Details: {}", msg)
            }
            RecipeError::Decode(msg) => {
                format!("The recipe catalog looks corrupted: {}", msg)
            }
            RecipeError::ImageSave(msg) => {
                format!("We couldn't save your recipe photo: {}", msg)
            }
            RecipeError::Validation(msg) => {
                format!("Please check your recipe: {}", msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = RecipeError::Validation("title is required".to_string());
        assert!(err.user_message().contains("title is required"));

        let err = RecipeError::Fetch("connection refused".to_string());
        assert!(err.user_message().contains("catalog"));
    }

    #[test]
    fn test_error_display() {
        let err = RecipeError::Decode("unexpected end of input".to_string());
        let display = format!("{}", err);
        assert!(display.contains("format error"));
    }
}
