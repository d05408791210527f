/// Recipe photo storage
///
/// Saves photos into a local images directory and resolves stored references
/// back into usable locations. Only the bare file name is persisted, because
/// the directory's absolute path is not stable across installs.

use crate::error::{RecipeError, Result};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Where a recipe image reference points after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocation {
    /// Absolute http(s) URL, used as-is
    Remote(String),
    /// File under the current install's image directory
    Local(PathBuf),
}

/// Local photo storage rooted at one directory
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Write image bytes to a new file and return its bare file name
    ///
    /// The returned name is what gets stored on the recipe.
    pub fn save(&self, bytes: &[u8]) -> Result<String> {
        fs::create_dir_all(&self.root)?;

        let file_name = format!("{}.jpg", Uuid::new_v4());
        fs::write(self.root.join(&file_name), bytes)
            .map_err(|e| RecipeError::ImageSave(e.to_string()))?;

        Ok(file_name)
    }

    /// Resolve a stored reference into a usable location
    pub fn resolve(&self, url: &str) -> ImageLocation {
        if is_remote(url) {
            ImageLocation::Remote(url.to_string())
        } else {
            ImageLocation::Local(self.root.join(file_name_of(url)))
        }
    }

    /// Remove the backing file for a local reference
    ///
    /// Remote URLs and already-missing files are quietly ignored.
    pub fn delete_if_local(&self, url: &str) {
        if is_remote(url) {
            return;
        }
        let _ = fs::remove_file(self.root.join(file_name_of(url)));
    }
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Last path component; stored references may be bare names already
fn file_name_of(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
