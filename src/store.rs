use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::AppError;
use crate::model::recipe::Recipe;

/// One named slot of local persistence: a JSON file holding the whole
/// bookmark list. An absent file means no bookmarks yet.
pub struct BookmarkStore {
    path: PathBuf,
}

impl BookmarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BookmarkStore { path: path.into() }
    }

    pub fn load(&self) -> Result<Vec<Recipe>, AppError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            AppError::Storage(format!("failed to read '{}': {e}", self.path.display()))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Rewrites the whole list. Called after every bookmark mutation.
    pub fn save(&self, bookmarks: &[Recipe]) -> Result<(), AppError> {
        let raw = serde_json::to_string_pretty(bookmarks)?;
        fs::write(&self.path, raw).map_err(|e| {
            AppError::Storage(format!("failed to write '{}': {e}", self.path.display()))
        })?;
        debug!(count = bookmarks.len(), "Saved bookmarks");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::recipe::Ingredient;

    fn sample_recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: "Tomato soup".to_string(),
            image: "http://img/soup.jpg".to_string(),
            publisher: "Test Kitchen".to_string(),
            source_url: "http://src/soup".to_string(),
            cooking_time: 30,
            ingredients: vec![Ingredient {
                quantity: Some(2.0),
                unit: "kg".to_string(),
                description: "tomatoes".to_string(),
            }],
            servings: 4,
            bookmarked: true,
            key: None,
            result_index: None,
        }
    }

    #[test]
    fn test_missing_file_means_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::new(dir.path().join("bookmarks.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::new(dir.path().join("bookmarks.json"));
        let bookmarks = vec![sample_recipe("a"), sample_recipe("b")];

        store.save(&bookmarks).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, bookmarks);
    }

    #[test]
    fn test_save_replaces_the_previous_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::new(dir.path().join("bookmarks.json"));

        store.save(&[sample_recipe("a"), sample_recipe("b")]).unwrap();
        store.save(&[sample_recipe("c")]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "c");
    }
}
