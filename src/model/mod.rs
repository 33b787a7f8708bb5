use tracing::debug;

use crate::api::Gateway;
use crate::error::AppError;
use crate::store::BookmarkStore;

pub mod recipe;
pub mod upload;

use recipe::{Recipe, RecipePreview};
use upload::build_upload;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<RecipePreview>,
    /// 1-based. Within `[1, num_pages]` whenever `num_pages >= 1`.
    pub current_page: usize,
    pub page_size: usize,
    pub num_pages: usize,
}

impl SearchState {
    fn new(page_size: usize) -> Self {
        SearchState {
            query: String::new(),
            results: Vec::new(),
            current_page: 1,
            page_size,
            num_pages: 0,
        }
    }
}

/// The one mutable record behind every screen. Created at startup and
/// owned by the controller; mutated only through [`Model`] operations.
pub struct AppState {
    pub recipe: Option<Recipe>,
    pub search: SearchState,
    pub bookmarks: Vec<Recipe>,
}

pub struct Model {
    pub state: AppState,
    gateway: Box<dyn Gateway + Send + Sync>,
    store: BookmarkStore,
}

impl Model {
    /// Builds the model, loading bookmarks from the store up front.
    pub fn new(
        gateway: Box<dyn Gateway + Send + Sync>,
        store: BookmarkStore,
        page_size: usize,
    ) -> Result<Self, AppError> {
        let bookmarks = store.load()?;
        debug!(count = bookmarks.len(), "Loaded bookmarks");
        Ok(Model {
            state: AppState {
                recipe: None,
                search: SearchState::new(page_size),
                bookmarks,
            },
            gateway,
            store,
        })
    }

    /// Fetches a recipe and replaces the current one wholesale. The
    /// bookmarked flag comes from bookmark-list membership, never from
    /// the remote payload.
    pub async fn load_recipe(&mut self, id: &str) -> Result<(), AppError> {
        let mut recipe = self.gateway.get_recipe(id).await?;
        recipe.bookmarked = self.state.bookmarks.iter().any(|b| b.id == recipe.id);
        self.state.recipe = Some(recipe);
        Ok(())
    }

    /// Runs a search and replaces the result list wholesale, back on
    /// page 1.
    pub async fn load_search_results(&mut self, query: &str) -> Result<(), AppError> {
        self.state.search.query = query.to_string();
        self.state.search.results = self.gateway.search(query).await?;
        self.state.search.current_page = 1;
        Ok(())
    }

    /// Sets the current page, recomputes the page count and returns the
    /// slice for that page. Requests outside `[1, num_pages]` are clamped
    /// to the nearest valid page, keeping the current-page invariant.
    pub fn search_results_page(&mut self, page: usize) -> Vec<RecipePreview> {
        let search = &mut self.state.search;
        search.num_pages = search.results.len().div_ceil(search.page_size);
        let page = page.clamp(1, search.num_pages.max(1));
        search.current_page = page;

        let start = (page - 1) * search.page_size;
        let end = (page * search.page_size).min(search.results.len());
        if start >= search.results.len() {
            return Vec::new();
        }
        search.results[start..end].to_vec()
    }

    /// Rescales every non-null ingredient quantity proportionally, then
    /// records the new serving count.
    pub fn update_servings(&mut self, servings: u32) -> Result<(), AppError> {
        if servings == 0 {
            return Err(AppError::InvalidInput(
                "servings must be at least 1".to_string(),
            ));
        }
        let recipe = self.state.recipe.as_mut().ok_or(AppError::NoRecipe)?;
        for ingredient in &mut recipe.ingredients {
            if let Some(quantity) = ingredient.quantity {
                ingredient.quantity =
                    Some(quantity * f64::from(servings) / f64::from(recipe.servings));
            }
        }
        recipe.servings = servings;
        Ok(())
    }

    /// Adds or removes the current recipe from the bookmark list and
    /// persists the whole list. Bookmarking stores a copy, so later
    /// in-place edits of the current recipe leave the bookmark untouched.
    pub fn toggle_bookmark(&mut self) -> Result<(), AppError> {
        let recipe = self.state.recipe.as_mut().ok_or(AppError::NoRecipe)?;
        if !recipe.bookmarked {
            recipe.bookmarked = true;
            self.state.bookmarks.push(recipe.clone());
        } else {
            recipe.bookmarked = false;
            let id = recipe.id.clone();
            self.state.bookmarks.retain(|b| b.id != id);
        }
        self.store.save(&self.state.bookmarks)
    }

    /// Assembles the form fields into the API payload, uploads it, makes
    /// the response the current recipe and bookmarks it.
    pub async fn upload_recipe(&mut self, fields: &[(String, String)]) -> Result<(), AppError> {
        let payload = build_upload(fields)?;
        let recipe = self.gateway.upload(&payload).await?;
        self.state.recipe = Some(recipe);
        self.toggle_bookmark()
    }

    /// Deletes the current recipe remotely and reconciles it out of the
    /// local state: unbookmark first, remember where it sat in the search
    /// results, then drop that entry once the remote delete succeeded.
    pub async fn delete_recipe(&mut self) -> Result<(), AppError> {
        if self.state.recipe.as_ref().is_some_and(|r| r.bookmarked) {
            self.toggle_bookmark()?;
        }
        let recipe = self.state.recipe.as_mut().ok_or(AppError::NoRecipe)?;
        let id = recipe.id.clone();
        let index = self.state.search.results.iter().position(|r| r.id == id);
        recipe.result_index = index;

        self.gateway.delete(&id).await?;

        if let Some(index) = index {
            self.state.search.results.remove(index);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::recipe::{Ingredient, UploadRecipe};
    use async_trait::async_trait;

    struct StubGateway {
        recipe: Option<Recipe>,
        results: Vec<RecipePreview>,
        fail_delete: bool,
    }

    impl StubGateway {
        fn empty() -> Self {
            StubGateway {
                recipe: None,
                results: Vec::new(),
                fail_delete: false,
            }
        }
    }

    #[async_trait]
    impl Gateway for StubGateway {
        async fn get_recipe(&self, id: &str) -> Result<Recipe, AppError> {
            self.recipe
                .clone()
                .filter(|r| r.id == id)
                .ok_or(AppError::Gateway {
                    status: 400,
                    message: "Invalid _id".to_string(),
                })
        }

        async fn search(&self, _query: &str) -> Result<Vec<RecipePreview>, AppError> {
            Ok(self.results.clone())
        }

        async fn upload(&self, payload: &UploadRecipe) -> Result<Recipe, AppError> {
            Ok(Recipe {
                id: "uploaded-id".to_string(),
                title: payload.title.clone(),
                image: payload.image_url.clone(),
                publisher: payload.publisher.clone(),
                source_url: payload.source_url.clone(),
                cooking_time: payload.cooking_time,
                ingredients: payload.ingredients.clone(),
                servings: payload.servings,
                bookmarked: false,
                key: Some("user-key".to_string()),
                result_index: None,
            })
        }

        async fn delete(&self, _id: &str) -> Result<(), AppError> {
            if self.fail_delete {
                return Err(AppError::Gateway {
                    status: 403,
                    message: "You are not allowed to delete this recipe".to_string(),
                });
            }
            Ok(())
        }
    }

    fn preview(id: &str) -> RecipePreview {
        RecipePreview {
            id: id.to_string(),
            title: format!("Recipe {id}"),
            image: "http://img".to_string(),
            publisher: "pub".to_string(),
            key: None,
        }
    }

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: format!("Recipe {id}"),
            image: "http://img".to_string(),
            publisher: "pub".to_string(),
            source_url: "http://src".to_string(),
            cooking_time: 20,
            ingredients: vec![
                Ingredient {
                    quantity: Some(2.0),
                    unit: "cup".to_string(),
                    description: "rice".to_string(),
                },
                Ingredient {
                    quantity: None,
                    unit: String::new(),
                    description: "salt".to_string(),
                },
            ],
            servings: 4,
            bookmarked: false,
            key: None,
            result_index: None,
        }
    }

    fn model_with(gateway: StubGateway, dir: &tempfile::TempDir) -> Model {
        let store = BookmarkStore::new(dir.path().join("bookmarks.json"));
        Model::new(Box::new(gateway), store, 10).unwrap()
    }

    #[test]
    fn test_page_slice_and_page_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_with(StubGateway::empty(), &dir);
        model.state.search.results = (0..23).map(|i| preview(&i.to_string())).collect();

        let page1 = model.search_results_page(1);
        assert_eq!(page1.len(), 10);
        assert_eq!(page1[0].id, "0");
        assert_eq!(model.state.search.num_pages, 3);
        assert_eq!(model.state.search.current_page, 1);

        let page3 = model.search_results_page(3);
        assert_eq!(page3.len(), 3);
        assert_eq!(page3[0].id, "20");
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_with(StubGateway::empty(), &dir);
        model.state.search.results = (0..23).map(|i| preview(&i.to_string())).collect();

        let slice = model.search_results_page(99);

        // The request lands on the last page, not past it.
        assert_eq!(model.state.search.current_page, 3);
        assert_eq!(model.state.search.num_pages, 3);
        assert_eq!(slice.len(), 3);
        assert_eq!(slice[0].id, "20");

        model.search_results_page(0);
        assert_eq!(model.state.search.current_page, 1);
    }

    #[test]
    fn test_page_request_with_no_results_stays_on_page_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_with(StubGateway::empty(), &dir);

        assert!(model.search_results_page(7).is_empty());
        assert_eq!(model.state.search.current_page, 1);
        assert_eq!(model.state.search.num_pages, 0);
    }

    #[test]
    fn test_page_count_uses_the_configured_page_size() {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::new(dir.path().join("bookmarks.json"));
        let mut model = Model::new(Box::new(StubGateway::empty()), store, 5).unwrap();
        model.state.search.results = (0..12).map(|i| preview(&i.to_string())).collect();

        let page2 = model.search_results_page(2);
        assert_eq!(page2.len(), 5);
        assert_eq!(page2[0].id, "5");
        assert_eq!(model.state.search.num_pages, 3);
    }

    #[test]
    fn test_servings_scale_proportionally_and_nulls_stay_null() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_with(StubGateway::empty(), &dir);
        model.state.recipe = Some(recipe("r1"));

        model.update_servings(6).unwrap();

        let recipe = model.state.recipe.as_ref().unwrap();
        assert_eq!(recipe.servings, 6);
        assert_eq!(recipe.ingredients[0].quantity, Some(3.0));
        assert_eq!(recipe.ingredients[1].quantity, None);
    }

    #[test]
    fn test_servings_update_without_recipe_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_with(StubGateway::empty(), &dir);
        assert!(matches!(model.update_servings(4), Err(AppError::NoRecipe)));
    }

    #[test]
    fn test_bookmark_toggle_is_its_own_inverse() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_with(StubGateway::empty(), &dir);
        model.state.recipe = Some(recipe("r1"));

        model.toggle_bookmark().unwrap();
        assert!(model.state.recipe.as_ref().unwrap().bookmarked);
        assert_eq!(model.state.bookmarks.len(), 1);

        model.toggle_bookmark().unwrap();
        assert!(!model.state.recipe.as_ref().unwrap().bookmarked);
        assert!(model.state.bookmarks.is_empty());
    }

    #[test]
    fn test_bookmark_stores_a_copy_not_an_alias() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_with(StubGateway::empty(), &dir);
        model.state.recipe = Some(recipe("r1"));

        model.toggle_bookmark().unwrap();
        model.update_servings(8).unwrap();

        // The stored bookmark keeps the quantities it was saved with.
        assert_eq!(model.state.bookmarks[0].ingredients[0].quantity, Some(2.0));
        assert_eq!(
            model.state.recipe.as_ref().unwrap().ingredients[0].quantity,
            Some(4.0)
        );
    }

    #[test]
    fn test_bookmarks_survive_a_model_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut model = model_with(StubGateway::empty(), &dir);
            model.state.recipe = Some(recipe("r1"));
            model.toggle_bookmark().unwrap();
        }
        let model = model_with(StubGateway::empty(), &dir);
        assert_eq!(model.state.bookmarks.len(), 1);
        assert_eq!(model.state.bookmarks[0].id, "r1");
    }

    #[tokio::test]
    async fn test_load_recipe_recomputes_the_bookmarked_flag() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = StubGateway {
            recipe: Some(recipe("r1")),
            ..StubGateway::empty()
        };
        let mut model = model_with(gateway, &dir);
        model.state.bookmarks = vec![recipe("r1")];

        model.load_recipe("r1").await.unwrap();
        assert!(model.state.recipe.as_ref().unwrap().bookmarked);
    }

    #[tokio::test]
    async fn test_search_replaces_results_and_resets_the_page() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = StubGateway {
            results: vec![preview("a"), preview("b")],
            ..StubGateway::empty()
        };
        let mut model = model_with(gateway, &dir);
        model.state.search.results = vec![preview("old")];
        model.state.search.current_page = 7;

        model.load_search_results("pizza").await.unwrap();

        assert_eq!(model.state.search.query, "pizza");
        assert_eq!(model.state.search.results.len(), 2);
        assert_eq!(model.state.search.current_page, 1);
    }

    #[tokio::test]
    async fn test_upload_sets_current_recipe_and_bookmarks_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_with(StubGateway::empty(), &dir);
        let fields: Vec<(String, String)> = [
            ("title", "Bread"),
            ("sourceUrl", "http://src"),
            ("image", "http://img"),
            ("publisher", "Me"),
            ("cookingTime", "90"),
            ("servings", "6"),
            ("ingredient-1-1", "500"),
            ("ingredient-1-2", "g"),
            ("ingredient-1-3", "flour"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        model.upload_recipe(&fields).await.unwrap();

        let recipe = model.state.recipe.as_ref().unwrap();
        assert_eq!(recipe.id, "uploaded-id");
        assert!(recipe.bookmarked);
        assert_eq!(recipe.key.as_deref(), Some("user-key"));
        assert_eq!(model.state.bookmarks.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_reconciles_search_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_with(StubGateway::empty(), &dir);
        model.state.search.results = vec![preview("a"), preview("r1"), preview("b")];
        let mut current = recipe("r1");
        current.bookmarked = false;
        model.state.recipe = Some(current);

        model.delete_recipe().await.unwrap();

        let state = &model.state;
        assert_eq!(state.recipe.as_ref().unwrap().result_index, Some(1));
        assert_eq!(state.search.results.len(), 2);
        assert!(state.search.results.iter().all(|r| r.id != "r1"));
    }

    #[tokio::test]
    async fn test_delete_of_a_recipe_absent_from_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model_with(StubGateway::empty(), &dir);
        model.state.search.results = vec![preview("a")];
        model.state.recipe = Some(recipe("r1"));

        model.delete_recipe().await.unwrap();

        assert_eq!(model.state.recipe.as_ref().unwrap().result_index, None);
        assert_eq!(model.state.search.results.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_the_results_intact() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = StubGateway {
            fail_delete: true,
            ..StubGateway::empty()
        };
        let mut model = model_with(gateway, &dir);
        model.state.search.results = vec![preview("r1")];
        model.state.recipe = Some(recipe("r1"));

        assert!(model.delete_recipe().await.is_err());
        assert_eq!(model.state.search.results.len(), 1);
    }
}
