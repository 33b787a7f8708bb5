//! Wires user commands to model operations and view renders. Every
//! handler catches its own failures and turns them into an error block in
//! the relevant region; nothing here is fatal.

use std::time::Duration;

use tracing::warn;

use crate::model::recipe::RecipePreview;
use crate::model::Model;
use crate::render::{Region, View};
use crate::views::{
    AddRecipeView, BookmarksView, PaginationView, PreviewList, RecipeView, ResultsView,
    SearchView, UploadForm,
};

pub struct App {
    model: Model,
    pub search_region: Region,
    pub results_region: Region,
    pub pagination_region: Region,
    pub recipe_region: Region,
    pub bookmarks_region: Region,
    pub upload_region: Region,
    form: Option<UploadForm>,
    modal_close: Duration,
}

impl App {
    pub fn new(model: Model, modal_close: Duration) -> Self {
        let mut app = App {
            model,
            search_region: Region::new("search"),
            results_region: Region::new("results"),
            pagination_region: Region::new("pagination"),
            recipe_region: Region::new("recipe"),
            bookmarks_region: Region::new("bookmarks"),
            upload_region: Region::new("upload"),
            form: None,
            modal_close,
        };
        // Bookmarks come up from the store on startup.
        app.render_bookmarks();
        app
    }

    pub fn state(&self) -> &crate::model::AppState {
        &self.model.state
    }

    fn active_id(&self) -> Option<String> {
        self.model.state.recipe.as_ref().map(|r| r.id.clone())
    }

    fn bookmark_previews(&self) -> PreviewList {
        PreviewList {
            previews: self
                .model
                .state
                .bookmarks
                .iter()
                .map(RecipePreview::from)
                .collect(),
            active_id: self.active_id(),
        }
    }

    fn render_bookmarks(&mut self) {
        let previews = self.bookmark_previews();
        self.bookmarks_region.render(&BookmarksView, &previews);
    }

    fn render_results_page(&mut self, page: usize) {
        let previews = PreviewList {
            previews: self.model.search_results_page(page),
            active_id: self.active_id(),
        };
        self.results_region.render(&ResultsView, &previews);
        self.pagination_region
            .render(&PaginationView, &self.model.state.search);
    }

    /// Opens a recipe: spinner, refresh the active highlight in both
    /// preview lists (only when they have content to highlight), load,
    /// render.
    pub async fn control_recipe(&mut self, id: &str) {
        self.recipe_region.render_spinner();

        if !self.model.state.search.results.is_empty() {
            let page = self.model.state.search.current_page;
            let highlighted = PreviewList {
                previews: self.model.search_results_page(page),
                active_id: Some(id.to_string()),
            };
            self.results_region.update(&ResultsView, &highlighted);
        }
        if !self.model.state.bookmarks.is_empty() {
            let bookmarks = PreviewList {
                active_id: Some(id.to_string()),
                ..self.bookmark_previews()
            };
            self.bookmarks_region.update(&BookmarksView, &bookmarks);
        }

        match self.model.load_recipe(id).await {
            Ok(()) => {
                if let Some(recipe) = &self.model.state.recipe {
                    self.recipe_region.render(&RecipeView, recipe);
                }
            }
            Err(e) => {
                warn!(error = %e, id, "Failed to load recipe");
                self.recipe_region.render_error(&e.to_string());
            }
        }
    }

    /// Runs a search and shows page one plus the pagination controls.
    pub async fn control_search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.search_region
            .render(&SearchView, &query.to_string());
        self.results_region.render_spinner();

        match self.model.load_search_results(query).await {
            Ok(()) => self.render_results_page(1),
            Err(e) => {
                warn!(error = %e, query, "Search failed");
                self.results_region.render_error(&e.to_string());
                self.pagination_region.clear();
            }
        }
    }

    pub fn control_pagination(&mut self, page: usize) {
        self.render_results_page(page);
    }

    /// Serving-size change: the recipe region is reconciled in place
    /// rather than re-rendered.
    pub fn control_servings(&mut self, servings: u32) {
        if let Err(e) = self.model.update_servings(servings) {
            warn!(error = %e, "Failed to update servings");
            self.recipe_region.render_error(&e.to_string());
            return;
        }
        if let Some(recipe) = &self.model.state.recipe {
            self.recipe_region.update(&RecipeView, recipe);
        }
    }

    pub fn control_bookmark(&mut self) {
        if let Err(e) = self.model.toggle_bookmark() {
            warn!(error = %e, "Failed to toggle bookmark");
            self.recipe_region.render_error(&e.to_string());
            return;
        }
        if let Some(recipe) = &self.model.state.recipe {
            self.recipe_region.update(&RecipeView, recipe);
        }
        self.render_bookmarks();
    }

    /// Opens the upload form (idempotent while already open).
    pub fn control_open_form(&mut self) {
        let form = self.form.get_or_insert_with(UploadForm::new).clone();
        self.upload_region.render(&AddRecipeView, &form);
    }

    pub fn control_close_form(&mut self) {
        self.form = None;
        self.upload_region.clear();
    }

    pub fn control_set_field(&mut self, name: &str, value: &str) {
        let Some(form) = self.form.as_mut() else {
            self.upload_region
                .render_error("Open the upload form first.");
            return;
        };
        if let Err(e) = form.set(name, value) {
            let message = e.to_string();
            self.upload_region.render_error(&message);
            return;
        }
        let form = form.clone();
        self.upload_region.update(&AddRecipeView, &form);
    }

    pub fn control_add_ingredient(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.add_ingredient_row();
            let form = form.clone();
            self.upload_region.render(&AddRecipeView, &form);
        }
    }

    pub fn control_remove_ingredient(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.remove_ingredient_row();
            let form = form.clone();
            self.upload_region.render(&AddRecipeView, &form);
        }
    }

    /// Submits the form. Success and failure both leave a message block
    /// in the form region; [`Self::auto_close_form`] runs afterwards
    /// regardless of the outcome.
    pub async fn control_upload(&mut self) {
        let Some(form) = self.form.as_ref() else {
            self.upload_region
                .render_error("Open the upload form first.");
            return;
        };
        let fields: Vec<(String, String)> = form.fields().to_vec();
        self.upload_region.render_spinner();

        match self.model.upload_recipe(&fields).await {
            Ok(()) => {
                if let Some(recipe) = &self.model.state.recipe {
                    self.recipe_region.render(&RecipeView, recipe);
                }
                self.upload_region
                    .render_success(AddRecipeView.success_message());
                self.render_bookmarks();
            }
            Err(e) => {
                warn!(error = %e, "Upload failed");
                self.upload_region.render_error(&e.to_string());
            }
        }
    }

    /// Closes the upload form after the configured delay. Scheduled after
    /// every submission, successful or not.
    pub async fn auto_close_form(&mut self) {
        tokio::time::sleep(self.modal_close).await;
        self.control_close_form();
    }

    /// Deletes the current recipe and reconciles the result/bookmark
    /// lists; steps back one page when the deleted entry was the last
    /// one on the current page.
    pub async fn control_delete(&mut self) {
        match self.model.delete_recipe().await {
            Ok(()) => {
                let deleted_from_results = self
                    .model
                    .state
                    .recipe
                    .as_ref()
                    .and_then(|r| r.result_index)
                    .is_some();
                self.recipe_region
                    .render_success("Your recipe was successfully deleted.");

                if !self.model.state.search.query.is_empty() && deleted_from_results {
                    let search = &self.model.state.search;
                    let pages_left = search.results.len().div_ceil(search.page_size);
                    let page = if search.current_page > pages_left {
                        search.current_page.saturating_sub(1).max(1)
                    } else {
                        search.current_page
                    };
                    self.render_results_page(page);
                }
                self.render_bookmarks();
            }
            Err(e) => {
                warn!(error = %e, "Delete failed");
                self.recipe_region.render_error(&e.to_string());
            }
        }
    }

    /// The whole screen as text: every non-empty region in layout order.
    pub fn draw(&self) -> String {
        let mut out = String::new();
        for region in [
            &self.search_region,
            &self.results_region,
            &self.pagination_region,
            &self.recipe_region,
            &self.bookmarks_region,
            &self.upload_region,
        ] {
            let drawn = region.draw();
            if !drawn.is_empty() {
                out.push_str(&format!("== {} ==\n", region.name()));
                out.push_str(&drawn);
            }
        }
        out
    }
}
