pub mod add_recipe;
pub mod bookmarks;
pub mod pagination;
pub mod preview;
pub mod recipe;
pub mod results;
pub mod search;

pub use add_recipe::{AddRecipeView, UploadForm};
pub use bookmarks::BookmarksView;
pub use pagination::PaginationView;
pub use preview::PreviewList;
pub use recipe::RecipeView;
pub use results::ResultsView;
pub use search::SearchView;
