use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub quantity: Option<f64>,
    pub unit: String,
    pub description: String,
}

/// A full recipe as the client works with it. `bookmarked` and
/// `result_index` exist only on this side; they are never sent to the API
/// and `bookmarked` is recomputed from the bookmark list on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image: String,
    pub publisher: String,
    pub source_url: String,
    pub cooking_time: u32,
    pub ingredients: Vec<Ingredient>,
    pub servings: u32,
    #[serde(default)]
    pub bookmarked: bool,
    /// Present only on user-submitted recipes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Position in the current search results, recorded transiently while
    /// a delete is being reconciled into the results view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_index: Option<usize>,
}

/// Lightweight summary used in search results and bookmark previews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePreview {
    pub id: String,
    pub title: String,
    pub image: String,
    pub publisher: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl From<&Recipe> for RecipePreview {
    fn from(recipe: &Recipe) -> Self {
        RecipePreview {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            publisher: recipe.publisher.clone(),
            key: recipe.key.clone(),
        }
    }
}

// Wire-side shapes. The API speaks snake_case `image_url`/`source_url`/
// `cooking_time`; the structs below keep that naming at the boundary.

#[derive(Debug, Deserialize)]
pub struct ApiRecipe {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub publisher: String,
    pub source_url: String,
    pub cooking_time: u32,
    pub ingredients: Vec<Ingredient>,
    pub servings: u32,
    #[serde(default)]
    pub key: Option<String>,
}

impl From<ApiRecipe> for Recipe {
    fn from(api: ApiRecipe) -> Self {
        Recipe {
            id: api.id,
            title: api.title,
            image: api.image_url,
            publisher: api.publisher,
            source_url: api.source_url,
            cooking_time: api.cooking_time,
            ingredients: api.ingredients,
            servings: api.servings,
            bookmarked: false,
            key: api.key,
            result_index: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiPreview {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub publisher: String,
    #[serde(default)]
    pub key: Option<String>,
}

impl From<ApiPreview> for RecipePreview {
    fn from(api: ApiPreview) -> Self {
        RecipePreview {
            id: api.id,
            title: api.title,
            image: api.image_url,
            publisher: api.publisher,
            key: api.key,
        }
    }
}

/// Outbound payload for recipe uploads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadRecipe {
    pub title: String,
    pub source_url: String,
    pub image_url: String,
    pub publisher: String,
    pub cooking_time: u32,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
}
