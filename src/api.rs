use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::model::recipe::{ApiPreview, ApiRecipe, Recipe, RecipePreview, UploadRecipe};

/// The remote side of the application. Implemented by [`RecipeApi`] for the
/// real API; tests substitute their own.
#[async_trait]
pub trait Gateway {
    async fn get_recipe(&self, id: &str) -> Result<Recipe, AppError>;
    async fn search(&self, query: &str) -> Result<Vec<RecipePreview>, AppError>;
    async fn upload(&self, recipe: &UploadRecipe) -> Result<Recipe, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

pub struct RecipeApi {
    client: Client,
    base_url: String,
    key: String,
}

#[derive(Deserialize)]
struct RecipeEnvelope {
    data: RecipeData,
}

#[derive(Deserialize)]
struct RecipeData {
    recipe: ApiRecipe,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    data: SearchData,
}

#[derive(Deserialize)]
struct SearchData {
    recipes: Vec<ApiPreview>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl RecipeApi {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(RecipeApi {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            key: config.api_key.clone(),
        })
    }

    fn recipe_url(&self, id: &str) -> String {
        format!("{}/{}?key={}", self.base_url, id, self.key)
    }

    fn collection_url(&self, query: Option<&str>) -> String {
        match query {
            Some(q) => format!(
                "{}?search={}&key={}",
                self.base_url,
                urlencoding::encode(q),
                self.key
            ),
            None => format!("{}?key={}", self.base_url, self.key),
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(gateway_error(status, &body));
        }
        Ok(response.json::<T>().await?)
    }
}

/// Builds the typed failure for a non-2xx answer, preferring the server's
/// own `message` field when the body parses.
fn gateway_error(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    AppError::Gateway {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl Gateway for RecipeApi {
    async fn get_recipe(&self, id: &str) -> Result<Recipe, AppError> {
        debug!(id, "Fetching recipe");
        let response = self.client.get(self.recipe_url(id)).send().await?;
        let envelope: RecipeEnvelope = Self::read_json(response).await?;
        Ok(envelope.data.recipe.into())
    }

    async fn search(&self, query: &str) -> Result<Vec<RecipePreview>, AppError> {
        debug!(query, "Searching recipes");
        let response = self
            .client
            .get(self.collection_url(Some(query)))
            .send()
            .await?;
        let envelope: SearchEnvelope = Self::read_json(response).await?;
        Ok(envelope.data.recipes.into_iter().map(Into::into).collect())
    }

    async fn upload(&self, recipe: &UploadRecipe) -> Result<Recipe, AppError> {
        debug!(title = %recipe.title, "Uploading recipe");
        let response = self
            .client
            .post(self.collection_url(None))
            .json(recipe)
            .send()
            .await?;
        let envelope: RecipeEnvelope = Self::read_json(response).await?;
        Ok(envelope.data.recipe.into())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        debug!(id, "Deleting recipe");
        let response = self.client.delete(self.recipe_url(id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(gateway_error(status, &body));
        }
        Ok(())
    }
}
