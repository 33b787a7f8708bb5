use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The API answered with a non-2xx status. The message is the
    /// server-provided one when the error body carried it.
    #[error("{message} ({status})")]
    Gateway { status: u16, message: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No recipe is currently loaded")]
    NoRecipe,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}
