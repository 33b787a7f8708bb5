//! Assembly of the outbound upload payload from raw form fields.
//!
//! The form delivers a flat, ordered list of (name, value) entries. Every
//! field named `ingredient-N-1/2/3` contributes to one ingredient, in runs
//! of three (quantity, unit, description) in declaration order.

use crate::error::AppError;
use crate::model::recipe::{Ingredient, UploadRecipe};

pub fn collect_ingredients(fields: &[(String, String)]) -> Result<Vec<Ingredient>, AppError> {
    let raw: Vec<&str> = fields
        .iter()
        .filter(|(name, _)| name.starts_with("ingredient"))
        .map(|(_, value)| value.as_str())
        .collect();

    raw.chunks(3)
        .map(|run| {
            let quantity = run.first().copied().unwrap_or("").trim();
            let unit = run.get(1).copied().unwrap_or("").trim();
            let description = run.get(2).copied().unwrap_or("").trim();

            if description.is_empty() {
                return Err(AppError::InvalidInput(
                    "every ingredient needs a description".to_string(),
                ));
            }
            let quantity = if quantity.is_empty() {
                None
            } else {
                Some(quantity.parse::<f64>().map_err(|_| {
                    AppError::InvalidInput(format!(
                        "ingredient quantity '{quantity}' is not a number"
                    ))
                })?)
            };
            Ok(Ingredient {
                quantity,
                unit: unit.to_string(),
                description: description.to_string(),
            })
        })
        .collect()
}

/// Maps the camelCase form field names onto the API's snake_case payload,
/// coercing cooking time and servings to numbers.
pub fn build_upload(fields: &[(String, String)]) -> Result<UploadRecipe, AppError> {
    let text = |name: &str| -> Result<String, AppError> {
        fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::InvalidInput(format!("missing field '{name}'")))
    };
    let number = |name: &str| -> Result<u32, AppError> {
        text(name)?
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("field '{name}' must be a number")))
    };

    Ok(UploadRecipe {
        title: text("title")?,
        source_url: text("sourceUrl")?,
        image_url: text("image")?,
        publisher: text("publisher")?,
        cooking_time: number("cookingTime")?,
        servings: number("servings")?,
        ingredients: collect_ingredients(fields)?,
    })
}
