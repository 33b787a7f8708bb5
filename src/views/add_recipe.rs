use crate::error::AppError;
use crate::render::{Element, Node, RenderData, View};

pub const MAX_INGREDIENT_ROWS: usize = 10;

const RECIPE_FIELDS: [&str; 6] = [
    "title",
    "sourceUrl",
    "image",
    "publisher",
    "cookingTime",
    "servings",
];

/// The upload form as a flat, ordered field list, the shape submission
/// hands to the model. Ingredient rows can be added and removed between
/// one and ten.
#[derive(Debug, Clone)]
pub struct UploadForm {
    fields: Vec<(String, String)>,
    rows: usize,
}

impl UploadForm {
    pub fn new() -> Self {
        let mut fields: Vec<(String, String)> = RECIPE_FIELDS
            .iter()
            .map(|name| (name.to_string(), String::new()))
            .collect();
        fields.extend(ingredient_row(1));
        UploadForm { fields, rows: 1 }
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), AppError> {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => {
                *v = value.to_string();
                Ok(())
            }
            None => Err(AppError::InvalidInput(format!("unknown field '{name}'"))),
        }
    }

    /// Appends one ingredient row; refused at the cap of ten.
    pub fn add_ingredient_row(&mut self) -> bool {
        if self.rows == MAX_INGREDIENT_ROWS {
            return false;
        }
        self.rows += 1;
        self.fields.extend(ingredient_row(self.rows));
        true
    }

    /// Drops the last ingredient row; at least one always remains.
    pub fn remove_ingredient_row(&mut self) -> bool {
        if self.rows == 1 {
            return false;
        }
        self.fields.truncate(self.fields.len() - 3);
        self.rows -= 1;
        true
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::new()
    }
}

fn ingredient_row(row: usize) -> Vec<(String, String)> {
    (1..=3)
        .map(|part| (format!("ingredient-{row}-{part}"), String::new()))
        .collect()
}

pub struct AddRecipeView;

impl RenderData for UploadForm {}

impl View for AddRecipeView {
    type Data = UploadForm;

    fn markup(&self, form: &UploadForm) -> Node {
        Element::new("upload")
            .children(form.fields().iter().map(|(name, value)| {
                Element::new("field")
                    .key(name.clone())
                    .attr("value", value.clone())
                    .into()
            }))
            .into()
    }

    fn success_message(&self) -> &str {
        "Congratulations! Your recipe was successfully uploaded."
    }
}
