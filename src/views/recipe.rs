use crate::model::recipe::{Ingredient, Recipe};
use crate::render::{Element, Node, RenderData, View};

pub struct RecipeView;

impl RenderData for Recipe {}

impl View for RecipeView {
    type Data = Recipe;

    fn markup(&self, recipe: &Recipe) -> Node {
        let mut el = Element::new("recipe").key(recipe.id.clone());
        if recipe.key.is_some() {
            el = el.attr("user-generated", "");
        }
        el = el
            .child(Element::new("title").text(recipe.title.clone()))
            .child(Element::new("publisher").text(recipe.publisher.clone()))
            .child(
                Element::new("cooking-time").text(format!("{} minutes", recipe.cooking_time)),
            )
            .child(
                Element::new("servings")
                    .attr("count", recipe.servings.to_string())
                    .text(format!("{} servings", recipe.servings)),
            )
            .child(
                Element::new("bookmark")
                    .attr("state", if recipe.bookmarked { "filled" } else { "empty" }),
            )
            .child(
                Element::new("ingredients").children(
                    recipe
                        .ingredients
                        .iter()
                        .map(|ing| Element::new("ingredient").text(format_ingredient(ing)).into()),
                ),
            )
            .child(
                Element::new("source")
                    .attr("href", recipe.source_url.clone())
                    .text("Directions"),
            );
        el.into()
    }

    fn error_message(&self) -> &str {
        "We could not find that recipe. Please try another one!"
    }
}

fn format_ingredient(ingredient: &Ingredient) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(quantity) = ingredient.quantity {
        parts.push(format_quantity(quantity));
    }
    if !ingredient.unit.is_empty() {
        parts.push(ingredient.unit.clone());
    }
    parts.push(ingredient.description.clone());
    parts.join(" ")
}

/// Whole quantities print without a decimal point; everything else is
/// rounded to two places with trailing zeros dropped.
pub fn format_quantity(quantity: f64) -> String {
    if (quantity - quantity.round()).abs() < 1e-9 {
        format!("{}", quantity.round() as i64)
    } else {
        let formatted = format!("{quantity:.2}");
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
