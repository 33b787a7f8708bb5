use crate::render::{Element, Node, View};
use crate::views::preview::{preview_markup, PreviewList};

pub struct ResultsView;

impl View for ResultsView {
    type Data = PreviewList;

    fn markup(&self, data: &PreviewList) -> Node {
        Element::new("results")
            .children(
                data.previews
                    .iter()
                    .map(|p| preview_markup(p, data.active_id.as_deref())),
            )
            .into()
    }

    fn error_message(&self) -> &str {
        "No recipe found for your query! please try another one."
    }
}
