use crate::render::{Element, Node, RenderData, View};

/// The search box region: echoes the last submitted query.
pub struct SearchView;

impl RenderData for String {}

impl View for SearchView {
    type Data = String;

    fn markup(&self, query: &String) -> Node {
        let field = if query.is_empty() {
            Element::new("field").attr("placeholder", "Search over 1,000,000 recipes...")
        } else {
            Element::new("field").text(query.clone())
        };
        Element::new("search").child(field).into()
    }
}
