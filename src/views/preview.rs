//! Shared preview markup used by the results and bookmarks screens.

use crate::model::recipe::RecipePreview;
use crate::render::{Element, Node, RenderData};

/// Data for a preview list: the summaries plus which recipe is active,
/// so the open recipe can be highlighted in both lists.
#[derive(Debug, Clone, Default)]
pub struct PreviewList {
    pub previews: Vec<RecipePreview>,
    pub active_id: Option<String>,
}

impl RenderData for PreviewList {
    fn is_empty_data(&self) -> bool {
        self.previews.is_empty()
    }
}

pub fn preview_markup(preview: &RecipePreview, active_id: Option<&str>) -> Node {
    let mut el = Element::new("preview")
        .key(preview.id.clone())
        .attr("href", format!("#{}", preview.id));
    if active_id == Some(preview.id.as_str()) {
        el = el.attr("active", "");
    }
    if preview.key.is_some() {
        el = el.attr("user-generated", "");
    }
    el.child(Element::new("title").text(preview.title.clone()))
        .child(Element::new("publisher").text(preview.publisher.clone()))
        .into()
}
