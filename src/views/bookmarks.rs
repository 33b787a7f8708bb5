use crate::render::{Element, Node, View};
use crate::views::preview::{preview_markup, PreviewList};

pub struct BookmarksView;

impl View for BookmarksView {
    type Data = PreviewList;

    fn markup(&self, data: &PreviewList) -> Node {
        Element::new("bookmarks")
            .children(
                data.previews
                    .iter()
                    .map(|p| preview_markup(p, data.active_id.as_deref())),
            )
            .into()
    }

    fn error_message(&self) -> &str {
        "No bookmarks yet! Find a nice recipe and bookmark it :)"
    }
}
