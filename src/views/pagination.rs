use crate::model::SearchState;
use crate::render::{Element, Node, RenderData, View};

pub struct PaginationView;

impl RenderData for SearchState {}

impl View for PaginationView {
    type Data = SearchState;

    /// Four mutually exclusive cases: no pages or a single page gets no
    /// controls at all; the first page gets a forward control only; the
    /// last page a backward control only; anything in between gets both.
    /// Every non-empty case carries the page-count label.
    fn markup(&self, search: &SearchState) -> Node {
        let nav = Element::new("pagination");
        if search.num_pages <= 1 {
            return nav.into();
        }

        let nav = if search.current_page == 1 {
            nav.child(next_button(search))
        } else if search.current_page == search.num_pages {
            nav.child(prev_button(search))
        } else {
            nav.child(prev_button(search)).child(next_button(search))
        };
        nav.child(page_count(search)).into()
    }
}

fn prev_button(search: &SearchState) -> Node {
    let target = search.current_page - 1;
    Element::new("prev")
        .attr("goto", target.to_string())
        .child(Element::new("icon").attr("name", "arrow-left"))
        .text(format!("Page {target}"))
        .into()
}

fn next_button(search: &SearchState) -> Node {
    let target = search.current_page + 1;
    Element::new("next")
        .attr("goto", target.to_string())
        .child(Element::new("icon").attr("name", "arrow-right"))
        .text(format!("Page {target}"))
        .into()
}

fn page_count(search: &SearchState) -> Node {
    Element::new("page-count")
        .text(format!(
            "Page {} of {}",
            search.current_page, search.num_pages
        ))
        .into()
}
