//! Render tree and in-place reconciliation.
//!
//! A screen area is a [`Region`] owning a live [`Node`] tree. Views are
//! pure: they map their data to a fresh tree, and the region either
//! replaces its content wholesale (`render`) or reconciles the fresh tree
//! into the live one (`update`). Reconciliation pairs elements by stable
//! key (tag + sibling occurrence for unkeyed nodes) and only mutates text
//! and attributes of paired nodes; it never inserts or removes nodes, so
//! structural changes have to go through `render`.

use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub key: Option<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            key: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of all descendant text leaves.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }

}

/// What a screen contributes: pure markup plus its default messages.
pub trait View {
    type Data;

    fn markup(&self, data: &Self::Data) -> Node;

    fn error_message(&self) -> &str {
        "Something went wrong! Please try again."
    }

    fn success_message(&self) -> &str {
        ""
    }
}

/// Lets `Region::render` spot empty payloads without each view caring.
pub trait RenderData {
    fn is_empty_data(&self) -> bool {
        false
    }
}

impl<T> RenderData for Vec<T> {
    fn is_empty_data(&self) -> bool {
        self.is_empty()
    }
}

impl<T> RenderData for Option<T> {
    fn is_empty_data(&self) -> bool {
        self.is_none()
    }
}

/// One screen area: owns the live tree between calls. Nothing else is
/// retained; views are re-run on every render/update.
pub struct Region {
    name: String,
    live: Option<Node>,
}

impl Region {
    pub fn new(name: &str) -> Self {
        Region {
            name: name.to_string(),
            live: None,
        }
    }

    /// Wholesale replacement. Empty data renders the view's error block
    /// instead of the data markup.
    pub fn render<V>(&mut self, view: &V, data: &V::Data)
    where
        V: View,
        V::Data: RenderData,
    {
        if data.is_empty_data() {
            let message = view.error_message().to_string();
            self.render_error(&message);
            return;
        }
        trace!(region = %self.name, "render");
        self.live = Some(view.markup(data));
    }

    /// Reconciles freshly generated markup into the live tree. With no
    /// live tree yet, or when the live root is a different kind of tree
    /// (such as a status block), this degenerates to a plain render.
    pub fn update<V>(&mut self, view: &V, data: &V::Data)
    where
        V: View,
    {
        let fresh = view.markup(data);
        match (&mut self.live, fresh) {
            (Some(Node::Element(live)), Node::Element(fresh)) if live.tag == fresh.tag => {
                trace!(region = %self.name, "update");
                reconcile(live, &fresh);
            }
            (live, fresh) => *live = Some(fresh),
        }
    }

    pub fn render_spinner(&mut self) {
        self.live = Some(status_block("loader", "Loading..."));
    }

    pub fn render_error(&mut self, message: &str) {
        self.live = Some(status_block("alert-triangle", message));
    }

    pub fn render_success(&mut self, message: &str) {
        self.live = Some(status_block("smile", message));
    }

    pub fn clear(&mut self) {
        self.live = None;
    }

    pub fn live(&self) -> Option<&Node> {
        self.live.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prints the live tree as indented text for the terminal.
    pub fn draw(&self) -> String {
        let mut out = String::new();
        if let Some(node) = &self.live {
            draw_into(node, 0, &mut out);
        }
        out
    }
}

/// Fixed-shape status block shared by spinner/error/success renders.
fn status_block(icon: &str, message: &str) -> Node {
    Element::new("status")
        .child(Element::new("icon").attr("name", icon))
        .child(Element::new("message").text(message))
        .into()
}

fn draw_into(node: &Node, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Text(text) => {
            out.push_str(&indent);
            out.push_str(text);
            out.push('\n');
        }
        Node::Element(el) => {
            out.push_str(&indent);
            out.push_str(&el.tag);
            let mut extras: Vec<String> = Vec::new();
            if let Some(key) = &el.key {
                extras.push(format!("#{key}"));
            }
            for (name, value) in &el.attrs {
                if value.is_empty() {
                    extras.push(name.clone());
                } else {
                    extras.push(format!("{name}={value}"));
                }
            }
            if !extras.is_empty() {
                out.push_str(&format!(" [{}]", extras.join(" ")));
            }
            out.push('\n');
            for child in &el.children {
                draw_into(child, depth + 1, out);
            }
        }
    }
}

/// Key-based reconciliation of one element pair. Attributes of the fresh
/// node win; the leading text leaf is copied over when the fresh side has
/// a non-blank one; children pair by key, with tag + occurrence order as
/// the fallback for unkeyed nodes. Unpaired nodes stay untouched.
fn reconcile(live: &mut Element, fresh: &Element) {
    if *live == *fresh {
        return;
    }

    for (name, value) in &fresh.attrs {
        live.set_attr(name, value);
    }

    if let Some(Node::Text(fresh_text)) = fresh.children.first() {
        if !fresh_text.trim().is_empty() {
            if let Some(Node::Text(live_text)) = live.children.first_mut() {
                *live_text = fresh_text.clone();
            }
        }
    }

    // Occurrence counters for the unkeyed fallback, per tag.
    let mut live_seen: Vec<(String, usize)> = Vec::new();
    for live_child in &mut live.children {
        let Node::Element(live_el) = live_child else {
            continue;
        };
        let matched = match &live_el.key {
            Some(key) => fresh.children.iter().find_map(|n| {
                n.as_element()
                    .filter(|el| el.key.as_ref() == Some(key))
            }),
            None => {
                let occurrence = bump(&mut live_seen, &live_el.tag);
                nth_unkeyed(fresh, &live_el.tag, occurrence)
            }
        };
        if let Some(fresh_el) = matched {
            reconcile(live_el, fresh_el);
        }
    }
}

fn bump(seen: &mut Vec<(String, usize)>, tag: &str) -> usize {
    match seen.iter_mut().find(|(t, _)| t == tag) {
        Some((_, count)) => {
            *count += 1;
            *count - 1
        }
        None => {
            seen.push((tag.to_string(), 1));
            0
        }
    }
}

/// The n-th unkeyed child element of `parent` with the given tag.
fn nth_unkeyed<'a>(parent: &'a Element, tag: &str, n: usize) -> Option<&'a Element> {
    parent
        .children
        .iter()
        .filter_map(Node::as_element)
        .filter(|el| el.key.is_none() && el.tag == tag)
        .nth(n)
}
