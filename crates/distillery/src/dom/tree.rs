// ABOUTME: DomTree adapter over scraper's html5ever-backed document and its ego_tree arena.
// ABOUTME: Node handles are arena NodeIds, which stay stable when other nodes are detached.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use super::DomTree;

/// A parsed HTML document that the pipeline can inspect and prune.
#[derive(Debug, Clone)]
pub struct ScraperTree {
    html: Html,
}

impl ScraperTree {
    /// Parse a full document. Malformed markup is repaired the way browsers do.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(node).and_then(ElementRef::wrap)
    }

    /// Attached elements below the document element matching a CSS selector,
    /// in document order. An invalid selector matches nothing.
    pub fn select(&self, css: &str) -> Vec<NodeId> {
        // Html::select walks the whole arena, detached nodes included.
        match Selector::parse(css) {
            Ok(selector) => self
                .html
                .root_element()
                .select(&selector)
                .map(|el| el.id())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn select_first(&self, css: &str) -> Option<NodeId> {
        self.select(css).into_iter().next()
    }

    /// Serialize the whole document.
    pub fn html(&self) -> String {
        self.html.html()
    }
}

impl DomTree for ScraperTree {
    type Handle = NodeId;

    fn root(&self) -> NodeId {
        self.html.root_element().id()
    }

    fn body(&self) -> Option<NodeId> {
        self.html
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "body")
            .map(|el| el.id())
    }

    fn tag_name(&self, node: NodeId) -> &str {
        self.element(node).map(|el| el.value().name()).unwrap_or("")
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|el| el.value().attr(name))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.html
            .tree
            .get(node)?
            .parent()
            .and_then(ElementRef::wrap)
            .map(|el| el.id())
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        match self.html.tree.get(node) {
            Some(n) => n
                .children()
                .filter_map(ElementRef::wrap)
                .map(|el| el.id())
                .collect(),
            None => Vec::new(),
        }
    }

    fn has_child_nodes(&self, node: NodeId) -> bool {
        self.html
            .tree
            .get(node)
            .map_or(false, |n| n.has_children())
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        match self.html.tree.get(node) {
            Some(n) => n
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .map(|el| el.id())
                .collect(),
            None => Vec::new(),
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node)
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default()
    }

    fn path(&self, node: NodeId) -> String {
        let mut segments: Vec<String> = Vec::new();
        let mut current = self.element(node);

        while let Some(el) = current {
            let name = el.value().name();
            let parent = el.parent();

            // Index only when the parent has several children with this tag.
            let segment = match parent {
                Some(p) => {
                    let same_tag: Vec<NodeId> = p
                        .children()
                        .filter_map(ElementRef::wrap)
                        .filter(|s| s.value().name() == name)
                        .map(|s| s.id())
                        .collect();
                    if same_tag.len() > 1 {
                        let index = same_tag
                            .iter()
                            .position(|&id| id == el.id())
                            .unwrap_or(0);
                        format!("{}[{}]", name, index + 1)
                    } else {
                        name.to_string()
                    }
                }
                None => name.to_string(),
            };
            segments.push(segment);
            current = parent.and_then(ElementRef::wrap);
        }

        segments.reverse();
        format!("/{}", segments.join("/"))
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let document = self.html.tree.root().id();
        let mut current = self.html.tree.get(node);
        while let Some(n) = current {
            if n.id() == document {
                return true;
            }
            current = n.parent();
        }
        false
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(mut n) = self.html.tree.get_mut(node) {
            n.detach();
        }
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.element(node)
            .map(|el| el.inner_html())
            .unwrap_or_default()
    }

    fn outer_html(&self, node: NodeId) -> String {
        self.element(node).map(|el| el.html()).unwrap_or_default()
    }
}
