// ABOUTME: DOM access layer for the distillation pipeline.
// ABOUTME: Defines the DomTree trait the stages work against and re-exports the scraper adapter.

//! DOM utilities for HTML document manipulation.
//!
//! The pipeline stages never touch parser types directly. They work through
//! [`DomTree`], which exposes the handful of tree operations content
//! distillation needs: navigation, attribute access, aggregated text, a
//! structural path, removal and serialization. [`ScraperTree`] implements it
//! over `scraper`/`ego_tree`.

use std::fmt::Debug;
use std::hash::Hash;

pub mod cleaners;
pub mod preprocess;
pub mod scoring;
pub mod select;
pub mod tree;

pub use tree::ScraperTree;

/// Tree operations required by the distillation stages.
///
/// Handles refer to element nodes only. A handle stays valid after its node
/// is removed; [`DomTree::is_attached`] tells whether it is still reachable
/// from the document.
pub trait DomTree {
    type Handle: Copy + Eq + Hash + Debug;

    /// The document element (`html`).
    fn root(&self) -> Self::Handle;

    /// The `body` element, if the document has one.
    fn body(&self) -> Option<Self::Handle>;

    /// Lowercase local tag name, or `""` for a stale handle.
    fn tag_name(&self, node: Self::Handle) -> &str;

    fn attr(&self, node: Self::Handle, name: &str) -> Option<&str>;

    /// Parent element. `None` for the document element and for detached nodes.
    fn parent(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// Element children in document order.
    fn children(&self, node: Self::Handle) -> Vec<Self::Handle>;

    /// True if the node has any child node, text included.
    fn has_child_nodes(&self, node: Self::Handle) -> bool;

    /// Element descendants in document order, excluding `node` itself.
    fn descendants(&self, node: Self::Handle) -> Vec<Self::Handle>;

    /// Concatenated text of every descendant text node.
    fn text(&self, node: Self::Handle) -> String;

    /// Canonical ancestor-chain identifier such as `/html/body/div[2]/p`.
    fn path(&self, node: Self::Handle) -> String;

    fn is_attached(&self, node: Self::Handle) -> bool;

    /// Detach the node and its subtree from the document.
    fn remove(&mut self, node: Self::Handle);

    fn inner_html(&self, node: Self::Handle) -> String;

    fn outer_html(&self, node: Self::Handle) -> String;

    fn find_by_tag(&self, node: Self::Handle, tag: &str) -> Vec<Self::Handle> {
        self.descendants(node)
            .into_iter()
            .filter(|&d| self.tag_name(d) == tag)
            .collect()
    }

    fn count_by_tag(&self, node: Self::Handle, tags: &[&str]) -> usize {
        self.descendants(node)
            .into_iter()
            .filter(|&d| tags.contains(&self.tag_name(d)))
            .count()
    }

    fn contains_tag(&self, node: Self::Handle, tag: &str) -> bool {
        self.descendants(node)
            .into_iter()
            .any(|d| self.tag_name(d) == tag)
    }

    /// The `class` value immediately followed by the `id` value, with no
    /// separator, so a pattern may match across the boundary.
    fn identifiers(&self, node: Self::Handle) -> String {
        let class = self.attr(node, "class").unwrap_or("");
        let id = self.attr(node, "id").unwrap_or("");
        format!("{}{}", class, id)
    }

    /// Ratio of anchor text to total text within the subtree, in `[0, 1]`.
    fn link_density(&self, node: Self::Handle) -> f64 {
        let total = self.text(node).chars().count();
        if total == 0 {
            return 0.0;
        }
        let linked: usize = self
            .find_by_tag(node, "a")
            .into_iter()
            .map(|a| self.text(a).chars().count())
            .sum();
        (linked as f64 / total as f64).min(1.0)
    }
}

/// Returns true if the text has no non-whitespace characters.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}
