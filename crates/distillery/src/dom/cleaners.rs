// ABOUTME: Post-selection cleaner that prunes residual noise inside the chosen content.
// ABOUTME: Removes empty nodes, forms/iframes/objects and blocks that look like widgets, lists or link farms.

use std::fmt;

use tracing::{debug, trace};

use super::scoring::identifier_weight;
use super::{is_blank, DomTree};
use crate::constants::{
    CONDITIONAL_TAGS, IDENTIFIER_WEIGHT, LINK_DENSITY_LIMIT, MIN_CONTENT_CHARS,
    MIN_CONTENT_COMMAS, UNRELATED_TAGS, WEIGHTED_LINK_DENSITY_LIMIT,
};

/// Why the cleaner dropped a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Empty,
    Unrelated,
    UnlikelyContent,
}

impl fmt::Display for Removal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Removal::Empty => "empty",
            Removal::Unrelated => "unrelated tag",
            Removal::UnlikelyContent => "unlikely content",
        };
        write!(f, "{}", s)
    }
}

/// Clean every node strictly inside the selection roots.
///
/// Nodes are visited in document order; once a node is removed its subtree
/// is skipped. Returns the number of removed nodes.
pub fn clean<T: DomTree>(tree: &mut T, roots: &[T::Handle], images: bool) -> usize {
    let mut removed = 0;
    for &root in roots {
        for node in tree.descendants(root) {
            if !tree.is_attached(node) {
                continue;
            }
            if let Some(reason) = removal_reason(&*tree, node, images) {
                trace!(path = %tree.path(node), %reason, "cleaned node");
                tree.remove(node);
                removed += 1;
            }
        }
    }
    debug!(removed, "cleaned selection");
    removed
}

/// Decide whether a node inside the selection should go, and why.
pub fn removal_reason<T: DomTree>(tree: &T, node: T::Handle, images: bool) -> Option<Removal> {
    let tag = tree.tag_name(node);
    let text = tree.text(node);
    let keeps_image = images && is_image_bearing(tree, node);

    if is_blank(&text) && tag != "br" && !keeps_image {
        return Some(Removal::Empty);
    }

    if UNRELATED_TAGS.contains(&tag) && !keeps_image {
        return Some(Removal::Unrelated);
    }

    if count_commas(&text) < MIN_CONTENT_COMMAS && is_unlikely_content(tree, node) {
        return Some(Removal::UnlikelyContent);
    }

    None
}

/// True for an `img` or anything containing one.
pub fn is_image_bearing<T: DomTree>(tree: &T, node: T::Handle) -> bool {
    tree.tag_name(node) == "img" || tree.contains_tag(node, "img")
}

fn count_commas(text: &str) -> usize {
    text.matches(',').count()
}

/// Composite check for tables, lists and divs that read like a widget, a
/// link list or a form rather than prose. Other tags are never flagged.
pub fn is_unlikely_content<T: DomTree>(tree: &T, node: T::Handle) -> bool {
    let tag = tree.tag_name(node);
    if !CONDITIONAL_TAGS.contains(&tag) {
        return false;
    }

    let weight = identifier_weight(tree, node);
    if weight < 0 {
        return true;
    }

    let text = tree.text(node);
    if text.is_empty() {
        return true;
    }
    if tag != "a" && text.chars().count() < MIN_CONTENT_CHARS {
        return true;
    }

    let paragraphs = tree.count_by_tag(node, &["p"]);
    let images = tree.count_by_tag(node, &["img"]);
    let items = tree.count_by_tag(node, &["li"]);
    let inputs = tree.count_by_tag(node, &["input"]);
    let density = tree.link_density(node);
    let is_list = tag == "ul" || tag == "ol";

    images > paragraphs
        || (items > paragraphs && density > LINK_DENSITY_LIMIT && !is_list)
        || inputs as f64 > paragraphs as f64 / 3.0
        || (weight < IDENTIFIER_WEIGHT && density > LINK_DENSITY_LIMIT)
        || (weight >= IDENTIFIER_WEIGHT && density > WEIGHTED_LINK_DENSITY_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ScraperTree;
    use pretty_assertions::assert_eq;

    fn unlikely(html: &str) -> bool {
        let tree = ScraperTree::parse(html);
        let node = tree.select_first("#t").unwrap();
        is_unlikely_content(&tree, node)
    }

    #[test]
    fn only_conditional_tags_are_judged() {
        assert!(!unlikely("<p id='t'>x</p>"));
        assert!(!unlikely("<section id='t'></section>"));
        assert!(unlikely("<div id='t'></div>"));
    }

    #[test]
    fn negative_identifier_is_unlikely() {
        assert!(unlikely(
            "<div id='t' class='related'>A perfectly normal sentence of prose right here.</div>"
        ));
    }

    #[test]
    fn short_text_is_unlikely() {
        assert!(unlikely("<div id='t'>Share this</div>"));
        assert!(!unlikely("<div id='t'>A perfectly normal sentence of prose.</div>"));
    }

    #[test]
    fn length_check_counts_untrimmed_text() {
        // surrounding whitespace counts toward the length
        assert!(!unlikely("<div id='t'>\n        Share this\n    </div>"));
        assert!(unlikely("<div id='t'> Share this </div>"));
    }

    #[test]
    fn more_images_than_paragraphs_is_unlikely() {
        assert!(unlikely(
            "<div id='t'><img src='a.png'><img src='b.png'><p>One caption for the whole gallery.</p></div>"
        ));
    }

    #[test]
    fn link_heavy_item_lists_inside_divs_are_unlikely() {
        assert!(unlikely(
            r#"<div id="t"><ul><li><a href="/1">First related story</a></li><li><a href="/2">Second related story</a></li></ul></div>"#
        ));
    }

    #[test]
    fn forms_with_inputs_are_unlikely() {
        assert!(unlikely(
            "<div id='t'>Subscribe to our newsletter today <input type='text'><input type='submit'></div>"
        ));
    }

    #[test]
    fn positive_weight_tolerates_moderate_link_density() {
        // about 30% of the text is linked
        let html = r#"<div id="t" class="entry">Read the full write-up over <a href="/x">on this page</a> for details.</div>"#;
        assert!(!unlikely(html));
        assert!(unlikely(&html.replace("class=\"entry\"", "")));
    }

    #[test]
    fn positive_weight_still_drops_mostly_linked_blocks() {
        assert!(unlikely(
            "<div id='t' class='entry'>ab <a href='/x'>a long linked phrase here</a></div>"
        ));
    }

    #[test]
    fn plain_list_of_short_items_is_judged_on_length_and_links() {
        assert!(!unlikely(
            "<ul id='t'><li>2 cups of flour</li><li>1 cup of sugar</li><li>3 eggs</li></ul>"
        ));
    }

    #[test]
    fn removal_reason_for_empty_nodes() {
        let tree = ScraperTree::parse("<div><span id='t'>  </span><br id='b'></div>");
        let span = tree.select_first("#t").unwrap();
        let br = tree.select_first("#b").unwrap();
        assert_eq!(removal_reason(&tree, span, false), Some(Removal::Empty));
        assert_eq!(removal_reason(&tree, br, false), None);
    }

    #[test]
    fn removal_reason_respects_images_option() {
        let tree = ScraperTree::parse("<div><span id='t'><img src='a.png'></span></div>");
        let span = tree.select_first("#t").unwrap();
        assert_eq!(removal_reason(&tree, span, false), Some(Removal::Empty));
        assert_eq!(removal_reason(&tree, span, true), None);
    }

    #[test]
    fn removal_reason_for_unrelated_tags() {
        let tree = ScraperTree::parse(
            "<div><form id='t'><label>Your email address please</label></form></div>",
        );
        let form = tree.select_first("#t").unwrap();
        assert_eq!(removal_reason(&tree, form, false), Some(Removal::Unrelated));
    }

    #[test]
    fn comma_rich_blocks_survive_the_likelihood_check() {
        let tree = ScraperTree::parse(
            "<div><div id='t' class='related'>salt, pepper, oil</div></div>",
        );
        let div = tree.select_first("#t").unwrap();
        assert!(is_unlikely_content(&tree, div));
        assert_eq!(removal_reason(&tree, div, false), None);
    }

    #[test]
    fn clean_leaves_roots_and_prose_alone() {
        let mut tree = ScraperTree::parse(
            r#"<div id="root">
                <p>First paragraph of the story, with a comma.</p>
                <p> </p>
                <iframe src="https://ads.example.com"></iframe>
                <div class="share"><a href="/tw">Tweet</a></div>
                <p>Second paragraph of the story.</p>
            </div>"#,
        );
        let root = tree.select_first("#root").unwrap();
        let removed = clean(&mut tree, &[root], false);

        let html = tree.inner_html(root);
        assert!(tree.is_attached(root));
        assert!(html.contains("First paragraph"));
        assert!(html.contains("Second paragraph"));
        assert!(!html.contains("iframe"));
        assert!(!html.contains("Tweet"));
        assert_eq!(removed, 3);
    }

    #[test]
    fn clean_images_flag_keeps_a_superset_of_images() {
        let page = r#"<div id="root">
            <p>Mix the batter well, then fold in the chips.</p>
            <p><img src="cookie.jpg"></p>
            <img src="plain.jpg">
        </div>"#;

        let mut without = ScraperTree::parse(page);
        let root = without.select_first("#root").unwrap();
        clean(&mut without, &[root], false);

        let mut with = ScraperTree::parse(page);
        let root = with.select_first("#root").unwrap();
        clean(&mut with, &[root], true);

        assert_eq!(without.select("img").len(), 0);
        assert_eq!(with.select("img").len(), 2);
    }
}
