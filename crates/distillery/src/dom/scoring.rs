// ABOUTME: Content scoring for candidate elements.
// ABOUTME: Marks scorable nodes, awards comma/length points, propagates them upward, then discounts by link density.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::{debug, trace};

use super::{is_blank, DomTree};
use crate::constants::{
    BLOCK_ELEMENTS, CONTAINER_TAGS, IDENTIFIER_WEIGHT, LENGTH_BUCKET_CHARS, MAX_LENGTH_BUCKETS,
    NEGATIVE_IDENTIFIERS, PARAGRAPH_TAGS, POSITIVE_IDENTIFIERS,
};

/// Per-document score storage keyed by node handle, plus the transient
/// scorable flags.
#[derive(Debug, Clone)]
pub struct ScoreTable<H> {
    scores: HashMap<H, f64>,
    scorable: Vec<H>,
    flagged: HashSet<H>,
}

impl<H: Copy + Eq + Hash> Default for ScoreTable<H> {
    fn default() -> Self {
        Self {
            scores: HashMap::new(),
            scorable: Vec::new(),
            flagged: HashSet::new(),
        }
    }
}

impl<H: Copy + Eq + Hash> ScoreTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score for a node, 0 when it has none.
    pub fn get(&self, node: H) -> f64 {
        self.scores.get(&node).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, node: H) -> bool {
        self.scores.contains_key(&node)
    }

    pub fn add(&mut self, node: H, amount: f64) {
        *self.scores.entry(node).or_insert(0.0) += amount;
    }

    fn scale(&mut self, node: H, factor: f64) {
        if let Some(score) = self.scores.get_mut(&node) {
            *score *= factor;
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Every scored node with its score, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (H, f64)> + '_ {
        self.scores.iter().map(|(&node, &score)| (node, score))
    }

    pub fn mark_scorable(&mut self, node: H) {
        if self.flagged.insert(node) {
            self.scorable.push(node);
        }
    }

    pub fn is_scorable(&self, node: H) -> bool {
        self.flagged.contains(&node)
    }

    /// Flagged nodes in the order they were marked.
    pub fn scorable(&self) -> Vec<H> {
        self.scorable
            .iter()
            .copied()
            .filter(|node| self.flagged.contains(node))
            .collect()
    }

    /// Drop the scorable flag from every root and every node below it.
    pub fn clear_scorable_within<T>(&mut self, tree: &T, roots: &[H])
    where
        T: DomTree<Handle = H>,
    {
        for &root in roots {
            self.flagged.remove(&root);
            for node in tree.descendants(root) {
                self.flagged.remove(&node);
            }
        }
        let flagged = &self.flagged;
        self.scorable.retain(|node| flagged.contains(node));
    }
}

/// Number of comma-separated segments, ignoring trailing empty segments.
pub fn comma_segments(text: &str) -> usize {
    let mut segments: Vec<&str> = text.split(',').collect();
    while segments.last().map_or(false, |s| s.is_empty()) {
        segments.pop();
    }
    segments.len()
}

/// Raw points for a block of text: one for existing, one per comma segment,
/// and one per hundred characters up to three.
pub fn content_points(text: &str) -> f64 {
    let length_bonus = (text.chars().count() / LENGTH_BUCKET_CHARS).min(MAX_LENGTH_BUCKETS);
    (1 + comma_segments(text) + length_bonus) as f64
}

/// Signed weight from class/id: +25 for a positive match, -25 for a negative one.
pub fn identifier_weight<T: DomTree>(tree: &T, node: T::Handle) -> i32 {
    let identifiers = tree.identifiers(node);
    if identifiers.is_empty() {
        return 0;
    }

    let mut weight = 0;
    if POSITIVE_IDENTIFIERS.is_match(&identifiers) {
        weight += IDENTIFIER_WEIGHT;
    }
    if NEGATIVE_IDENTIFIERS.is_match(&identifiers) {
        weight -= IDENTIFIER_WEIGHT;
    }
    weight
}

/// Check if a node is a candidate for direct scoring.
pub fn is_scorable<T: DomTree>(tree: &T, node: T::Handle) -> bool {
    let tag = tree.tag_name(node);
    if PARAGRAPH_TAGS.contains(&tag) {
        return true;
    }
    if !CONTAINER_TAGS.contains(&tag) {
        return false;
    }

    has_no_block_children(tree, node)
        || has_only_empty_containers(tree, node)
        || POSITIVE_IDENTIFIERS.is_match(&tree.identifiers(node))
}

fn has_no_block_children<T: DomTree>(tree: &T, node: T::Handle) -> bool {
    tree.has_child_nodes(node)
        && tree
            .children(node)
            .into_iter()
            .all(|child| !BLOCK_ELEMENTS.contains(&tree.tag_name(child)))
}

fn has_only_empty_containers<T: DomTree>(tree: &T, node: T::Handle) -> bool {
    tree.descendants(node)
        .into_iter()
        .filter(|&d| CONTAINER_TAGS.contains(&tree.tag_name(d)))
        .all(|d| is_blank(&tree.text(d)))
}

/// Flag every scorable element in the document. Returns the number flagged.
pub fn mark_scorable<T: DomTree>(tree: &T, table: &mut ScoreTable<T::Handle>) -> usize {
    let mut marked = 0;
    for node in tree.descendants(tree.root()) {
        if is_scorable(tree, node) {
            table.mark_scorable(node);
            marked += 1;
        }
    }
    debug!(marked, "marked scorable elements");
    marked
}

/// Award raw points to each scorable node, its parent, and half to its grandparent.
pub fn score<T: DomTree>(tree: &T, table: &mut ScoreTable<T::Handle>) {
    for node in table.scorable() {
        let points = content_points(&tree.text(node));
        table.add(node, points);

        if let Some(parent) = tree.parent(node) {
            table.add(parent, points);
            if let Some(grandparent) = tree.parent(parent) {
                table.add(grandparent, points / 2.0);
            }
        }
        trace!(path = %tree.path(node), points, "scored element");
    }
}

/// Scale every score by `1 - link_density`. Runs once, after `score`.
pub fn apply_link_density_discount<T: DomTree>(tree: &T, table: &mut ScoreTable<T::Handle>) {
    let nodes: Vec<T::Handle> = table.entries().map(|(node, _)| node).collect();
    for node in nodes {
        let density = tree.link_density(node);
        table.scale(node, 1.0 - density);
    }
    debug!(entries = table.len(), "applied link density discount");
}

/// Run the whole scoring stage on a preprocessed document.
pub fn score_content<T: DomTree>(tree: &T) -> ScoreTable<T::Handle> {
    let mut table = ScoreTable::new();
    mark_scorable(tree, &mut table);
    score(tree, &mut table);
    apply_link_density_discount(tree, &mut table);
    table
}
