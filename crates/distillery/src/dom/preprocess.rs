// ABOUTME: Preprocessing pass that prunes the document before scoring.
// ABOUTME: Drops non-content tags and elements whose class/id mark them as page furniture.

use tracing::debug;

use super::DomTree;
use crate::constants::{REMOVAL_WHITELIST, UNLIKELY_IDENTIFIERS};

/// Remove every element below the document element whose tag is in `tags`.
///
/// Returns the number of subtrees removed.
pub fn remove_irrelevant<T: DomTree>(tree: &mut T, tags: &[&str]) -> usize {
    let root = tree.root();
    let doomed: Vec<T::Handle> = tree
        .descendants(root)
        .into_iter()
        .filter(|&node| tags.contains(&tree.tag_name(node)))
        .collect();

    let removed = detach_all(tree, doomed);
    debug!(removed, "removed irrelevant elements");
    removed
}

/// Remove elements whose class or id names a navigation, comment, footer or
/// similar role. `a` and `body` always survive this rule.
pub fn remove_unlikely<T: DomTree>(tree: &mut T) -> usize {
    let root = tree.root();
    let doomed: Vec<T::Handle> = tree
        .descendants(root)
        .into_iter()
        .filter(|&node| is_unlikely_candidate(&*tree, node))
        .collect();

    let removed = detach_all(tree, doomed);
    debug!(removed, "removed unlikely candidates");
    removed
}

/// Check if an element should be stripped as an unlikely candidate.
pub fn is_unlikely_candidate<T: DomTree>(tree: &T, node: T::Handle) -> bool {
    if REMOVAL_WHITELIST.contains(&tree.tag_name(node)) {
        return false;
    }

    let identifiers = tree.identifiers(node);
    !identifiers.is_empty() && UNLIKELY_IDENTIFIERS.is_match(&identifiers)
}

// Nodes inside an already removed subtree are skipped.
fn detach_all<T: DomTree>(tree: &mut T, nodes: Vec<T::Handle>) -> usize {
    let mut removed = 0;
    for node in nodes {
        if tree.is_attached(node) {
            tree.remove(node);
            removed += 1;
        }
    }
    removed
}
