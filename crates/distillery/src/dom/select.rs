// ABOUTME: Picks the top scoring element and merges in related siblings.
// ABOUTME: Ties are broken by structural path so outer elements win over their descendants.

use std::cmp::Ordering;

use tracing::debug;

use super::scoring::ScoreTable;
use super::DomTree;
use crate::constants::{RELATED_SIBLING_RATIO, SAME_STYLE_SIBLING_RATIO};

/// The highest scoring element and its final score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Winner<H> {
    pub node: H,
    pub score: f64,
}

/// Top-level nodes chosen as the document's content, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<H> {
    pub winner: Winner<H>,
    pub roots: Vec<H>,
}

/// Find the top scoring element.
///
/// Entries are ranked by descending score, then by ascending path, so on a tie
/// an ancestor beats its descendants. With nothing scored, `body` (or the
/// document element when there is no body) wins with a score of 1.
pub fn pick_winner<T: DomTree>(tree: &T, table: &ScoreTable<T::Handle>) -> Winner<T::Handle> {
    let mut ranked: Vec<(T::Handle, f64, String)> = table
        .entries()
        .map(|(node, score)| (node, score, tree.path(node)))
        .collect();
    ranked.sort_by(|a, b| compare_candidates((a.1, &a.2), (b.1, &b.2)));

    match ranked.into_iter().next() {
        Some((node, score, path)) => {
            debug!(%path, score, "picked top candidate");
            Winner { node, score }
        }
        None => {
            let node = tree.body().unwrap_or_else(|| tree.root());
            debug!("no scored elements, falling back to body");
            Winner { node, score: 1.0 }
        }
    }
}

fn compare_candidates(a: (f64, &str), b: (f64, &str)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1))
}

/// Collect the winner and every related sibling, in document order.
///
/// A sibling is related when its score exceeds a quarter of the winner's, or
/// when it shares the winner's exact `id` and `class` and clears a much lower
/// bar. The winner is always included exactly once.
pub fn extend_with_related_siblings<T: DomTree>(
    tree: &T,
    table: &ScoreTable<T::Handle>,
    winner: &Winner<T::Handle>,
) -> Vec<T::Handle> {
    let parent = match tree.parent(winner.node) {
        Some(p) => p,
        None => return vec![winner.node],
    };

    tree.children(parent)
        .into_iter()
        .filter(|&sibling| sibling == winner.node || is_related(tree, table, winner, sibling))
        .collect()
}

fn is_related<T: DomTree>(
    tree: &T,
    table: &ScoreTable<T::Handle>,
    winner: &Winner<T::Handle>,
    sibling: T::Handle,
) -> bool {
    let score = table.get(sibling);
    if score > winner.score * RELATED_SIBLING_RATIO {
        return true;
    }

    let same_style = tree.attr(sibling, "id") == tree.attr(winner.node, "id")
        && tree.attr(sibling, "class") == tree.attr(winner.node, "class");
    same_style && score > winner.score * SAME_STYLE_SIBLING_RATIO
}

/// Run the selection stage: pick the winner, merge related siblings and clear
/// the scorable flags inside the selection.
pub fn select<T: DomTree>(tree: &T, table: &mut ScoreTable<T::Handle>) -> Selection<T::Handle> {
    let winner = pick_winner(tree, table);
    let roots = extend_with_related_siblings(tree, table, &winner);
    table.clear_scorable_within(tree, &roots);
    debug!(roots = roots.len(), "selected content roots");

    Selection { winner, roots }
}
