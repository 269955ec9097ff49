//! Structural filtering of a [`Forest`] by node predicate.

use crate::{Forest, NodeId};
use std::convert::Infallible;

/// Produce a new [`Forest`] containing exactly the nodes whose ID passes
/// `predicate` and whose ancestors, transitively up to the tree root, all
/// pass it as well.
///
/// The scan is a single left-to-right pass.  A passing node is copied to
/// the output with its ID and its *original* depth unchanged; surviving
/// depths are never renumbered against the sparser output.  A failing
/// node is discarded together with its entire subtree, and the predicate
/// is never consulted for any of the skipped descendants.  Runs in O(n)
/// for n input nodes.
///
/// The original forest is untouched and may be reused.
pub fn filter(forest: &Forest, mut predicate: impl FnMut(NodeId) -> bool) -> Forest {
    match try_filter(forest, |node_id| Ok::<_, Infallible>(predicate(node_id))) {
        Ok(filtered) => filtered,
        Err(never) => match never {},
    }
}

/// [`filter`] with a fallible predicate.
///
/// Aborts on the first predicate error and propagates it unmodified; no
/// partially built forest is observable.
pub fn try_filter<E>(
    forest: &Forest,
    mut predicate: impl FnMut(NodeId) -> Result<bool, E>,
) -> Result<Forest, E> {
    let node_ids = forest.node_ids();
    let depths = forest.depths();
    let mut kept_ids = Vec::new();
    let mut kept_depths = Vec::new();

    let mut index = 0;
    while index < forest.size() {
        if predicate(node_ids[index])? {
            kept_ids.push(node_ids[index]);
            kept_depths.push(depths[index]);
            index += 1;
        } else {
            // Excluded, so the whole subtree goes with it, unseen
            // by the predicate.
            index = forest.subtree_end(index);
        }
    }

    Ok(Forest::from_parts(kept_ids, kept_depths))
}
