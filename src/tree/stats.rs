//! The `stats` transformer: runs a full traversal and reports
//! aggregate counters used for tree-shape diagnostics and testing.

use crate::coverage::Coverage;
use crate::tree::coloured::ColouredNode;

/// Aggregate counters gathered over one full traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub node_count: usize,
    pub subtree_count: usize,
    pub leaf_count: usize,
    pub symbol_count: usize,
    pub max_subtree_depth: usize,
    pub subtree_depths: Vec<usize>,
}

/// Runs a depth-first traversal over `root`, accumulating [`TreeStats`].
///
/// A subtree begins the first time a path steps onto an alternate branch;
/// `subtree_depths` holds one entry per such subtree, the deepest
/// `subtree_depth` reached anywhere inside it. `leaf_count` counts nodes
/// with neither a `next_ref` nor a `next_alt` child.
pub fn run<'s, C: Coverage>(root: ColouredNode<'s, C>) -> TreeStats {
    let mut stats = TreeStats::default();
    visit(&root, 0, &mut stats);
    for depth in &stats.subtree_depths {
        stats.max_subtree_depth = stats.max_subtree_depth.max(*depth);
    }
    stats
}

fn visit<'s, C: Coverage>(node: &ColouredNode<'s, C>, subtree_depth: usize, stats: &mut TreeStats) {
    stats.node_count += 1;
    stats.symbol_count += node.sequence().len();

    let is_subtree_root = subtree_depth == 1;
    if is_subtree_root {
        stats.subtree_count += 1;
        stats.subtree_depths.push(1);
    } else if subtree_depth > 0 {
        let last = stats.subtree_depths.last_mut().expect("a nonzero subtree depth follows a subtree root");
        *last = (*last).max(subtree_depth);
    }

    let on_alternate_path = node.labelled().base().on_alternate_path();
    let ref_child = node.next_ref();
    let alt_child = node.next_alt();

    if let Some(child) = &ref_child {
        let child_depth = if on_alternate_path { subtree_depth + 1 } else { 0 };
        visit(child, child_depth, stats);
    }
    if let Some(child) = &alt_child {
        visit(child, subtree_depth + 1, stats);
    }

    if ref_child.is_none() && alt_child.is_none() {
        stats.leaf_count += 1;
    }
}
