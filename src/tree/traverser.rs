//! The tree traverser: depth-first enumeration that publishes
//! `push`/`pop` notifications to subscribers (matcher state managers).
//!
//! An explicit work stack (push alt first, ref second, so ref is explored
//! first) would give the same visitation order; plain recursion gives the
//! identical visitation order and the identical push-after-descent /
//! pop-after-backtrack notification timing with far less bookkeeping, so
//! that is what drives it here. The only stack that actually exists lives
//! on the matcher-subscriber side (each subscriber's own capture/restore
//! stack), not as a literal `Vec` inside the traverser.

use crate::tree::TreeNode;

/// Receives `visit`/`push`/`pop` notifications during a traversal. A
/// matcher state manager implements this to capture state on push and
/// restore it on pop.
pub trait TraversalObserver<N> {
    fn visit(&mut self, node: &N);
    fn on_push(&mut self);
    fn on_pop(&mut self);
}

/// Depth-first traversal: visits `root`, then (if present) its reference
/// child's whole subtree, then its alternate child's whole subtree.
pub fn traverse<N: TreeNode>(root: N, observer: &mut impl TraversalObserver<N>) {
    observer.visit(&root);
    if let Some(ref_child) = root.next_ref() {
        observer.on_push();
        traverse(ref_child, observer);
        observer.on_pop();
    }
    if let Some(alt_child) = root.next_alt() {
        observer.on_push();
        traverse(alt_child, observer);
        observer.on_pop();
    }
}

/// An observer that simply records every visited node, in DFS order; used
/// by tests and by `stats`.
#[derive(Default)]
pub struct Collector<N> {
    pub visited: Vec<N>,
}

impl<N: Clone> TraversalObserver<N> for Collector<N> {
    fn visit(&mut self, node: &N) {
        self.visited.push(node.clone());
    }
    fn on_push(&mut self) {}
    fn on_pop(&mut self) {}
}

pub fn collect_all<N: TreeNode>(root: N) -> Vec<N> {
    let mut collector = Collector::default();
    traverse(root, &mut collector);
    collector.visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{CoverageDomain, DenseCoverage};
    use crate::store::RcsStore;
    use crate::tree::ColouredNode;
    use crate::variant::Variant;

    #[test]
    fn ref_subtree_is_fully_visited_before_alt_subtree() {
        let mut store: RcsStore<DenseCoverage> = RcsStore::new(b"ACGTACGT".to_vec(), 1);
        store.add(Variant::snv(4, b'N'), DenseCoverage::from_members([0], CoverageDomain::new(1))).unwrap();

        let root = ColouredNode::root(&store);
        let visited = collect_all(root);
        // root, then declining the SNV down to the sink, then the alt branch.
        assert!(visited.len() >= 3);
        assert!(visited[1].labelled().base().from_reference());
        let alt_position = visited.iter().position(|n| n.labelled().base().from_variant());
        assert!(alt_position.is_some());
        assert!(alt_position.unwrap() > 1);
    }

    #[derive(Default)]
    struct PushPopLog {
        events: Vec<&'static str>,
    }

    impl<N> TraversalObserver<N> for PushPopLog {
        fn visit(&mut self, _node: &N) {
            self.events.push("visit");
        }
        fn on_push(&mut self) {
            self.events.push("push");
        }
        fn on_pop(&mut self) {
            self.events.push("pop");
        }
    }

    #[test]
    fn push_fires_after_descent_and_pop_after_backtrack() {
        let mut store: RcsStore<DenseCoverage> = RcsStore::new(b"ACGT".to_vec(), 1);
        store.add(Variant::snv(2, b'N'), DenseCoverage::from_members([0], CoverageDomain::new(1))).unwrap();

        let root = ColouredNode::root(&store);
        let mut log = PushPopLog::default();
        traverse(root, &mut log);

        assert_eq!(log.events.first(), Some(&"visit"));
        let pushes = log.events.iter().filter(|e| **e == "push").count();
        let pops = log.events.iter().filter(|e| **e == "pop").count();
        assert_eq!(pushes, pops);
    }
}
