//! Approximate pattern search on the tree: the seed-and-extend
//! bucket searcher that drives a pigeonhole filter over a tree, extends
//! every seed hit with restorable Myers matchers, and reports match
//! positions in the tree's own coordinate system.

mod seed_tree;

pub mod bucket;

pub use bucket::{Bucket, BucketSearcher, MatchPosition};
pub use seed_tree::{SeedNode, SeedPosition};
