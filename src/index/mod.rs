//! Index structures backing the recommendation pillars.

mod affinity_graph;
mod kd_tree;
mod similarity_graph;
mod trie;
mod union_find;

pub use affinity_graph::{AffinityEdge, AffinityGraph, AffinityGraphBuilder};
pub use kd_tree::{distance, KdTree, Neighbor};
pub use similarity_graph::{cosine_similarity, jaccard_similarity, Edge, SimilarityGraph};
pub use trie::Trie;
pub use union_find::UnionFind;
