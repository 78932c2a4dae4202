//! Undirected weighted graph of user-to-user taste similarity.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: String,
    pub weight: f64,
}

#[derive(Debug, Default)]
pub struct SimilarityGraph {
    adjacency: HashMap<String, Vec<Edge>>,
}

/// Ranking key for neighbors: heavier edges first, then the smaller id.
struct RankedNeighbor<'a> {
    weight: f64,
    id: &'a str,
}

impl PartialEq for RankedNeighbor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedNeighbor<'_> {}

impl Ord for RankedNeighbor<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Greater means better.
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| other.id.cmp(self.id))
    }
}

impl PartialOrd for RankedNeighbor<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Jaccard similarity `|a ∩ b| / |a ∪ b|`, 0 when both sets are empty.
pub fn jaccard_similarity<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|item| large.contains(*item)).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Cosine similarity of two sparse count vectors, 0 if either is empty.
pub fn cosine_similarity<T: Eq + Hash>(a: &HashMap<T, u32>, b: &HashMap<T, u32>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let dot: f64 = a
        .iter()
        .filter_map(|(key, count)| b.get(key).map(|other| *count as f64 * *other as f64))
        .sum();
    let norm_a: f64 = a.values().map(|c| (*c as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|c| (*c as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl SimilarityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, user_id: &str) {
        if !self.adjacency.contains_key(user_id) {
            self.adjacency.insert(user_id.to_string(), Vec::new());
        }
    }

    /// Inserts the edge in both adjacency lists.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) {
        self.adjacency.entry(a.to_string()).or_default().push(Edge {
            to: b.to_string(),
            weight,
        });
        self.adjacency.entry(b.to_string()).or_default().push(Edge {
            to: a.to_string(),
            weight,
        });
    }

    pub fn edge_weight(&self, a: &str, b: &str) -> f64 {
        self.adjacency
            .get(a)
            .and_then(|edges| edges.iter().find(|e| e.to == b))
            .map_or(0.0, |e| e.weight)
    }

    /// The `k` most similar neighbors of `user_id`, heaviest first.
    ///
    /// Selection keeps a min-heap of at most `k` entries, so the cost is
    /// O(E log k) in the degree of the vertex.
    pub fn top_k_similar(&self, user_id: &str, k: usize) -> Vec<(String, f64)> {
        let Some(edges) = self.adjacency.get(user_id) else {
            return Vec::new();
        };
        if k == 0 {
            return Vec::new();
        }

        let mut heap: BinaryHeap<Reverse<RankedNeighbor>> =
            BinaryHeap::with_capacity(k.min(edges.len()) + 1);
        for edge in edges {
            heap.push(Reverse(RankedNeighbor {
                weight: edge.weight,
                id: &edge.to,
            }));
            if heap.len() > k {
                heap.pop();
            }
        }

        // Ascending order of Reverse is descending order of rank.
        heap.into_sorted_vec()
            .into_iter()
            .map(|Reverse(n)| (n.id.to_string(), n.weight))
            .collect()
    }

    /// All neighbors of `user_id`, heaviest first.
    pub fn neighbors(&self, user_id: &str) -> Vec<(String, f64)> {
        let Some(edges) = self.adjacency.get(user_id) else {
            return Vec::new();
        };
        let mut neighbors: Vec<(String, f64)> =
            edges.iter().map(|e| (e.to.clone(), e.weight)).collect();
        neighbors.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        neighbors
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn has_vertex(&self, user_id: &str) -> bool {
        self.adjacency.contains_key(user_id)
    }

    pub fn vertices(&self) -> Vec<String> {
        let mut vertices: Vec<String> = self.adjacency.keys().cloned().collect();
        vertices.sort();
        vertices
    }
}
