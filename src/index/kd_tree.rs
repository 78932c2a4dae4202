//! Balanced k-d tree for nearest neighbor search over audio features.
//!
//! The tree is built once from the complete point set and never mutated
//! afterwards. Nodes live in an arena and reference their children by index,
//! both construction and search run on explicit stacks so large catalogs
//! can't overflow the call stack.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A point returned by a nearest neighbor query.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub id: String,
    pub distance: f64,
}

#[derive(Debug)]
struct Node<const D: usize> {
    id: String,
    point: [f64; D],
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Debug)]
pub struct KdTree<const D: usize> {
    nodes: Vec<Node<D>>,
    root: Option<usize>,
}

/// Euclidean distance between two points.
pub fn distance<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

struct BuildTask<const D: usize> {
    points: Vec<(String, [f64; D])>,
    depth: usize,
    parent: Option<(usize, Side)>,
}

/// Heap entry ordered by (distance, id), the largest one is the worst kept.
struct Candidate<'a> {
    distance: f64,
    id: &'a str,
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.id.cmp(other.id))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

enum Frame {
    Visit(usize),
    /// The far side of a split, explored only if it can still beat the worst kept candidate.
    Far { node: usize, gap: f64 },
}

impl<const D: usize> Default for KdTree<D> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<const D: usize> KdTree<D> {
    /// Builds a balanced tree by median split, cycling the split axis with the depth.
    ///
    /// The median is found by sorting the active slice at every level, ties on the
    /// axis value are ordered by id so the shape of the tree is reproducible.
    pub fn build(points: Vec<(String, [f64; D])>) -> Self {
        let mut tree = Self::default();
        if D == 0 || points.is_empty() {
            return tree;
        }
        tree.nodes.reserve(points.len());

        let mut tasks = vec![BuildTask {
            points,
            depth: 0,
            parent: None,
        }];

        while let Some(task) = tasks.pop() {
            let mut lower = task.points;
            if lower.is_empty() {
                continue;
            }
            let axis = task.depth % D;
            lower.sort_by(|a, b| a.1[axis].total_cmp(&b.1[axis]).then_with(|| a.0.cmp(&b.0)));

            let median = lower.len() / 2;
            let mut upper = lower.split_off(median);
            let rest = upper.split_off(1);
            let Some((id, point)) = upper.pop() else {
                continue;
            };

            let index = tree.nodes.len();
            tree.nodes.push(Node {
                id,
                point,
                axis,
                left: None,
                right: None,
            });
            match task.parent {
                None => tree.root = Some(index),
                Some((parent, Side::Left)) => tree.nodes[parent].left = Some(index),
                Some((parent, Side::Right)) => tree.nodes[parent].right = Some(index),
            }

            tasks.push(BuildTask {
                points: rest,
                depth: task.depth + 1,
                parent: Some((index, Side::Right)),
            });
            tasks.push(BuildTask {
                points: lower,
                depth: task.depth + 1,
                parent: Some((index, Side::Left)),
            });
        }

        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn dimensions(&self) -> usize {
        D
    }

    /// Returns the `k` points closest to `target`, sorted by ascending distance.
    ///
    /// Points at the same distance are ordered by id. The returned list has
    /// exactly `min(k, len)` distinct entries.
    pub fn find_k_nearest(&self, target: &[f64; D], k: usize) -> Vec<Neighbor> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        if k == 0 {
            return Vec::new();
        }

        let k = k.min(self.nodes.len());
        let mut best: BinaryHeap<Candidate> = BinaryHeap::with_capacity(k);
        let mut stack = vec![Frame::Visit(root)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Visit(index) => {
                    let node = &self.nodes[index];
                    let candidate = Candidate {
                        distance: distance(&node.point, target),
                        id: &node.id,
                    };
                    if best.len() < k {
                        best.push(candidate);
                    } else if best.peek().is_some_and(|worst| candidate < *worst) {
                        best.pop();
                        best.push(candidate);
                    }

                    let diff = target[node.axis] - node.point[node.axis];
                    let (near, far) = if diff < 0.0 {
                        (node.left, node.right)
                    } else {
                        (node.right, node.left)
                    };
                    // The far frame sits below the near subtree, so the bound is
                    // checked once the near side has been fully explored.
                    if let Some(far) = far {
                        stack.push(Frame::Far {
                            node: far,
                            gap: diff.abs(),
                        });
                    }
                    if let Some(near) = near {
                        stack.push(Frame::Visit(near));
                    }
                }
                Frame::Far { node, gap } => {
                    let worth_visiting = best.len() < k
                        || best.peek().is_some_and(|worst| gap <= worst.distance);
                    if worth_visiting {
                        stack.push(Frame::Visit(node));
                    }
                }
            }
        }

        best.into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor {
                id: c.id.to_string(),
                distance: c.distance,
            })
            .collect()
    }

    /// Ids of the `k` points closest to `point`, without `id` itself and
    /// without `exclude_id` if given.
    pub fn find_similar(
        &self,
        id: &str,
        point: &[f64; D],
        k: usize,
        exclude_id: Option<&str>,
    ) -> Vec<String> {
        let extra = match exclude_id {
            Some(excluded) if excluded != id => 2,
            _ => 1,
        };

        self.find_k_nearest(point, k.saturating_add(extra))
            .into_iter()
            .map(|n| n.id)
            .filter(|candidate| candidate != id && Some(candidate.as_str()) != exclude_id)
            .take(k)
            .collect()
    }
}
