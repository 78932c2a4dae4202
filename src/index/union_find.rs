//! Disjoint-set forest grouping users into taste communities.
//!
//! Union by rank with path compression. Elements are interned into slots of
//! flat arrays, ids are only used at the API boundary.

use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
pub struct UnionFind {
    slots: HashMap<String, usize>,
    ids: Vec<String>,
    parent: Vec<usize>,
    rank: Vec<u32>,
    /// Only meaningful for roots.
    size: Vec<usize>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` as a singleton set, no-op if it is already known.
    pub fn make_set(&mut self, id: &str) -> usize {
        if let Some(slot) = self.slots.get(id) {
            return *slot;
        }
        let slot = self.ids.len();
        self.slots.insert(id.to_string(), slot);
        self.ids.push(id.to_string());
        self.parent.push(slot);
        self.rank.push(0);
        self.size.push(1);
        slot
    }

    fn find_slot(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = slot;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn root_slot(&self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        root
    }

    /// Representative of the set containing `id`, creating a singleton on first reference.
    pub fn find(&mut self, id: &str) -> String {
        let slot = self.make_set(id);
        let root = self.find_slot(slot);
        self.ids[root].clone()
    }

    /// Merges the sets of `a` and `b`, returns false if they were already joined.
    pub fn union(&mut self, a: &str, b: &str) -> bool {
        let slot_a = self.make_set(a);
        let slot_b = self.make_set(b);
        let root_a = self.find_slot(slot_a);
        let root_b = self.find_slot(slot_b);
        if root_a == root_b {
            return false;
        }

        let (parent, child) = if self.rank[root_a] < self.rank[root_b] {
            (root_b, root_a)
        } else {
            (root_a, root_b)
        };
        self.parent[child] = parent;
        self.size[parent] += self.size[child];
        if self.rank[root_a] == self.rank[root_b] {
            self.rank[parent] += 1;
        }
        true
    }

    pub fn connected(&mut self, a: &str, b: &str) -> bool {
        let slot_a = self.make_set(a);
        let slot_b = self.make_set(b);
        self.find_slot(slot_a) == self.find_slot(slot_b)
    }

    pub fn community_size(&mut self, id: &str) -> usize {
        let slot = self.make_set(id);
        let root = self.find_slot(slot);
        self.size[root]
    }

    /// Every member sharing a root with `id`, sorted by id. Full scan.
    pub fn community_members(&mut self, id: &str) -> Vec<String> {
        let slot = self.make_set(id);
        let root = self.find_slot(slot);
        let mut members = Vec::new();
        for other in 0..self.ids.len() {
            if self.find_slot(other) == root {
                members.push(self.ids[other].clone());
            }
        }
        members.sort();
        members
    }

    /// Points every element directly at its root.
    pub fn flatten(&mut self) {
        for slot in 0..self.ids.len() {
            self.find_slot(slot);
        }
    }

    /// Read-only lookup of the representative of `id`, `None` if unknown.
    ///
    /// Doesn't compress paths, call [`UnionFind::flatten`] first to keep it O(1).
    pub fn root(&self, id: &str) -> Option<&str> {
        let slot = *self.slots.get(id)?;
        Some(self.ids[self.root_slot(slot)].as_str())
    }

    /// Read-only size of the set containing `id`, 0 if unknown.
    pub fn size_of(&self, id: &str) -> usize {
        self.slots
            .get(id)
            .map_or(0, |slot| self.size[self.root_slot(*slot)])
    }

    /// Read-only variant of [`UnionFind::community_members`], empty if unknown.
    pub fn members_of(&self, id: &str) -> Vec<&str> {
        let Some(slot) = self.slots.get(id) else {
            return Vec::new();
        };
        let root = self.root_slot(*slot);
        let mut members: Vec<&str> = (0..self.ids.len())
            .filter(|other| self.root_slot(*other) == root)
            .map(|other| self.ids[other].as_str())
            .collect();
        members.sort_unstable();
        members
    }

    /// All communities keyed by their representative, members sorted by id.
    pub fn communities(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut communities: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for slot in 0..self.ids.len() {
            let root = self.root_slot(slot);
            communities
                .entry(self.ids[root].as_str())
                .or_default()
                .push(self.ids[slot].as_str());
        }
        for members in communities.values_mut() {
            members.sort_unstable();
        }
        communities
    }

    pub fn number_of_communities(&self) -> usize {
        (0..self.ids.len())
            .filter(|slot| self.parent[*slot] == *slot)
            .count()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_creates_singletons() {
        let mut uf = UnionFind::new();
        assert_eq!(uf.find("u1"), "u1");
        assert_eq!(uf.len(), 1);
        assert_eq!(uf.community_size("u1"), 1);
        assert_eq!(uf.number_of_communities(), 1);
    }

    #[test]
    fn union_is_transitive() {
        let mut uf = UnionFind::new();
        assert!(uf.union("a", "b"));
        assert!(uf.union("b", "c"));
        assert!(uf.connected("a", "c"));
        assert!(!uf.union("a", "c"));
        assert!(!uf.connected("a", "d"));
        assert_eq!(uf.community_size("c"), 3);
        assert_eq!(uf.community_members("b"), vec!["a", "b", "c"]);
        assert_eq!(uf.number_of_communities(), 2);
    }

    #[test]
    fn union_by_rank_keeps_the_taller_root() {
        let mut uf = UnionFind::new();
        uf.union("a", "b");
        uf.union("c", "d");
        uf.union("a", "c");
        let root = uf.find("d");
        assert_eq!(root, "a");
        // A singleton joins under the rank-2 root.
        uf.union("e", "d");
        assert_eq!(uf.find("e"), "a");
        assert_eq!(uf.community_size("e"), 5);
    }

    #[test]
    fn read_only_queries_after_flatten() {
        let mut uf = UnionFind::new();
        uf.make_set("lonely");
        uf.union("x", "y");
        uf.union("y", "z");
        uf.flatten();

        assert_eq!(uf.root("z"), Some("x"));
        assert_eq!(uf.root("unknown"), None);
        assert_eq!(uf.size_of("y"), 3);
        assert_eq!(uf.size_of("unknown"), 0);
        assert_eq!(uf.members_of("x"), vec!["x", "y", "z"]);
        assert!(uf.members_of("unknown").is_empty());

        let communities = uf.communities();
        assert_eq!(communities.len(), 2);
        assert_eq!(communities["lonely"], vec!["lonely"]);
        assert_eq!(communities["x"], vec!["x", "y", "z"]);
    }
}
