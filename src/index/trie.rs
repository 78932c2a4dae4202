//! Case-insensitive prefix tree for autocomplete.
//!
//! Keys are lowercased on the way in, the original text (or a custom value)
//! is kept on the terminal node together with a frequency used for ranking.
//! Nodes are stored in an arena, slots freed by [`Trie::remove`] are reused.

use std::collections::BTreeMap;

const ROOT: usize = 0;

#[derive(Debug, Clone)]
struct Terminal {
    value: String,
    frequency: u64,
}

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, usize>,
    terminal: Option<Terminal>,
}

#[derive(Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    free: Vec<usize>,
    words: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            free: Vec::new(),
            words: 0,
        }
    }
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> usize {
        match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.nodes.push(TrieNode::default());
                self.nodes.len() - 1
            }
        }
    }

    fn find_node(&self, text: &str) -> Option<usize> {
        let mut current = ROOT;
        for ch in text.to_lowercase().chars() {
            current = *self.nodes[current].children.get(&ch)?;
        }
        Some(current)
    }

    /// Inserts `text` with itself as value and a frequency of 1.
    pub fn insert(&mut self, text: &str) {
        self.insert_with(text, None, 1);
    }

    /// Inserts `text`, storing `value` (or the original text) and adding
    /// `weight` to the frequency of the entry.
    pub fn insert_with(&mut self, text: &str, value: Option<&str>, weight: u64) {
        let mut current = ROOT;
        for ch in text.to_lowercase().chars() {
            let next = self.nodes[current].children.get(&ch).copied();
            current = match next {
                Some(child) => child,
                None => {
                    let child = self.alloc();
                    self.nodes[current].children.insert(ch, child);
                    child
                }
            };
        }

        let value = value.unwrap_or(text).to_string();
        match self.nodes[current].terminal.as_mut() {
            Some(terminal) => {
                terminal.value = value;
                terminal.frequency += weight;
            }
            None => {
                self.nodes[current].terminal = Some(Terminal {
                    value,
                    frequency: weight,
                });
                self.words += 1;
            }
        }
    }

    pub fn contains(&self, text: &str) -> bool {
        self.find_node(text)
            .is_some_and(|node| self.nodes[node].terminal.is_some())
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.find_node(prefix).is_some()
    }

    pub fn frequency(&self, text: &str) -> Option<u64> {
        let node = self.find_node(text)?;
        self.nodes[node].terminal.as_ref().map(|t| t.frequency)
    }

    /// Bumps the frequency of `text` by one, no-op if it isn't stored.
    pub fn increment_frequency(&mut self, text: &str) {
        let Some(node) = self.find_node(text) else {
            return;
        };
        if let Some(terminal) = self.nodes[node].terminal.as_mut() {
            terminal.frequency += 1;
        }
    }

    /// Values stored under `prefix`, most frequent first, ties alphabetical.
    pub fn autocomplete(&self, prefix: &str, limit: usize) -> Vec<String> {
        let Some(start) = self.find_node(prefix) else {
            return Vec::new();
        };

        let mut found: Vec<&Terminal> = Vec::new();
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if let Some(terminal) = node.terminal.as_ref() {
                found.push(terminal);
            }
            stack.extend(node.children.values().copied());
        }

        found.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.value.cmp(&b.value))
        });
        found
            .into_iter()
            .take(limit)
            .map(|t| t.value.clone())
            .collect()
    }

    /// Removes `text`, pruning the nodes that no longer lead to any entry.
    ///
    /// Returns false if `text` wasn't stored.
    pub fn remove(&mut self, text: &str) -> bool {
        let mut path: Vec<(usize, char)> = Vec::new();
        let mut current = ROOT;
        for ch in text.to_lowercase().chars() {
            let Some(child) = self.nodes[current].children.get(&ch).copied() else {
                return false;
            };
            path.push((current, ch));
            current = child;
        }

        if self.nodes[current].terminal.take().is_none() {
            return false;
        }
        self.words -= 1;

        while let Some((parent, ch)) = path.pop() {
            let node = &self.nodes[current];
            if node.terminal.is_some() || !node.children.is_empty() {
                break;
            }
            self.nodes[parent].children.remove(&ch);
            self.free.push(current);
            current = parent;
        }
        true
    }

    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Nodes currently reachable from the root, root included.
    #[cfg(test)]
    fn live_nodes(&self) -> usize {
        self.nodes.len() - self.free.len()
    }
}
