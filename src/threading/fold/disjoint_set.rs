//! Disjoint-set (union-find) keyed by message identifier
//!
//! Identifiers are interned to dense indices on first sight; the forest
//! itself lives in two parallel vectors. `find` compresses paths
//! iteratively so very long reference chains cannot blow the stack.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct DisjointSet {
    /// Message identifier → dense index
    index_by_id: HashMap<String, usize>,

    /// Parent pointer per index (roots point at themselves)
    parent: Vec<usize>,

    /// Component size, only meaningful at roots
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn with_capacity(capacity: usize) -> Self {
        DisjointSet {
            index_by_id: HashMap::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            size: Vec::with_capacity(capacity),
        }
    }

    /// Number of distinct identifiers seen
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Intern an identifier, returning its index.
    ///
    /// New identifiers start in a singleton set.
    pub fn insert(&mut self, message_id: &str) -> usize {
        if let Some(&index) = self.index_by_id.get(message_id) {
            return index;
        }

        let index = self.parent.len();
        self.parent.push(index);
        self.size.push(1);
        self.index_by_id.insert(message_id.to_string(), index);
        index
    }

    /// Index of an identifier if it has been inserted
    pub fn index_of(&self, message_id: &str) -> Option<usize> {
        self.index_by_id.get(message_id).copied()
    }

    /// Representative of the set containing `index`
    pub fn find(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Second pass: point every node on the path straight at the root
        let mut current = index;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Merge the sets containing `a` and `b`, returning the new root.
    ///
    /// The smaller tree is hung under the larger one.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return root_a;
        }

        let (big, small) = if self.size[root_a] >= self.size[root_b] {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        big
    }

    /// Representative for an identifier, if known
    pub fn find_id(&mut self, message_id: &str) -> Option<usize> {
        let index = self.index_of(message_id)?;
        Some(self.find(index))
    }

    /// Size of the set containing `index`
    pub fn set_size(&mut self, index: usize) -> usize {
        let root = self.find(index);
        self.size[root]
    }
}
