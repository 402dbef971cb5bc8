//! Arena-backed character trie over cleaned name keys.
//!
//! Nodes live in one `Vec` and refer to each other by `u32` position, the
//! same way the road graph refers to nodes by `NodeIdx`.  Children are kept in
//! a `BTreeMap` so a depth-first walk visits keys in lexicographic order.

use std::collections::BTreeMap;

/// Position of a stored key in insertion order.
pub type KeySlot = u32;

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, u32>,
    /// Set when a key ends at this node.
    key:      Option<KeySlot>,
}

#[derive(Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    keys:  u32,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self { nodes: vec![TrieNode::default()], keys: 0 }
    }

    /// Number of distinct keys stored.
    pub fn key_count(&self) -> usize {
        self.keys as usize
    }

    /// Insert `key` and return its slot.  Re-inserting an existing key returns
    /// the slot it was first given.
    pub fn insert(&mut self, key: &str) -> KeySlot {
        let mut at = 0usize;
        for c in key.chars() {
            at = match self.nodes[at].children.get(&c) {
                Some(&child) => child as usize,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[at].children.insert(c, child as u32);
                    child
                }
            };
        }
        if let Some(slot) = self.nodes[at].key {
            return slot;
        }
        let slot = self.keys;
        self.keys += 1;
        self.nodes[at].key = Some(slot);
        slot
    }

    /// Slot of `key` if it was inserted.
    pub fn get(&self, key: &str) -> Option<KeySlot> {
        self.walk(key).and_then(|n| self.nodes[n].key)
    }

    /// Slots of every key starting with `prefix`, in lexicographic key order.
    pub fn with_prefix(&self, prefix: &str) -> PrefixIter<'_> {
        let stack = self.walk(prefix).into_iter().collect();
        PrefixIter { trie: self, stack }
    }

    fn walk(&self, key: &str) -> Option<usize> {
        key.chars().try_fold(0usize, |at, c| {
            self.nodes[at].children.get(&c).map(|&child| child as usize)
        })
    }
}

/// Depth-first, pre-order walk below a prefix node.
pub struct PrefixIter<'t> {
    trie:  &'t Trie,
    stack: Vec<usize>,
}

impl Iterator for PrefixIter<'_> {
    type Item = KeySlot;

    fn next(&mut self) -> Option<KeySlot> {
        while let Some(at) = self.stack.pop() {
            let node = &self.trie.nodes[at];
            // Reverse push so the smallest child is popped first.
            self.stack.extend(node.children.values().rev().map(|&c| c as usize));
            if let Some(slot) = node.key {
                return Some(slot);
            }
        }
        None
    }
}
