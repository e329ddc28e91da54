//! LRU List Module
//!
//! Recency-ordered entry storage backing the cache store.

use std::collections::HashMap;

use generational_arena::{Arena, Index};

use crate::cache::CacheEntry;

#[derive(Debug)]
struct Node {
    entry: CacheEntry,
    /// Neighbour closer to the front (more recently used)
    prev: Option<Index>,
    /// Neighbour closer to the back (less recently used)
    next: Option<Index>,
}

// == LRU List ==
/// Owns every resident entry and keeps them in access order.
///
/// Nodes live in an arena and are threaded into a doubly-linked list:
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
///
/// A key index gives O(1) lookup, promotion and removal. The summed
/// [`CacheEntry::size`] of all nodes is tracked alongside.
#[derive(Debug, Default)]
pub struct LruList {
    nodes: Arena<Node>,
    lookup: HashMap<String, Index>,
    head: Option<Index>,
    tail: Option<Index>,
    total_size: usize,
}

impl LruList {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            lookup: HashMap::new(),
            head: None,
            tail: None,
            total_size: 0,
        }
    }

    // Detaches a node from its neighbours without freeing it.
    fn unlink(&mut self, index: Index) {
        let (prev, next) = {
            let node = &self.nodes[index];
            (node.prev, node.next)
        };

        match prev {
            Some(prev_idx) => self.nodes[prev_idx].next = next,
            None => self.head = next,
        }

        match next {
            Some(next_idx) => self.nodes[next_idx].prev = prev,
            None => self.tail = prev,
        }
    }

    // Links an already-allocated node in as the new head.
    fn link_front(&mut self, index: Index) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[index];
            node.prev = None;
            node.next = old_head;
        }

        if let Some(old_head) = old_head {
            self.nodes[old_head].prev = Some(index);
        }

        self.head = Some(index);
        if self.tail.is_none() {
            self.tail = Some(index);
        }
    }

    fn remove_index(&mut self, index: Index) -> Option<CacheEntry> {
        self.unlink(index);
        let node = self.nodes.remove(index)?;
        self.lookup.remove(&node.entry.key);
        self.total_size -= node.entry.size();
        Some(node.entry)
    }

    // == Push Front ==
    /// Inserts an entry as the most recently used.
    ///
    /// Any entry already stored under the same key is removed first and
    /// returned, so its size is never partially accounted.
    pub fn push_front(&mut self, entry: CacheEntry) -> Option<CacheEntry> {
        let replaced = self.remove(&entry.key);

        let key = entry.key.clone();
        self.total_size += entry.size();
        let index = self.nodes.insert(Node {
            entry,
            prev: None,
            next: None,
        });
        self.lookup.insert(key, index);
        self.link_front(index);

        replaced
    }

    // == Get ==
    /// Looks up an entry without changing its position.
    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        let index = *self.lookup.get(key)?;
        self.nodes.get(index).map(|node| &node.entry)
    }

    // == Touch ==
    /// Marks a key as recently used (moves it to the front) and returns its entry.
    pub fn touch(&mut self, key: &str) -> Option<&CacheEntry> {
        let index = *self.lookup.get(key)?;
        if self.head != Some(index) {
            self.unlink(index);
            self.link_front(index);
        }
        self.nodes.get(index).map(|node| &node.entry)
    }

    // == Remove ==
    /// Removes and returns the entry stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let index = *self.lookup.get(key)?;
        self.remove_index(index)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<CacheEntry> {
        let tail = self.tail?;
        self.remove_index(tail)
    }

    // == Remove Where ==
    /// Visits every entry from least to most recently used and removes
    /// those for which `predicate` returns true.
    ///
    /// Returns the number of entries removed.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&CacheEntry) -> bool,
    {
        let mut removed = 0;
        let mut cursor = self.tail;

        while let Some(index) = cursor {
            let node = &self.nodes[index];
            cursor = node.prev;

            if predicate(&node.entry) && self.remove_index(index).is_some() {
                removed += 1;
            }
        }

        removed
    }

    // == Peek ==
    /// Returns the most recently used entry.
    #[cfg(test)]
    pub fn peek_front(&self) -> Option<&CacheEntry> {
        self.head.map(|index| &self.nodes[index].entry)
    }

    /// Returns the least recently used entry without removing it.
    #[cfg(test)]
    pub fn peek_back(&self) -> Option<&CacheEntry> {
        self.tail.map(|index| &self.nodes[index].entry)
    }

    // == Keys ==
    /// Returns all keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.lookup.len());
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let node = &self.nodes[index];
            keys.push(node.entry.key.clone());
            cursor = node.next;
        }
        keys
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lookup.clear();
        self.head = None;
        self.tail = None;
        self.total_size = 0;
    }

    // == Total Size ==
    /// Returns the summed size of all resident entries.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    // == Length ==
    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    // == Contains ==
    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.lookup.contains_key(key)
    }
}
