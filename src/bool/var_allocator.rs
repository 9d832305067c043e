//! Variable allocation for SAT encoding
//!
//! Pre-allocates SAT variable IDs in contiguous blocks, one block per key,
//! before any gate is built. Gate labels are handed out after the last block.

use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::Range;

/// Allocates contiguous blocks of SAT variables, keyed by purpose
pub struct VariableAllocator<K> {
    next_var: u32,
    blocks: FxHashMap<K, Range<u32>>,
}

impl<K: Eq + Hash + Clone> VariableAllocator<K> {
    /// Creates a new variable allocator
    pub fn new() -> Self {
        Self {
            next_var: 1, // Variables start at 1 (DIMACS convention)
            blocks: FxHashMap::default(),
        }
    }

    /// Allocates `count` fresh variables for `key`
    ///
    /// # Returns
    /// Range of variable IDs allocated (empty range if `count` is zero)
    ///
    /// # Panics
    /// Panics if `key` already owns a block.
    pub fn allocate(&mut self, key: K, count: usize) -> Range<u32> {
        assert!(!self.blocks.contains_key(&key), "variables already allocated for key");

        if count == 0 {
            return 0..0;
        }

        let start = self.next_var;
        let end = start + count as u32;
        let range = start..end;

        self.blocks.insert(key, range.clone());
        self.next_var = end;

        range
    }

    /// Returns the total number of variables allocated
    pub fn total_variables(&self) -> u32 {
        self.next_var - 1
    }
}

impl<K: Eq + Hash + Clone> Default for VariableAllocator<K> {
    fn default() -> Self {
        Self::new()
    }
}
