//! Fixed-capacity set of graph vertices stored as a bitset.
//!
//! Used for candidate domains and per-vertex image sets in the embedding
//! search: O(1) insert, remove and membership, with a maintained count so
//! image-set sizes never require a scan.

use crate::labels::VertexId;

const WORD_BITS: usize = u64::BITS as usize;

/// A set of vertex ids in `0..capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexSet {
    words: Vec<u64>,
    capacity: usize,
    len: usize,
}

impl VertexSet {
    /// Creates an empty set able to hold ids `0..capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
            len: 0,
        }
    }

    /// Creates a set from vertex ids. Ids outside the capacity are ignored.
    #[must_use]
    pub fn from_vertices(capacity: usize, vertices: impl IntoIterator<Item = VertexId>) -> Self {
        let mut set = Self::new(capacity);
        for v in vertices {
            set.insert(v);
        }
        set
    }

    /// Inserts a vertex, returns true if it was not present.
    #[contracts::debug_ensures(self.len <= self.capacity)]
    pub fn insert(&mut self, v: VertexId) -> bool {
        let index = v as usize;
        if index >= self.capacity {
            return false;
        }
        let (word, mask) = Self::locate(index);
        if self.words[word] & mask != 0 {
            return false;
        }
        self.words[word] |= mask;
        self.len += 1;
        true
    }

    /// Removes a vertex, returns true if it was present.
    pub fn remove(&mut self, v: VertexId) -> bool {
        let index = v as usize;
        if index >= self.capacity {
            return false;
        }
        let (word, mask) = Self::locate(index);
        if self.words[word] & mask == 0 {
            return false;
        }
        self.words[word] &= !mask;
        self.len -= 1;
        true
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, v: VertexId) -> bool {
        let index = v as usize;
        if index >= self.capacity {
            return false;
        }
        let (word, mask) = Self::locate(index);
        self.words[word] & mask != 0
    }

    /// Number of vertices in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest id + 1 the set can hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_index, &word)| {
                let base = word_index * WORD_BITS;
                BitIter(word).map(move |bit| (base + bit) as VertexId)
            })
    }

    /// Collects the members in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<VertexId> {
        self.iter().collect()
    }

    const fn locate(index: usize) -> (usize, u64) {
        (index / WORD_BITS, 1u64 << (index % WORD_BITS))
    }
}

/// Iterates set bit positions of a single word.
struct BitIter(u64);

impl Iterator for BitIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(bit)
    }
}
