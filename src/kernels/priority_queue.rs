//! A binary min-heap keyed by weight with first-in-first-out tie-breaking.
//!
//! Tree construction needs a deterministic extraction order: when two entries
//! share a weight, the one inserted earlier must come out first. Every entry is
//! therefore stamped with a monotonically increasing insertion sequence and the
//! heap orders on `(weight, sequence)`.

#[derive(Debug, Clone)]
struct HeapEntry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> HeapEntry<T> {
    fn precedes(&self, other: &Self) -> bool {
        (self.weight, self.seq) < (other.weight, other.seq)
    }
}

#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    entries: Vec<HeapEntry<T>>,
    next_seq: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            entries: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The smallest weight currently queued.
    pub fn peek_weight(&self) -> Option<u64> {
        self.entries.first().map(|e| e.weight)
    }

    /// Inserts `item` with the given weight in `O(log n)`.
    pub fn push(&mut self, weight: u64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(HeapEntry { weight, seq, item });
        self.sift_up(self.entries.len() - 1);
    }

    /// Removes and returns the lightest entry (earliest inserted on ties) in `O(log n)`.
    pub fn pop_min(&mut self) -> Option<(u64, T)> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let min = self.entries.pop()?;
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((min.weight, min.item))
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.entries[i].precedes(&self.entries[parent]) {
                break;
            }
            self.entries.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.entries.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;

            if left < n && self.entries[left].precedes(&self.entries[smallest]) {
                smallest = left;
            }
            if right < n && self.entries[right].precedes(&self.entries[smallest]) {
                smallest = right;
            }
            if smallest == i {
                return;
            }
            self.entries.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
