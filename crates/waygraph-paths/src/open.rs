//! Open set for best-first search.
//!
//! Entries are stored in a min-heap keyed by `(score, insertion_order)`.
//! Lower scores are popped first; ties are broken by insertion order
//! (FIFO), so the earliest-discovered node wins among equals.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Reference into a search's node arena, ordered by score.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) node: usize,
    pub(crate) score: f32,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order: smaller score first, then smaller seq. Wrapped in
        // Reverse for the max-heap. total_cmp keeps NaN scores orderable.
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-score priority queue of search nodes.
#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    heap: BinaryHeap<Reverse<NodeRef>>,
    seq: u64,
}

impl OpenSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Push arena node `node` with the given score.
    pub(crate) fn push(&mut self, node: usize, score: f32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(NodeRef { node, score, seq }));
    }

    /// Pop the lowest-scored entry (ties broken FIFO).
    pub(crate) fn pop(&mut self) -> Option<NodeRef> {
        self.heap.pop().map(|Reverse(r)| r)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Arena nodes currently queued, in no particular order.
    #[cfg(test)]
    pub(crate) fn iter_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.heap.iter().map(|Reverse(r)| r.node)
    }
}
