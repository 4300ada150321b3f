use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridstar_core::Point;

/// A position waiting in the [`Frontier`] with the `f` it was pushed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierEntry {
    pub pos: Point,
    pub f: i32,
    seq: u64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and the
        // earliest push among equal f.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The open set: candidates ordered by estimated total cost.
///
/// There is no decrease-key. A cheaper route is pushed as a new entry and
/// the search discards the older, stale entries when they surface.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `pos` with key `f`.
    pub fn push(&mut self, pos: Point, f: i32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry { pos, f, seq });
    }

    /// Remove the entry with the smallest `f`, first-in first-out among ties.
    pub fn pop_min(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries, stale ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
