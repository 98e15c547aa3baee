//! Array-backed binary min-heap keyed by a numeric priority.
//!
//! Used to order background work: the smallest priority is always dequeued
//! first. Items with equal priority come out in insertion order.

use serde::{Deserialize, Serialize};

/// A single slot in the backing heap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeapEntry<T> {
    /// The queued item.
    pub item: T,
    /// Ordering key; lower values are dequeued first.
    pub priority: f64,
    /// Insertion sequence, used to break ties between equal priorities.
    pub seq: u64,
}

impl<T> HeapEntry<T> {
    fn precedes(&self, other: &Self) -> bool {
        self.priority < other.priority || (self.priority == other.priority && self.seq < other.seq)
    }
}

/// A generic min-priority queue.
///
/// Mutation takes `&mut self`, so a queue has exactly one writer at a time.
/// Share one between tasks through [`WorkQueue`](crate::scheduler::WorkQueue).
///
/// NaN priorities do not order against anything; callers should not use them.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: Vec<HeapEntry<T>>,
    next_seq: u64,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Insert `item` with the given priority.
    pub fn enqueue(&mut self, item: T, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(HeapEntry {
            item,
            priority,
            seq,
        });
        self.bubble_up(self.heap.len() - 1);
    }

    /// Remove and return the item with the smallest priority.
    pub fn dequeue(&mut self) -> Option<T> {
        match self.heap.len() {
            0 => None,
            1 => self.heap.pop().map(|entry| entry.item),
            _ => {
                // swap_remove moves the last entry into the root slot
                let root = self.heap.swap_remove(0);
                self.bubble_down(0);
                Some(root.item)
            }
        }
    }

    /// The item that the next `dequeue` would return.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|entry| &entry.item)
    }

    /// Linear scan for the first item matching `predicate`, ignoring heap order.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.heap
            .iter()
            .map(|entry| &entry.item)
            .find(|item| predicate(item))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// The raw backing array. Order is heap order, not priority order; only
    /// meant for debugging and tests.
    pub fn heap(&self) -> &[HeapEntry<T>] {
        &self.heap
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    fn bubble_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].precedes(&self.heap[parent]) {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn bubble_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.heap.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T> Extend<(T, f64)> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = (T, f64)>>(&mut self, iter: I) {
        for (item, priority) in iter {
            self.enqueue(item, priority);
        }
    }
}

impl<T> FromIterator<(T, f64)> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut queue = PriorityQueue::new();
        queue.extend(iter);
        queue
    }
}
