use crate::error::{MstError, MstResult};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Min-ordered priority queue over `BinaryHeap`.
#[derive(Debug, Clone)]
pub struct MinHeap<T: Ord> {
    heap: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap {
            heap: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MinHeap {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, item: T) {
        self.heap.push(Reverse(item));
    }

    /// Remove and return the smallest item.
    pub fn delete_min(&mut self) -> MstResult<T> {
        self.heap
            .pop()
            .map(|Reverse(item)| item)
            .ok_or(MstError::EmptyQueue)
    }

    pub fn peek_min(&self) -> Option<&T> {
        self.heap.peek().map(|Reverse(item)| item)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Move every item of `other` into `self`, leaving `other` empty.
    pub fn append(&mut self, other: &mut MinHeap<T>) {
        self.heap.append(&mut other.heap);
    }

    /// Items in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(|Reverse(item)| item)
    }
}

impl<T: Ord> Extend<T> for MinHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.heap.extend(iter.into_iter().map(Reverse));
    }
}
