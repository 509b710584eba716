use std::iter::FusedIterator;
use std::slice;

/// A point-in-time, already materialized sequence of a container's elements.
///
/// Snapshots are copies: later mutation of the container is not observed.
/// Iteration clones elements out of the snapshot, so it can be restarted with
/// [`rewind`](Self::rewind) as often as needed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot<T> {
    items: Vec<T>,
    front: usize,
    back: usize,
}

impl<T> Snapshot<T> {
    pub fn new(items: Vec<T>) -> Self {
        let back = items.len();
        Self {
            items,
            front: 0,
            back,
        }
    }

    /// A snapshot whose cursor is already positioned on `index`.
    pub(crate) fn starting_at(items: Vec<T>, index: usize) -> Self {
        let mut snapshot = Self::new(items);
        snapshot.front = index.min(snapshot.back);
        snapshot
    }

    /// Puts the cursor back on the first element.
    pub fn rewind(&mut self) {
        self.front = 0;
        self.back = self.items.len();
    }

    /// Index of the element the next call to `next` returns.
    pub fn position(&self) -> usize {
        self.front
    }

    /// Number of elements captured, independent of the cursor.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Element under the cursor.
    pub fn current(&self) -> Option<&T> {
        if self.front < self.back {
            self.items.get(self.front)
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Elements not yet consumed from either end.
    pub fn remaining(&self) -> &[T] {
        &self.items[self.front..self.back]
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> Iterator for Snapshot<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let item = self.items[self.front].clone();
            self.front += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<T: Clone> DoubleEndedIterator for Snapshot<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.items[self.back].clone())
        } else {
            None
        }
    }
}

impl<T: Clone> ExactSizeIterator for Snapshot<T> {}

impl<T: Clone> FusedIterator for Snapshot<T> {}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
