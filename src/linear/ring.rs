use crate::utils::{Container, Snapshot};

/// A circular sequence with a cursor.
///
/// The cursor always designates an element while the ring is non-empty.
/// Moving past either end wraps around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring<T> {
    data: Vec<T>,
    cursor: usize,
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Ring::new()
    }
}

impl<T> Ring<T> {
    pub fn new() -> Self {
        Ring {
            data: Vec::new(),
            cursor: 0,
        }
    }

    /// Places `item` right after the cursor. On an empty ring the item becomes
    /// the cursor element. The cursor itself does not move.
    pub fn insert(&mut self, item: T) {
        if self.data.is_empty() {
            self.cursor = 0;
            self.data.push(item);
        } else {
            self.data.insert(self.cursor + 1, item);
        }
    }

    /// Removes the cursor element; the cursor moves on to the element that
    /// followed it, wrapping to the start.
    pub fn erase(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let item = self.data.remove(self.cursor);
        if self.cursor >= self.data.len() {
            self.cursor = 0;
        }
        Some(item)
    }

    pub fn next(&mut self) {
        if !self.data.is_empty() {
            self.cursor = (self.cursor + 1) % self.data.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.data.is_empty() {
            self.cursor = (self.cursor + self.data.len() - 1) % self.data.len();
        }
    }

    /// Element under the cursor.
    pub fn value(&self) -> Option<&T> {
        self.data.get(self.cursor)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.cursor = 0;
    }

    /// One lap around the ring starting at the cursor.
    pub fn iter(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        let (before, from) = self.data.split_at(self.cursor);
        Snapshot::new(from.iter().chain(before).cloned().collect())
    }
}

impl<T> Container for Ring<T> {
    fn size(&self) -> usize {
        self.data.len()
    }
}
