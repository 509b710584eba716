use crate::utils::{Container, Snapshot};
use log::debug;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// A first-in, first-out queue that can be shared between threads.
pub struct Queue<T> {
    inner: Mutex<VecDeque<T>>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Queue {
            inner: Mutex::new(VecDeque::new()),
        }
    }

    /// Appends `item` at the back and returns the new size.
    pub fn push(&self, item: T) -> usize {
        let mut inner = self.inner.lock();
        inner.push_back(item);
        inner.len()
    }

    pub fn pop(&self) -> Option<T> {
        let mut inner = self.inner.lock();
        let item = inner.pop_front()?;
        if inner.len() <= inner.capacity() / 2 {
            inner.shrink_to_fit();
        }
        Some(item)
    }

    pub fn front(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().front().cloned()
    }

    pub fn back(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().back().cloned()
    }

    pub fn size(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        if !inner.is_empty() {
            debug!("clearing queue holding {} elements", inner.len());
        }
        *inner = VecDeque::new();
    }

    /// Elements from the front of the queue to its back.
    pub fn iter(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot::new(self.inner.lock().iter().cloned().collect())
    }
}

impl<T> Container for Queue<T> {
    fn size(&self) -> usize {
        Queue::size(self)
    }
}
