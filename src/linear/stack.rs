use crate::utils::{Container, Snapshot};

/// A last-in, first-out stack over a growable buffer.
///
/// Spare capacity is handed back once pops leave the buffer at most half
/// used, so a stack that briefly grew large does not pin its peak memory.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Stack<T> {
    inner: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Stack::new()
    }
}

impl<T> Stack<T> {
    pub fn new() -> Stack<T> {
        Stack { inner: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Stack<T> {
        Stack {
            inner: Vec::with_capacity(capacity),
        }
    }

    /// Pushes `item` and returns the new size.
    pub fn push(&mut self, item: T) -> usize {
        self.inner.push(item);
        self.inner.len()
    }

    pub fn pop(&mut self) -> Option<T> {
        let item = self.inner.pop()?;
        if self.inner.len() <= self.inner.capacity() / 2 {
            self.inner.shrink_to_fit();
        }
        Some(item)
    }

    pub fn top(&self) -> Option<&T> {
        self.inner.last()
    }

    pub fn size(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn clear(&mut self) {
        self.inner = Vec::new();
    }

    /// Elements from the bottom of the stack to its top.
    pub fn iter(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot::new(self.inner.clone())
    }
}

impl<T> Container for Stack<T> {
    fn size(&self) -> usize {
        self.inner.len()
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}
