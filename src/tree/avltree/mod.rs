mod node;

use self::node::Link;
use super::{Inserted, Removed, CHECK_INVARIANTS};
use crate::error::Result;
use crate::utils::comparator::{self, Comparator};
use crate::utils::{Container, Snapshot};
use log::debug;
use parking_lot::Mutex;

struct Inner<T> {
    root: Link<T>,
    size: usize,
}

/// An ordered, duplicate-aware dictionary backed by a height-balanced AVL
/// tree. It offers the same operations as [RbTree](super::RbTree) and keeps
/// the sibling subtrees of every node within one level of each other.
pub struct AvlTree<T> {
    inner: Mutex<Inner<T>>,
    cmp: Comparator<T>,
    allow_duplicates: bool,
}

impl<T: Ord + 'static> AvlTree<T> {
    pub fn new(allow_duplicates: bool) -> Self {
        Self::with_comparator(allow_duplicates, comparator::natural())
    }
}

impl<T: Ord + 'static> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<T> AvlTree<T> {
    pub fn with_comparator(allow_duplicates: bool, cmp: Comparator<T>) -> Self {
        AvlTree {
            inner: Mutex::new(Inner { root: None, size: 0 }),
            cmp,
            allow_duplicates,
        }
    }

    pub fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Inserts `value`, rebalancing every ancestor of the new node.
    pub fn insert(&self, value: T) -> Result<Inserted> {
        let mut inner = self.inner.lock();
        let inserted = node::insert(&mut inner.root, value, self.allow_duplicates, &self.cmp)?;
        if inserted.grew() {
            inner.size += 1;
        }
        if CHECK_INVARIANTS {
            node::check_invariants(&inner.root, None, None, &self.cmp);
        }
        Ok(inserted)
    }

    /// Removes one occurrence of `value`; fails with
    /// [NotFound](crate::Error::NotFound) when there is none.
    pub fn erase(&self, value: &T) -> Result<Removed> {
        let mut inner = self.inner.lock();
        let removed = node::remove(&mut inner.root, value, &self.cmp)?;
        inner.size -= 1;
        if CHECK_INVARIANTS {
            node::check_invariants(&inner.root, None, None, &self.cmp);
        }
        Ok(removed)
    }

    /// Number of stored occurrences of `value`, failing with
    /// [InconsistentComparator](crate::Error::InconsistentComparator) when the
    /// comparator contradicts itself.
    pub fn try_count(&self, value: &T) -> Result<usize> {
        let inner = self.inner.lock();
        Ok(node::find(&inner.root, value, &self.cmp)?.map_or(0, |node| node.count))
    }

    pub fn count(&self, value: &T) -> usize {
        self.try_count(value).unwrap_or(0)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.count(value) > 0
    }

    pub fn size(&self) -> usize {
        self.inner.lock().size
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        if inner.size > 0 {
            debug!("clearing AVL tree holding {} elements", inner.size);
        }
        inner.root = None;
        inner.size = 0;
    }

    pub fn height(&self) -> usize {
        node::height(&self.inner.lock().root)
    }

    /// An ascending snapshot of the tree, duplicates expanded.
    pub fn iter(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        let inner = self.inner.lock();
        let mut items = Vec::with_capacity(inner.size);
        node::in_order(&inner.root, &mut items);
        Snapshot::new(items)
    }
}

impl<T> Container for AvlTree<T> {
    fn size(&self) -> usize {
        AvlTree::size(self)
    }
}
