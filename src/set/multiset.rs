use crate::algorithm::{lower_bound_by, search_by, upper_bound_by};
use crate::error::{Error, Result};
use crate::utils::comparator::{self, Comparator};
use crate::utils::{Container, Snapshot};
use log::debug;
use parking_lot::Mutex;

/// A sorted collection that keeps every inserted element, equal ones
/// included, in insertion order among themselves.
pub struct MultiSet<T> {
    data: Mutex<Vec<T>>,
    cmp: Comparator<T>,
}

impl<T: Ord + 'static> MultiSet<T> {
    pub fn new() -> Self {
        Self::with_comparator(comparator::natural())
    }
}

impl<T: Ord + 'static> Default for MultiSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MultiSet<T> {
    pub fn with_comparator(cmp: Comparator<T>) -> Self {
        MultiSet {
            data: Mutex::new(Vec::new()),
            cmp,
        }
    }

    /// Inserts `item` after every element equal to it.
    pub fn insert(&self, item: T) {
        let mut data = self.data.lock();
        let at = upper_bound_by(&data, &item, &*self.cmp);
        data.insert(at, item);
    }

    /// Removes the first occurrence of `item`.
    pub fn erase(&self, item: &T) -> Result<()> {
        let mut data = self.data.lock();
        let at = search_by(&data, item, &*self.cmp).ok_or(Error::NotFound)?;
        data.remove(at);
        Ok(())
    }

    pub fn count(&self, item: &T) -> usize {
        let data = self.data.lock();
        upper_bound_by(&data, item, &*self.cmp) - lower_bound_by(&data, item, &*self.cmp)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.count(item) > 0
    }

    /// A snapshot of the whole multiset with its cursor on the first element
    /// equal to `item`, or `None` when there is none.
    pub fn find(&self, item: &T) -> Option<Snapshot<T>>
    where
        T: Clone,
    {
        let data = self.data.lock();
        let at = search_by(&data, item, &*self.cmp)?;
        Some(Snapshot::starting_at(data.clone(), at))
    }

    pub fn size(&self) -> usize {
        self.data.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }

    pub fn clear(&self) {
        let mut data = self.data.lock();
        if !data.is_empty() {
            debug!("clearing multiset holding {} elements", data.len());
        }
        data.clear();
    }

    pub fn iter(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot::new(self.data.lock().clone())
    }
}

impl<T> Container for MultiSet<T> {
    fn size(&self) -> usize {
        MultiSet::size(self)
    }
}
