use crate::algorithm::{lower_bound_by, search_by};
use crate::error::{Error, Result};
use crate::utils::comparator::{self, Comparator};
use crate::utils::{Container, Snapshot};
use log::debug;
use parking_lot::Mutex;

/// A sorted collection of distinct elements kept in one contiguous buffer.
///
/// Lookups are binary searches; insertion and removal shift the tail of the
/// buffer.
pub struct Set<T> {
    data: Mutex<Vec<T>>,
    cmp: Comparator<T>,
}

impl<T: Ord + 'static> Set<T> {
    pub fn new() -> Self {
        Self::with_comparator(comparator::natural())
    }
}

impl<T: Ord + 'static> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Set<T> {
    pub fn with_comparator(cmp: Comparator<T>) -> Self {
        Set {
            data: Mutex::new(Vec::new()),
            cmp,
        }
    }

    /// Inserts `item` unless an equal element is already present. Returns
    /// whether the set changed.
    pub fn insert(&self, item: T) -> bool {
        let mut data = self.data.lock();
        let at = lower_bound_by(&data, &item, &*self.cmp);
        if let Some(existing) = data.get(at) {
            if (self.cmp)(existing, &item).is_eq() {
                return false;
            }
        }
        data.insert(at, item);
        true
    }

    pub fn erase(&self, item: &T) -> Result<()> {
        let mut data = self.data.lock();
        let at = search_by(&data, item, &*self.cmp).ok_or(Error::NotFound)?;
        data.remove(at);
        Ok(())
    }

    pub fn count(&self, item: &T) -> usize {
        let data = self.data.lock();
        search_by(&data, item, &*self.cmp).map_or(0, |_| 1)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.count(item) > 0
    }

    /// A snapshot of the whole set with its cursor on `item`, or `None` when
    /// `item` is absent.
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
            debug!("clearing set holding {} elements", data.len());
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

impl<T> Container for Set<T> {
    fn size(&self) -> usize {
        Set::size(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::comparator::reversed;

    #[test]
    fn distinct_and_sorted() {
        let set = Set::new();
        for v in [4, 1, 3, 1, 2, 4].iter() {
            set.insert(*v);
        }
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(set.size(), 4);
        assert!(!set.insert(3));
        assert_eq!(set.count(&3), 1);
        assert_eq!(set.count(&9), 0);
    }

    #[test]
    fn erase_reports_missing() {
        let set = Set::new();
        set.insert("b");
        assert_eq!(set.erase(&"a"), Err(Error::NotFound));
        assert_eq!(set.erase(&"b"), Ok(()));
        assert!(set.is_empty());
    }

    #[test]
    fn find_positions_the_cursor() {
        let set = Set::with_comparator(reversed());
        for v in 1..=5 {
            set.insert(v);
        }
        let mut found = set.find(&3).unwrap();
        assert_eq!(found.current(), Some(&3));
        assert_eq!(found.by_ref().collect::<Vec<_>>(), vec![3, 2, 1]);
        found.rewind();
        assert_eq!(found.next(), Some(5));
        assert!(set.find(&6).is_none());
        set.clear();
        assert_eq!(set.size(), 0);
    }
}
