mod node;

use self::node::RawTree;
use super::{Inserted, Removed, CHECK_INVARIANTS};
use crate::error::{Error, Result};
use crate::utils::comparator::{self, Comparator};
use crate::utils::{Container, Snapshot};
use log::debug;
use parking_lot::Mutex;

struct Inner<T> {
    raw: RawTree<T>,
    // logical elements, multiplicities included
    size: usize,
}

/// An ordered, duplicate-aware dictionary backed by a red-black tree.
///
/// Every operation serializes on one lock held for its whole duration, so a
/// tree can be shared between threads behind an `Arc`.
///
/// ```
/// use stlite::tree::{Inserted, RbTree};
///
/// let tree = RbTree::new(true);
/// assert_eq!(tree.insert(3), Ok(Inserted::New));
/// assert_eq!(tree.insert(3), Ok(Inserted::Duplicate));
/// tree.insert(1).unwrap();
/// assert_eq!(tree.count(&3), 2);
/// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![1, 3, 3]);
/// ```
pub struct RbTree<T> {
    inner: Mutex<Inner<T>>,
    cmp: Comparator<T>,
    allow_duplicates: bool,
}

impl<T: Ord + 'static> RbTree<T> {
    /// Creates an empty tree ordered by `T`'s own ordering.
    pub fn new(allow_duplicates: bool) -> Self {
        Self::with_comparator(allow_duplicates, comparator::natural())
    }
}

impl<T: Ord + 'static> Default for RbTree<T> {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<T> RbTree<T> {
    pub fn with_comparator(allow_duplicates: bool, cmp: Comparator<T>) -> Self {
        RbTree {
            inner: Mutex::new(Inner {
                raw: RawTree::new(),
                size: 0,
            }),
            cmp,
            allow_duplicates,
        }
    }

    pub fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Inserts `value`. An equal element already present either gains one
    /// more occurrence or is overwritten, depending on the duplicate policy.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [InconsistentComparator](Error::InconsistentComparator) if the
    /// comparator contradicts itself on the way down; the tree is unchanged.
    pub fn insert(&self, value: T) -> Result<Inserted> {
        let mut inner = self.inner.lock();
        let inserted = inner.raw.insert(value, self.allow_duplicates, &self.cmp)?;
        if inserted.grew() {
            inner.size += 1;
        }
        if CHECK_INVARIANTS {
            inner.raw.check_invariants(&self.cmp);
        }
        Ok(inserted)
    }

    /// Removes one occurrence of `value`.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [NotFound](Error::NotFound) if no equal element is stored, and
    /// [InconsistentComparator](Error::InconsistentComparator) as for
    /// [insert](Self::insert). Either way nothing is removed.
    pub fn erase(&self, value: &T) -> Result<Removed> {
        let mut inner = self.inner.lock();
        match inner.size {
            0 => return Err(Error::NotFound),
            1 => {
                if inner.raw.count(value, &self.cmp)? == 0 {
                    return Err(Error::NotFound);
                }
                inner.raw.clear();
                inner.size = 0;
                return Ok(Removed::Removed);
            }
            _ => {}
        }
        let removed = inner.raw.remove(value, &self.cmp)?;
        inner.size -= 1;
        if CHECK_INVARIANTS {
            inner.raw.check_invariants(&self.cmp);
        }
        Ok(removed)
    }

    /// Number of stored occurrences of `value`, 0 if absent.
    ///
    /// # Errors
    ///
    /// Returns [InconsistentComparator](Error::InconsistentComparator) if the
    /// comparator contradicts itself on the way down.
    pub fn try_count(&self, value: &T) -> Result<usize> {
        self.inner.lock().raw.count(value, &self.cmp)
    }

    /// Like [try_count](Self::try_count), reading a comparator failure as 0.
    pub fn count(&self, value: &T) -> usize {
        // an inconsistent comparator was already reported by `compare`
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
            debug!("clearing red-black tree holding {} elements", inner.size);
        }
        inner.raw.clear();
        inner.size = 0;
    }

    /// Nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.inner.lock().raw.height()
    }

    /// An ascending snapshot of the tree, duplicates expanded.
    pub fn iter(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        let inner = self.inner.lock();
        Snapshot::new(inner.raw.in_order(inner.size))
    }
}

impl<T> Container for RbTree<T> {
    fn size(&self) -> usize {
        RbTree::size(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::comparator::{from_fn, reversed};
    use quickcheck::{quickcheck, Arbitrary, Gen};
    use std::cmp::Ordering;
    use std::collections::BTreeMap;
    use std::iter;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn ascending_insertions_balance_around_the_middle() {
        let tree = RbTree::new(false);
        for v in [10, 20, 30].iter() {
            tree.insert(*v).unwrap();
        }
        let inner = tree.inner.lock();
        let root = inner.raw.root().unwrap();
        assert_eq!(root.value, 20);
        assert!(!root.red);
        let left = inner.raw.node(root.left.unwrap());
        let right = inner.raw.node(root.right.unwrap());
        assert_eq!((left.value, right.value), (10, 30));
        // the outer-case fixup recolors only the old root; both leaves stay red
        assert!(left.red && right.red);
        assert!(left.left.is_none() && right.right.is_none());
        assert_eq!(inner.raw.height(), 2);
    }

    #[test]
    fn iteration_is_sorted() {
        let tree = RbTree::new(false);
        for v in [5, 1, 4, 2, 3].iter() {
            tree.insert(*v).unwrap();
        }
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_tree_lookups() {
        let tree = RbTree::new(false);
        assert_eq!(tree.count(&7), 0);
        assert_eq!(tree.erase(&7), Err(Error::NotFound));
        assert_eq!(tree.size(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn distinct_values_are_counted_once() {
        let tree = RbTree::new(false);
        for v in 0..100 {
            assert_eq!(tree.insert(v), Ok(Inserted::New));
        }
        assert_eq!(tree.size(), 100);
        assert!((0..100).all(|v| tree.count(&v) == 1));

        let twice = RbTree::new(false);
        twice.insert("k").unwrap();
        assert_eq!(twice.insert("k"), Ok(Inserted::Replaced));
        assert_eq!(twice.size(), 1);
    }

    #[test]
    fn duplicates_raise_multiplicity() {
        let tree = RbTree::new(true);
        for _ in 0..3 {
            tree.insert(42).unwrap();
        }
        assert_eq!(tree.count(&42), 3);
        assert_eq!(tree.size(), 3);
        assert_eq!(tree.erase(&42), Ok(Removed::Decremented));
        assert_eq!(tree.count(&42), 2);
        assert_eq!(tree.size(), 2);
    }

    #[test]
    fn replacing_keeps_the_newest_value() {
        // ordered by the key only, so equal keys carry different payloads
        let by_key = from_fn(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
        let tree = RbTree::with_comparator(false, by_key);
        tree.insert((1, 'a')).unwrap();
        assert_eq!(tree.insert((1, 'b')), Ok(Inserted::Replaced));
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![(1, 'b')]);
    }

    #[test]
    fn single_insert_erase_round_trip() {
        let tree = RbTree::new(false);
        tree.insert(9).unwrap();
        assert_eq!(tree.erase(&8), Err(Error::NotFound));
        assert_eq!(tree.erase(&9), Ok(Removed::Removed));
        assert!(tree.is_empty());
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn clear_drops_everything() {
        let tree = RbTree::new(true);
        for v in 0..50 {
            tree.insert(v % 7).unwrap();
        }
        assert_eq!(tree.size(), 50);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.count(&3), 0);
        tree.insert(1).unwrap();
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn custom_order_drives_iteration() {
        let tree = RbTree::with_comparator(false, reversed());
        for v in 1..=5 {
            tree.insert(v).unwrap();
        }
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
        assert!(tree.contains(&3));
    }

    #[test]
    fn inconsistent_comparator_is_a_configuration_error() {
        let tree = RbTree::with_comparator(false, from_fn(|_: &i32, _: &i32| Ordering::Less));
        assert_eq!(tree.insert(1), Ok(Inserted::New));
        assert_eq!(tree.insert(2), Err(Error::InconsistentComparator));
        assert_eq!(tree.size(), 1);
        assert_eq!(tree.count(&1), 0);
        assert_eq!(tree.try_count(&1), Err(Error::InconsistentComparator));
    }

    #[test]
    fn try_count_reports_occurrences() {
        let tree = RbTree::new(true);
        tree.insert(4).unwrap();
        tree.insert(4).unwrap();
        assert_eq!(tree.try_count(&4), Ok(2));
        assert_eq!(tree.try_count(&5), Ok(0));
    }

    #[test]
    fn long_sequential_runs_stay_logarithmic() {
        let tree = RbTree::new(false);
        for v in 0..50_000 {
            tree.insert(v).unwrap();
        }
        for v in (0..50_000).step_by(3) {
            tree.erase(&v).unwrap();
        }
        tree.inner.lock().raw.check_invariants(&tree.cmp);
        assert_eq!(tree.size(), 33_333);
        // h <= 2 * log2(n + 1)
        assert!(tree.height() <= 32);
    }

    #[test]
    fn snapshots_do_not_observe_later_mutation() {
        let tree = RbTree::new(false);
        tree.insert(1).unwrap();
        tree.insert(2).unwrap();
        let mut snapshot = tree.iter();
        tree.insert(3).unwrap();
        tree.erase(&1).unwrap();
        assert_eq!(snapshot.by_ref().collect::<Vec<_>>(), vec![1, 2]);
        snapshot.rewind();
        assert_eq!(snapshot.count(), 2);
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn shared_between_threads() {
        let tree = Arc::new(RbTree::new(true));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let tree = Arc::clone(&tree);
                thread::spawn(move || {
                    for v in (t * 250)..((t + 1) * 250) {
                        tree.insert(v % 500).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(tree.size(), 1000);
        assert!((0..500).all(|v| tree.count(&v) == 2));
        let all: Vec<_> = tree.iter().collect();
        assert!(all.windows(2).all(|w| w[0] <= w[1]));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u8),
        Erase(u8),
    }

    impl Arbitrary for Op {
        fn arbitrary<G: Gen>(g: &mut G) -> Self {
            // a small key space so erases mostly hit
            let v = u8::arbitrary(g) % 48;
            match u8::arbitrary(g) % 3 {
                0 => Op::Erase(v),
                _ => Op::Insert(v),
            }
        }
    }

    fn matches_model(ops: Vec<Op>, allow_duplicates: bool) -> bool {
        let tree = RbTree::new(allow_duplicates);
        let mut model: BTreeMap<u8, usize> = BTreeMap::new();
        for op in ops {
            match op {
                Op::Insert(v) => {
                    tree.insert(v).unwrap();
                    let c = model.entry(v).or_insert(0);
                    if allow_duplicates || *c == 0 {
                        *c += 1;
                    }
                }
                Op::Erase(v) => {
                    let erased = tree.erase(&v);
                    match model.get_mut(&v) {
                        Some(c) => {
                            if erased.is_err() {
                                return false;
                            }
                            *c -= 1;
                            if *c == 0 {
                                model.remove(&v);
                            }
                        }
                        None => {
                            if erased != Err(Error::NotFound) {
                                return false;
                            }
                        }
                    }
                }
            }
            tree.inner.lock().raw.check_invariants(&tree.cmp);
        }
        let expected: Vec<u8> = model
            .iter()
            .flat_map(|(v, c)| iter::repeat(*v).take(*c))
            .collect();
        tree.size() == expected.len()
            && tree.iter().collect::<Vec<_>>() == expected
            && model.iter().all(|(v, c)| tree.count(v) == *c)
    }

    quickcheck! {
        fn unique_tree_matches_model(ops: Vec<Op>) -> bool {
            matches_model(ops, false)
        }

        fn multi_tree_matches_model(ops: Vec<Op>) -> bool {
            matches_model(ops, true)
        }
    }
}
