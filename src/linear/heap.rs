use crate::utils::comparator::{self, Comparator};
use crate::utils::{Container, Snapshot};
use log::debug;
use parking_lot::Mutex;
use std::cmp::Ordering;

/// A binary heap whose top is the element that compares least.
///
/// With [natural](comparator::natural) ordering this is a min-heap, with
/// [reversed](comparator::reversed) a max-heap.
pub struct Heap<T> {
    data: Mutex<Vec<T>>,
    cmp: Comparator<T>,
}

impl<T: Ord + 'static> Heap<T> {
    pub fn new() -> Self {
        Self::with_comparator(comparator::natural())
    }
}

impl<T: Ord + 'static> Default for Heap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Heap<T> {
    pub fn with_comparator(cmp: Comparator<T>) -> Self {
        Heap {
            data: Mutex::new(Vec::new()),
            cmp,
        }
    }

    pub fn push(&self, item: T) {
        let mut data = self.data.lock();
        data.push(item);
        let last = data.len() - 1;
        sift_up(&mut data, last, &self.cmp);
    }

    /// Removes and returns the top element.
    pub fn pop(&self) -> Option<T> {
        let mut data = self.data.lock();
        if data.is_empty() {
            return None;
        }
        let top = data.swap_remove(0);
        sift_down(&mut data, 0, &self.cmp);
        Some(top)
    }

    pub fn top(&self) -> Option<T>
    where
        T: Clone,
    {
        self.data.lock().first().cloned()
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
            debug!("clearing heap holding {} elements", data.len());
        }
        data.clear();
    }

    /// The elements in the heap's internal array order; only the first one is
    /// guaranteed to be the top.
    pub fn iter(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot::new(self.data.lock().clone())
    }
}

impl<T> Container for Heap<T> {
    fn size(&self) -> usize {
        Heap::size(self)
    }
}

fn sift_up<T>(data: &mut [T], mut child: usize, cmp: &Comparator<T>) {
    while child > 0 {
        let parent = (child - 1) / 2;
        if cmp(&data[parent], &data[child]) != Ordering::Greater {
            break;
        }
        data.swap(parent, child);
        child = parent;
    }
}

fn sift_down<T>(data: &mut [T], mut parent: usize, cmp: &Comparator<T>) {
    loop {
        let mut least = parent;
        for child in [2 * parent + 1, 2 * parent + 2].iter().copied() {
            if child < data.len() && cmp(&data[least], &data[child]) == Ordering::Greater {
                least = child;
            }
        }
        if least == parent {
            return;
        }
        data.swap(parent, least);
        parent = least;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::comparator::reversed;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn min_heap_by_default() {
        let heap = Heap::new();
        for v in [5, 3, 8, 1, 9, 2].iter() {
            heap.push(*v);
        }
        assert_eq!(heap.top(), Some(1));
        assert_eq!(heap.size(), 6);
        let drained: Vec<_> = std::iter::from_fn(|| heap.pop()).collect();
        assert_eq!(drained, vec![1, 2, 3, 5, 8, 9]);
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn reversed_order_gives_a_max_heap() {
        let heap = Heap::with_comparator(reversed());
        for v in 0..10 {
            heap.push(v);
        }
        assert_eq!(heap.top(), Some(9));
        assert_eq!(heap.iter().next(), Some(9));
        heap.clear();
        assert_eq!(heap.top(), None);
    }

    #[test]
    fn random_drain_is_sorted() {
        let mut rng = StdRng::seed_from_u64(17);
        let heap = Heap::new();
        let mut values: Vec<u32> = (0..500).map(|_| rng.gen_range(0..100)).collect();
        for v in &values {
            heap.push(*v);
        }
        values.sort_unstable();
        let drained: Vec<_> = std::iter::from_fn(|| heap.pop()).collect();
        assert_eq!(drained, values);
    }
}
