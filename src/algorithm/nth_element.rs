use super::sort::partition;
use std::cmp::Ordering;
use std::mem;

/// Reorders `v` so that `v[n]` holds the element a full sort would put there,
/// with everything before it comparing no greater and everything after it no
/// less. An `n` past the end is clamped to the last index.
pub fn nth_element_by<T, F>(v: &mut [T], n: usize, f: F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    if v.is_empty() {
        return;
    }
    let mut n = n.min(v.len() - 1);
    let mut v = v;
    while v.len() > 1 {
        let split = partition(v, &f);
        let (left, right) = mem::take(&mut v).split_at_mut(split + 1);
        if n <= split {
            v = left;
        } else {
            n -= split + 1;
            v = right;
        }
    }
}

pub fn nth_element<T: Ord + Clone>(v: &mut [T], n: usize) {
    nth_element_by(v, n, T::cmp)
}
